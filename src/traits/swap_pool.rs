//! Swap trait for executing trades and querying pool state.
//!
//! [`SwapPool`] is the trading half of a pool's surface:
//!
//! 1. **Execute**: [`SwapPool::swap`] performs the exchange.
//! 2. **Quote**: [`SwapPool::quote_swap`] prices a trade without moving
//!    anything.
//! 3. **Inspect**: [`SwapPool::reserves`], [`SwapPool::price`] and
//!    [`SwapPool::asset_pair`] read the current state.
//!
//! # Fee Deduction Invariant
//!
//! The 0.3% fee is taken from the input before the curve is applied:
//!
//! ```text
//! after_fee  = amount_in × 997
//! amount_out = ⌊after_fee × reserve_out / (reserve_in × 1000 + after_fee)⌋
//! ```
//!
//! The whole input, fee included, stays in the pool, so
//! `reserve_in × reserve_out` strictly grows on every completed swap.

use crate::domain::{AccountId, Amount, AssetPair, Reserves, SwapDirection};
use crate::error::AmmError;

/// Trading surface of a two-asset pool.
///
/// # Errors
///
/// Methods that can fail return [`Result<T, AmmError>`].  Common error
/// variants include:
///
/// - [`AmmError::InvalidAmount`]: zero input
/// - [`AmmError::InvalidReserves`]: one or both reserves are empty
/// - [`AmmError::TransferFailed`]: a ledger rejected a movement
/// - [`AmmError::Overflow`]: arithmetic overflow during pricing
pub trait SwapPool {
    /// Sells `amount_in` of the input asset chosen by `direction` on
    /// behalf of `caller` and returns the output paid.
    ///
    /// The trade is atomic: either both movements happen or neither does.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if `amount_in` is zero.
    /// - [`AmmError::InvalidReserves`] if either reserve is empty.
    /// - [`AmmError::InsufficientLiquidity`] if the output would be zero.
    /// - [`AmmError::TransferFailed`] if a ledger rejects a movement.
    fn swap(
        &mut self,
        caller: &AccountId,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<Amount, AmmError>;

    /// Prices a trade against the current reserves without executing it.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if `amount_in` is zero.
    /// - [`AmmError::InvalidReserves`] if either reserve is empty.
    /// - [`AmmError::Overflow`] if an intermediate product overflows.
    fn quote_swap(&self, direction: SwapDirection, amount_in: Amount) -> Result<Amount, AmmError>;

    /// Returns the current reserves.
    fn reserves(&self) -> Reserves;

    /// Returns `⌊reserve_b × 1000 / reserve_a⌋`, or `0` for an empty
    /// reserve.
    #[must_use]
    fn price(&self) -> u128;

    /// Returns the pool's asset pair.
    #[must_use]
    fn asset_pair(&self) -> AssetPair;
}
