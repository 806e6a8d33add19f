//! Liquidity management trait extending [`SwapPool`].
//!
//! [`LiquidityPool`] adds share-based deposits and withdrawals on top of
//! the trading surface.
//!
//! # Share Accounting Invariant
//!
//! Total shares **only** change through [`LiquidityPool::deposit`] and
//! [`LiquidityPool::withdraw`].  Swaps never mint or burn.  For a pool
//! with holders `h` and total shares `S`:
//!
//! ```text
//! S = Σ shares_of(h)   for all h
//! ```
//!
//! and `S == 0` exactly when both reserves are empty, unless assets were
//! credited to the custody account out of band.

use super::SwapPool;
use crate::domain::{AccountId, Amount, Shares};
use crate::error::AmmError;

/// Trait for pools that issue ownership shares against deposits.
///
/// # Errors
///
/// Methods that can fail return [`Result<T, AmmError>`].  Common error
/// variants include:
///
/// - [`AmmError::InvalidAmount`]: a zero amount or share count
/// - [`AmmError::InsufficientLiquidity`]: the deposit would mint nothing
/// - [`AmmError::InsufficientShares`]: withdrawing more than is held
/// - [`AmmError::TransferFailed`]: a ledger rejected a movement
pub trait LiquidityPool: SwapPool {
    /// Deposits both assets from `caller` and returns the shares minted.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if either amount is zero.
    /// - [`AmmError::InsufficientLiquidity`] if no shares would be minted.
    /// - [`AmmError::TransferFailed`] if a ledger rejects a movement.
    fn deposit(
        &mut self,
        caller: &AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Shares, AmmError>;

    /// Burns `share_amount` of `caller`'s shares and returns the
    /// `(amount_a, amount_b)` paid out.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if `share_amount` is zero.
    /// - [`AmmError::InsufficientShares`] if `caller` holds fewer shares.
    /// - [`AmmError::TransferFailed`] if a ledger rejects a payout.
    fn withdraw(
        &mut self,
        caller: &AccountId,
        share_amount: Shares,
    ) -> Result<(Amount, Amount), AmmError>;

    /// Returns the total outstanding shares.
    fn total_shares(&self) -> Shares;

    /// Returns the shares held by `account`.
    fn shares_of(&self, account: &AccountId) -> Shares;
}
