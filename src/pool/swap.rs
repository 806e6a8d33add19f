//! Trades against the pool.
//!
//! A trade is priced with [`quote`] against the reserves
//! stored at the last reconciliation, then executed as two movements:
//! the input is pulled from the trader with `transfer_from`, the output
//! is paid from the custody account with `transfer`.  If the payout fails
//! the pull is reverted.

use tracing::debug;

use super::Pool;
use crate::domain::{AccountId, Amount, PoolEvent, SwapDirection, SwapRecord};
use crate::error::AmmError;
use crate::ledger::AssetLedger;
use crate::swap::quote;

impl<A: AssetLedger, B: AssetLedger> Pool<A, B> {
    /// Sells `amount_in` of the input asset for the output asset, both
    /// chosen by `direction`.  Returns the amount paid to `caller`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::CustodyCaller`] if `caller` is the pool's custody
    ///   account.
    /// - [`AmmError::InvalidAmount`] if `amount_in` is zero.
    /// - [`AmmError::InvalidReserves`] if either reserve is empty.
    /// - [`AmmError::InsufficientLiquidity`] if the input is too small to
    ///   buy any output.
    /// - [`AmmError::TransferFailed`] if a ledger rejects a movement.
    /// - [`AmmError::Overflow`] if pricing arithmetic overflows.
    pub fn swap(
        &mut self,
        caller: &AccountId,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<Amount, AmmError> {
        self.execute_swap(caller, direction, amount_in, None)
    }

    /// Like [`swap`](Self::swap), but rejects the trade before any
    /// movement if it would pay less than `min_amount_out`.
    ///
    /// # Errors
    ///
    /// As [`swap`](Self::swap), plus [`AmmError::SlippageExceeded`].
    pub fn swap_with_min_out(
        &mut self,
        caller: &AccountId,
        direction: SwapDirection,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<Amount, AmmError> {
        self.execute_swap(caller, direction, amount_in, Some(min_amount_out))
    }

    /// Quotes a trade of `amount_in` in `direction` against the current
    /// reserves.  Pure.
    ///
    /// # Errors
    ///
    /// Same as [`quote`].
    pub fn quote_swap(
        &self,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<Amount, AmmError> {
        let (reserve_in, reserve_out) = self.reserves.oriented(direction);
        quote(amount_in, reserve_in, reserve_out)
    }

    fn execute_swap(
        &mut self,
        caller: &AccountId,
        direction: SwapDirection,
        amount_in: Amount,
        min_amount_out: Option<Amount>,
    ) -> Result<Amount, AmmError> {
        self.ensure_external(caller)?;
        if amount_in.is_zero() {
            return Err(AmmError::InvalidAmount("amount_in must be positive"));
        }

        let amount_out = self.quote_swap(direction, amount_in)?;
        if amount_out.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        if let Some(min_amount_out) = min_amount_out {
            if amount_out < min_amount_out {
                return Err(AmmError::SlippageExceeded {
                    min_amount_out,
                    amount_out,
                });
            }
        }
        debug!(%caller, %direction, %amount_in, %amount_out, "swap priced");

        let pool_account = self.pool_account;
        let (asset_in, asset_out) = self.asset_pair.route(direction);
        self.transact(caller, "swap", |pool| {
            let (ledger_in, ledger_out) = pool.route_ledgers(direction);
            ledger_in
                .transfer_from(&pool_account, caller, &pool_account, amount_in)
                .map_err(|reason| AmmError::TransferFailed {
                    asset: asset_in,
                    reason,
                })?;
            ledger_out
                .transfer(&pool_account, caller, amount_out)
                .map_err(|reason| AmmError::TransferFailed {
                    asset: asset_out,
                    reason,
                })?;
            Ok(())
        })?;

        self.emit(PoolEvent::Swap(SwapRecord {
            trader: *caller,
            asset_in,
            asset_out,
            amount_in,
            amount_out,
        }));
        Ok(amount_out)
    }
}
