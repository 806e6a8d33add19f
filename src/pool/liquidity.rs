//! Deposits and withdrawals.
//!
//! # Share Minting
//!
//! ```text
//! first deposit:  minted = ⌊√(amount_a × amount_b)⌋
//! otherwise:      minted = min(⌊amount_a × S / reserve_a⌋, ⌊amount_b × S / reserve_b⌋)
//! ```
//!
//! The second form mints by the scarcer side.  An off-ratio deposit's
//! excess of the other asset stays in the pool without shares, raising
//! the value of every existing share.
//!
//! # Payouts
//!
//! ```text
//! amount_x = ⌊shares × reserve_x / S⌋
//! ```
//!
//! Both formulas floor, so rounding never favours the caller.

use tracing::debug;

use super::Pool;
use crate::domain::{AccountId, Amount, DepositRecord, PoolEvent, Shares, WithdrawalRecord};
use crate::error::AmmError;
use crate::ledger::AssetLedger;
use crate::math::{isqrt, mul_div_floor, CheckedArithmetic};

impl<A: AssetLedger, B: AssetLedger> Pool<A, B> {
    /// Deposits `amount_a` of asset A and `amount_b` of asset B from
    /// `caller` and credits the caller with newly minted shares.
    ///
    /// Both amounts are pulled with `transfer_from`, so `caller` must have
    /// approved the pool's custody account on both ledgers.
    ///
    /// # Errors
    ///
    /// - [`AmmError::CustodyCaller`] if `caller` is the pool's custody
    ///   account.
    /// - [`AmmError::InvalidAmount`] if either amount is zero.
    /// - [`AmmError::InsufficientLiquidity`] if the deposit would mint no
    ///   shares.
    /// - [`AmmError::TransferFailed`] if a ledger rejects a movement.
    /// - [`AmmError::Overflow`] if share or product arithmetic overflows.
    ///
    /// Every error other than `TransferFailed` is raised before any
    /// movement; `TransferFailed` reverts whatever moved.
    pub fn deposit(
        &mut self,
        caller: &AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Shares, AmmError> {
        self.ensure_external(caller)?;
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(AmmError::InvalidAmount("deposit amounts must be positive"));
        }

        let minted = self.shares_for_deposit(amount_a, amount_b)?;
        if minted.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        debug!(%caller, %amount_a, %amount_b, %minted, "deposit priced");

        let pool_account = self.pool_account;
        let (asset_a, asset_b) = (self.asset_pair.asset_a(), self.asset_pair.asset_b());
        self.transact(caller, "deposit", |pool| {
            pool.ledger_a
                .transfer_from(&pool_account, caller, &pool_account, amount_a)
                .map_err(|reason| AmmError::TransferFailed {
                    asset: asset_a,
                    reason,
                })?;
            pool.ledger_b
                .transfer_from(&pool_account, caller, &pool_account, amount_b)
                .map_err(|reason| AmmError::TransferFailed {
                    asset: asset_b,
                    reason,
                })?;

            pool.total_shares = pool.total_shares.safe_add(&minted)?;
            let holding = pool.shares_of(caller).safe_add(&minted)?;
            pool.set_shares(caller, holding);
            Ok(())
        })?;

        self.emit(PoolEvent::Deposit(DepositRecord {
            provider: *caller,
            amount_a,
            amount_b,
            shares_minted: minted,
        }));
        Ok(minted)
    }

    /// Burns `share_amount` of `caller`'s shares and pays out the
    /// proportional cut of both reserves.
    ///
    /// Returns `(amount_a, amount_b)` paid.  A payout that floors to zero
    /// is not sent.
    ///
    /// # Errors
    ///
    /// - [`AmmError::CustodyCaller`] if `caller` is the pool's custody
    ///   account.
    /// - [`AmmError::InvalidAmount`] if `share_amount` is zero.
    /// - [`AmmError::InsufficientShares`] if `caller` holds fewer shares.
    /// - [`AmmError::TransferFailed`] if a ledger rejects a payout; the
    ///   burn and any earlier payout are reverted.
    pub fn withdraw(
        &mut self,
        caller: &AccountId,
        share_amount: Shares,
    ) -> Result<(Amount, Amount), AmmError> {
        self.ensure_external(caller)?;
        if share_amount.is_zero() {
            return Err(AmmError::InvalidAmount("share_amount must be positive"));
        }
        let held = self.shares_of(caller);
        if held < share_amount {
            return Err(AmmError::InsufficientShares {
                requested: share_amount,
                available: held,
            });
        }

        let (amount_a, amount_b) = self.preview_withdraw(share_amount)?;
        debug!(%caller, %share_amount, %amount_a, %amount_b, "withdrawal priced");

        let pool_account = self.pool_account;
        let (asset_a, asset_b) = (self.asset_pair.asset_a(), self.asset_pair.asset_b());
        self.transact(caller, "withdraw", |pool| {
            // Burn before paying out.
            pool.total_shares = pool.total_shares.safe_sub(&share_amount)?;
            let holding = pool.shares_of(caller).safe_sub(&share_amount)?;
            pool.set_shares(caller, holding);

            if !amount_a.is_zero() {
                pool.ledger_a
                    .transfer(&pool_account, caller, amount_a)
                    .map_err(|reason| AmmError::TransferFailed {
                        asset: asset_a,
                        reason,
                    })?;
            }
            if !amount_b.is_zero() {
                pool.ledger_b
                    .transfer(&pool_account, caller, amount_b)
                    .map_err(|reason| AmmError::TransferFailed {
                        asset: asset_b,
                        reason,
                    })?;
            }
            Ok(())
        })?;

        self.emit(PoolEvent::Withdrawal(WithdrawalRecord {
            provider: *caller,
            amount_a,
            amount_b,
            shares_burned: share_amount,
        }));
        Ok((amount_a, amount_b))
    }

    /// Returns the `(amount_a, amount_b)` that burning `share_amount`
    /// would pay at the current reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if `share_amount` is zero.
    /// - [`AmmError::InsufficientShares`] if it exceeds the total supply.
    /// - [`AmmError::Overflow`] if `share_amount × reserve` overflows.
    pub fn preview_withdraw(&self, share_amount: Shares) -> Result<(Amount, Amount), AmmError> {
        if share_amount.is_zero() {
            return Err(AmmError::InvalidAmount("share_amount must be positive"));
        }
        if share_amount > self.total_shares {
            return Err(AmmError::InsufficientShares {
                requested: share_amount,
                available: self.total_shares,
            });
        }
        let total = self.total_shares.as_amount();
        let amount_a = mul_div_floor(share_amount.as_amount(), self.reserves.a, total)?;
        let amount_b = mul_div_floor(share_amount.as_amount(), self.reserves.b, total)?;
        Ok((amount_a, amount_b))
    }

    /// Shares a deposit of `(amount_a, amount_b)` would mint at the stored
    /// reserves.  Pure.
    fn shares_for_deposit(&self, amount_a: Amount, amount_b: Amount) -> Result<Shares, AmmError> {
        if self.total_shares.is_zero() {
            let product = amount_a.safe_mul(&amount_b)?;
            return Ok(Shares::new(isqrt(product.get())));
        }

        let total = self.total_shares.as_amount();
        let by_a = mul_div_floor(amount_a, total, self.reserves.a)?;
        let by_b = mul_div_floor(amount_b, total, self.reserves.b)?;
        Ok(Shares::from_amount(by_a.min(by_b)))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::Reserves;

    fn shares_sum(pool: &TestPool, accounts: &[AccountId]) -> u128 {
        accounts.iter().map(|a| pool.shares_of(a).get()).sum()
    }

    // -- deposit --------------------------------------------------------------

    #[test]
    fn first_deposit_mints_geometric_mean() {
        let pool = seeded_pool(100, 100);
        assert_eq!(pool.total_shares(), Shares::new(100));
        assert_eq!(pool.shares_of(&alice()), Shares::new(100));
        assert_eq!(
            pool.reserves(),
            Reserves::new(Amount::new(100), Amount::new(100))
        );
    }

    #[test]
    fn first_deposit_floors_sqrt() {
        // sqrt(2 * 5) = 3.16
        let pool = seeded_pool(2, 5);
        assert_eq!(pool.total_shares(), Shares::new(3));
    }

    #[test]
    fn proportional_deposit() {
        let mut pool = seeded_pool(100, 100);
        let Ok(minted) = pool.deposit(&bob(), Amount::new(50), Amount::new(50)) else {
            panic!("expected Ok");
        };
        assert_eq!(minted, Shares::new(50));
        assert_eq!(pool.total_shares(), Shares::new(150));
        assert_eq!(
            pool.reserves(),
            Reserves::new(Amount::new(150), Amount::new(150))
        );
        assert_eq!(shares_sum(&pool, &[alice(), bob()]), 150);
    }

    #[test]
    fn off_ratio_deposit_mints_by_scarcer_side() {
        let mut pool = seeded_pool(100, 100);
        let Ok(minted) = pool.deposit(&bob(), Amount::new(50), Amount::new(80)) else {
            panic!("expected Ok");
        };
        assert_eq!(minted, Shares::new(50));
        // The 30 excess B is absorbed.
        assert_eq!(
            pool.reserves(),
            Reserves::new(Amount::new(150), Amount::new(180))
        );
    }

    #[test]
    fn zero_amount_rejected_before_movement() {
        let mut pool = seeded_pool(100, 100);
        let before = pool.ledger_a().balance_of(&bob());
        let result = pool.deposit(&bob(), Amount::ZERO, Amount::new(10));
        assert!(matches!(result, Err(AmmError::InvalidAmount(_))));
        let result = pool.deposit(&bob(), Amount::new(10), Amount::ZERO);
        assert!(matches!(result, Err(AmmError::InvalidAmount(_))));
        assert_eq!(pool.ledger_a().balance_of(&bob()), before);
    }

    #[test]
    fn dust_deposit_mints_nothing() {
        // 316 shares over (10_000, 10): one unit of A buys 0.03 shares.
        let mut pool = seeded_pool(10_000, 10);
        let result = pool.deposit(&bob(), Amount::new(1), Amount::new(1));
        assert_eq!(result, Err(AmmError::InsufficientLiquidity));
        assert!(pool.shares_of(&bob()).is_zero());
        assert_eq!(pool.ledger_a().balance_of(&custody()), Amount::new(10_000));
    }

    #[test]
    fn deposit_without_approval_rolls_back() {
        let mut pool = seeded_pool(100, 100);
        let Ok(()) = pool.ledger_b_mut().approve(&bob(), &custody(), Amount::ZERO) else {
            panic!("approve");
        };
        let bob_a = pool.ledger_a().balance_of(&bob());

        let result = pool.deposit(&bob(), Amount::new(50), Amount::new(50));
        let Err(AmmError::TransferFailed { asset, .. }) = result else {
            panic!("expected TransferFailed");
        };
        assert_eq!(asset, asset_b());
        // The A leg had already moved and must be reverted.
        assert_eq!(pool.ledger_a().balance_of(&bob()), bob_a);
        assert_eq!(pool.ledger_a().balance_of(&custody()), Amount::new(100));
        assert_eq!(pool.total_shares(), Shares::new(100));
        assert!(pool.shares_of(&bob()).is_zero());
        assert_eq!(pool.events().len(), 1);
    }

    #[test]
    fn deposit_emits_record() {
        let pool = seeded_pool(100, 400);
        let Some(PoolEvent::Deposit(record)) = pool.events().last() else {
            panic!("expected deposit record");
        };
        assert_eq!(record.provider, alice());
        assert_eq!(record.amount_b, Amount::new(400));
        assert_eq!(record.shares_minted, Shares::new(200));
    }

    // -- withdraw -------------------------------------------------------------

    #[test]
    fn sole_depositor_withdraws_everything() {
        let mut pool = seeded_pool(100, 100);
        let Ok(out) = pool.withdraw(&alice(), Shares::new(100)) else {
            panic!("expected Ok");
        };
        assert_eq!(out, (Amount::new(100), Amount::new(100)));
        assert!(pool.reserves().is_empty());
        assert!(pool.total_shares().is_zero());
        assert!(pool.shares_of(&alice()).is_zero());
    }

    #[test]
    fn partial_withdraw_is_proportional() {
        let mut pool = seeded_pool(300, 1_200);
        // 600 shares total
        let Ok(out) = pool.withdraw(&alice(), Shares::new(200)) else {
            panic!("expected Ok");
        };
        assert_eq!(out, (Amount::new(100), Amount::new(400)));
        assert_eq!(pool.total_shares(), Shares::new(400));
    }

    #[test]
    fn custody_cannot_deposit_into_its_own_pool() {
        let mut pool = seeded_pool(1_000, 1_000);
        approve_custody_for_itself(&mut pool);
        assert_eq!(
            pool.deposit(&custody(), Amount::new(1_000), Amount::new(1_000)),
            Err(AmmError::CustodyCaller(custody()))
        );
        assert_eq!(pool.total_shares(), Shares::new(1_000));
        assert!(pool.shares_of(&custody()).is_zero());

        // Alice still owns the whole pool.
        let Ok(out) = pool.withdraw(&alice(), Shares::new(1_000)) else {
            panic!("expected Ok");
        };
        assert_eq!(out, (Amount::new(1_000), Amount::new(1_000)));
    }

    #[test]
    fn custody_cannot_withdraw() {
        let mut pool = seeded_pool(1_000, 1_000);
        assert_eq!(
            pool.withdraw(&custody(), Shares::new(1)),
            Err(AmmError::CustodyCaller(custody()))
        );
        assert_eq!(
            pool.reserves(),
            Reserves::new(Amount::new(1_000), Amount::new(1_000))
        );
    }

    #[test]
    fn over_withdraw_rejected() {
        let mut pool = seeded_pool(100, 100);
        let result = pool.withdraw(&alice(), Shares::new(101));
        assert_eq!(
            result,
            Err(AmmError::InsufficientShares {
                requested: Shares::new(101),
                available: Shares::new(100),
            })
        );
        assert_eq!(pool.total_shares(), Shares::new(100));
        assert_eq!(
            pool.reserves(),
            Reserves::new(Amount::new(100), Amount::new(100))
        );
    }

    #[test]
    fn zero_withdraw_rejected() {
        let mut pool = seeded_pool(100, 100);
        assert!(matches!(
            pool.withdraw(&alice(), Shares::ZERO),
            Err(AmmError::InvalidAmount(_))
        ));
    }

    #[test]
    fn withdraw_to_frozen_account_rolls_back() {
        let mut pool = seeded_pool(100, 100);
        pool.ledger_b_mut().freeze(&alice());
        let result = pool.withdraw(&alice(), Shares::new(40));
        assert!(matches!(
            result,
            Err(AmmError::TransferFailed {
                reason: crate::error::LedgerError::AccountFrozen(_),
                ..
            })
        ));
        assert_eq!(pool.shares_of(&alice()), Shares::new(100));
        assert_eq!(pool.total_shares(), Shares::new(100));
        assert_eq!(pool.ledger_a().balance_of(&custody()), Amount::new(100));
        assert_eq!(
            pool.reserves(),
            Reserves::new(Amount::new(100), Amount::new(100))
        );
    }

    #[test]
    fn zero_payout_not_sent() {
        let mut pool = seeded_pool(10_000, 1);
        // 100 shares; one share is worth 100 A and 0 B.
        pool.ledger_b_mut().freeze(&alice());
        let Ok(out) = pool.withdraw(&alice(), Shares::new(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(out, (Amount::new(100), Amount::ZERO));
    }

    #[test]
    fn preview_matches_withdraw() {
        let mut pool = seeded_pool(777, 333);
        let Ok(preview) = pool.preview_withdraw(Shares::new(100)) else {
            panic!("expected Ok");
        };
        let Ok(paid) = pool.withdraw(&alice(), Shares::new(100)) else {
            panic!("expected Ok");
        };
        assert_eq!(preview, paid);
    }

    #[test]
    fn preview_beyond_supply_rejected() {
        let pool = seeded_pool(100, 100);
        assert!(matches!(
            pool.preview_withdraw(Shares::new(101)),
            Err(AmmError::InsufficientShares { .. })
        ));
    }
}
