//! Property-based tests using `proptest` for pool invariant validation.
//!
//! 1. **Share conservation**: per-account shares always sum to the total.
//! 2. **Invariant growth**: `reserve_a × reserve_b` strictly grows on
//!    every swap.
//! 3. **Round-trip loss**: deposit then withdraw never returns more than
//!    was deposited, and on-ratio loss is bounded by the share granularity.
//! 4. **Swap reversibility**: A→B→A returns at most the original input.
//! 5. **Rollback**: a failing transfer leaves pool and ledgers unchanged.
//! 6. **Reconciliation**: reserves always equal the custody balances.

use proptest::prelude::*;

use super::test_support::*;
use crate::domain::{AccountId, Amount, Reserves, Shares, SwapDirection};
use crate::ledger::AssetLedger;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn carol() -> AccountId {
    AccountId::from_bytes([0xC0; 32])
}

fn accounts() -> [AccountId; 3] {
    [alice(), bob(), carol()]
}

fn funded_pool() -> TestPool {
    make_pool(&accounts(), u128::from(u64::MAX))
}

fn assert_reconciled(pool: &TestPool) -> Result<(), TestCaseError> {
    let expected = Reserves::new(
        pool.ledger_a().balance_of(&custody()),
        pool.ledger_b().balance_of(&custody()),
    );
    prop_assert_eq!(pool.reserves(), expected);
    Ok(())
}

fn shares_sum(pool: &TestPool) -> u128 {
    accounts().iter().map(|a| pool.shares_of(a).get()).sum()
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [1_000, 10_000_000].
fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000u128..=10_000_000u128
}

/// Trade sizes in range [1, 1_000_000].
fn trade_strategy() -> impl Strategy<Value = u128> {
    1u128..=1_000_000u128
}

fn direction_strategy() -> impl Strategy<Value = SwapDirection> {
    prop_oneof![Just(SwapDirection::AToB), Just(SwapDirection::BToA)]
}

#[derive(Debug, Clone)]
enum Action {
    Deposit(usize, u128, u128),
    Withdraw(usize, u128),
    Swap(usize, SwapDirection, u128),
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0usize..3, trade_strategy(), trade_strategy())
            .prop_map(|(who, a, b)| Action::Deposit(who, a, b)),
        (0usize..3, 1u128..=1_000_000u128).prop_map(|(who, s)| Action::Withdraw(who, s)),
        (0usize..3, direction_strategy(), trade_strategy())
            .prop_map(|(who, d, amt)| Action::Swap(who, d, amt)),
    ]
}

// ---------------------------------------------------------------------------
// Property 1 & 6: Share Conservation and Reconciliation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_shares_sum_to_total(
        actions in proptest::collection::vec(action_strategy(), 1..40),
    ) {
        let mut pool = funded_pool();
        let who = accounts();
        for action in actions {
            // Individual operations may be rejected; invariants must hold
            // either way.
            let _ = match action {
                Action::Deposit(i, a, b) => pool
                    .deposit(&who[i], Amount::new(a), Amount::new(b))
                    .map(|_| ()),
                Action::Withdraw(i, s) => pool.withdraw(&who[i], Shares::new(s)).map(|_| ()),
                Action::Swap(i, d, amt) => pool.swap(&who[i], d, Amount::new(amt)).map(|_| ()),
            };
            prop_assert_eq!(shares_sum(&pool), pool.total_shares().get());
            for account in &who {
                prop_assert!(pool.shares_of(account) <= pool.total_shares());
            }
            prop_assert_eq!(pool.total_shares().is_zero(), pool.reserves().is_empty());
            assert_reconciled(&pool)?;
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Invariant Growth
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_swap_strictly_grows_k(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount_in in trade_strategy(),
        direction in direction_strategy(),
    ) {
        let mut pool = seeded_pool(ra, rb);
        let Some(k_before) = pool.reserves().product() else {
            return Ok(());
        };
        let Ok(_) = pool.swap(&bob(), direction, Amount::new(amount_in)) else {
            return Ok(());
        };
        let Some(k_after) = pool.reserves().product() else {
            return Ok(());
        };
        prop_assert!(
            k_after > k_before,
            "k must grow: before={} after={}",
            k_before, k_after
        );
    }
}

// ---------------------------------------------------------------------------
// Property 3: Round-Trip Loss
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_round_trip_never_pays_extra(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        da in trade_strategy(),
        db in trade_strategy(),
    ) {
        let mut pool = seeded_pool(ra, rb);
        let Ok(minted) = pool.deposit(&bob(), Amount::new(da), Amount::new(db)) else {
            return Ok(());
        };
        let Ok((out_a, out_b)) = pool.withdraw(&bob(), minted) else {
            return Err(TestCaseError::fail("withdraw of freshly minted shares failed"));
        };
        prop_assert!(out_a.get() <= da, "returned more A than deposited");
        prop_assert!(out_b.get() <= db, "returned more B than deposited");
    }

    /// On-ratio deposits lose less than `1 + reserve / total_shares` per
    /// asset, which is at most one unit whenever a share is worth no more
    /// than one unit of that asset.
    #[test]
    fn prop_on_ratio_round_trip_loss_is_bounded(
        p in 1u128..=3_000u128,
        q in 1u128..=3_000u128,
        pool_scale in 1u128..=3_000u128,
        deposit_scale in 1u128..=3_000u128,
    ) {
        let (ra, rb) = (p * pool_scale, q * pool_scale);
        let (da, db) = (p * deposit_scale, q * deposit_scale);
        let mut pool = seeded_pool(ra, rb);
        let supply = pool.total_shares().get();

        let Ok(minted) = pool.deposit(&bob(), Amount::new(da), Amount::new(db)) else {
            return Ok(());
        };
        let Ok((out_a, out_b)) = pool.withdraw(&bob(), minted) else {
            return Err(TestCaseError::fail("withdraw of freshly minted shares failed"));
        };
        let loss_a = da - out_a.get();
        let loss_b = db - out_b.get();
        prop_assert!(loss_a.saturating_sub(1) * supply <= ra, "A loss {} too large", loss_a);
        prop_assert!(loss_b.saturating_sub(1) * supply <= rb, "B loss {} too large", loss_b);
        if ra <= supply {
            prop_assert!(loss_a <= 1);
        }
        if rb <= supply {
            prop_assert!(loss_b <= 1);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Swap Reversibility
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_reversibility(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
    ) {
        let swap_in = (ra / 1_000).max(1);
        let mut pool = seeded_pool(ra, rb);

        let Ok(received_b) = pool.swap(&bob(), SwapDirection::AToB, Amount::new(swap_in)) else {
            return Ok(());
        };
        let Ok(final_a) = pool.swap(&bob(), SwapDirection::BToA, received_b) else {
            return Ok(());
        };

        prop_assert!(
            final_a.get() <= swap_in,
            "round-trip should lose value: final={} > original={}",
            final_a, swap_in
        );
    }
}

// ---------------------------------------------------------------------------
// Property 5: Rollback
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_failed_swap_changes_nothing(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount_in in trade_strategy(),
        direction in direction_strategy(),
    ) {
        let mut pool = seeded_pool(ra, rb);
        // Block the payout leg.
        match direction {
            SwapDirection::AToB => pool.ledger_b_mut().freeze(&bob()),
            SwapDirection::BToA => pool.ledger_a_mut().freeze(&bob()),
        }
        let reserves = pool.reserves();
        let bob_a = pool.ledger_a().balance_of(&bob());
        let bob_b = pool.ledger_b().balance_of(&bob());

        prop_assert!(pool.swap(&bob(), direction, Amount::new(amount_in)).is_err());
        prop_assert_eq!(pool.reserves(), reserves);
        prop_assert_eq!(pool.ledger_a().balance_of(&bob()), bob_a);
        prop_assert_eq!(pool.ledger_b().balance_of(&bob()), bob_b);
        assert_reconciled(&pool)?;
    }

    #[test]
    fn prop_failed_withdraw_changes_nothing(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        fraction in 1u128..=100u128,
    ) {
        let mut pool = seeded_pool(ra, rb);
        let total = pool.total_shares();
        let burn = Shares::new((total.get() * fraction / 100).max(1));
        pool.ledger_b_mut().freeze(&alice());

        let (_, preview_b) = match pool.preview_withdraw(burn) {
            Ok(p) => p,
            Err(_) => return Ok(()),
        };
        let result = pool.withdraw(&alice(), burn);
        if preview_b.is_zero() {
            // Nothing to send on the frozen ledger.
            prop_assert!(result.is_ok());
            return Ok(());
        }
        prop_assert!(result.is_err());
        prop_assert_eq!(pool.total_shares(), total);
        prop_assert_eq!(pool.shares_of(&alice()), total);
        assert_reconciled(&pool)?;
    }
}
