//! The two-asset constant-product pool.
//!
//! A [`Pool`] owns its share ledger and reserve counters; the assets
//! themselves live on two [`AssetLedger`]s under the pool's custody
//! account.  Reserves are never accumulated from deltas: after every
//! mutating operation they are re-read from
//! [`balance_of(pool_account)`](AssetLedger::balance_of).
//!
//! # Atomicity
//!
//! Every mutating operation runs inside one transaction spanning both
//! ledgers.  Both are checkpointed before the first movement; on any error
//! both are reverted and the pool's share state is restored, so a failed
//! call leaves reserves, shares, `total_shares` and every ledger balance
//! exactly as before.
//!
//! # Operations
//!
//! | Operation | Module |
//! |-----------|--------|
//! | [`Pool::deposit`], [`Pool::withdraw`] | `liquidity` |
//! | [`Pool::swap`], [`Pool::swap_with_min_out`] | `swap` |
//! | [`SharedPool`] | `shared` |

mod liquidity;
mod shared;
mod swap;

#[cfg(test)]
mod proptest_properties;

pub use shared::SharedPool;

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::config::PoolConfig;
use crate::domain::{AccountId, Amount, AssetPair, PoolEvent, Reserves, Shares, SwapDirection};
use crate::error::AmmError;
use crate::ledger::AssetLedger;
use crate::math::mul_div_floor;
use crate::traits::{LiquidityPool, SwapPool};

/// Fixed-point scale of [`Pool::price`].
pub const PRICE_SCALE: u128 = 1_000;

/// A constant-product pool over the assets tracked by ledgers `A` and `B`.
///
/// Created empty from a [`PoolConfig`] and the two ledgers.  The ledger
/// for asset A must track the pair's first asset and the ledger for B the
/// second.
///
/// # Example
///
/// ```rust
/// use pair_amm::config::PoolConfig;
/// use pair_amm::domain::{AccountId, Amount, AssetId, AssetPair, Shares, SwapDirection};
/// use pair_amm::ledger::{AssetLedger, InMemoryLedger};
/// use pair_amm::pool::Pool;
///
/// let asset_a = AssetId::from_bytes([1u8; 32]);
/// let asset_b = AssetId::from_bytes([2u8; 32]);
/// let custody = AccountId::from_bytes([0x50; 32]);
/// let alice = AccountId::from_bytes([0xA1; 32]);
///
/// let mut ledger_a = InMemoryLedger::new(asset_a);
/// let mut ledger_b = InMemoryLedger::new(asset_b);
/// ledger_a.mint(&alice, Amount::new(10_000)).expect("mint");
/// ledger_b.mint(&alice, Amount::new(10_000)).expect("mint");
/// ledger_a.approve(&alice, &custody, Amount::MAX).expect("approve");
/// ledger_b.approve(&alice, &custody, Amount::MAX).expect("approve");
///
/// let pair = AssetPair::new(asset_a, asset_b).expect("distinct");
/// let config = PoolConfig::new(pair, custody).expect("valid config");
/// let mut pool = Pool::new(config, ledger_a, ledger_b).expect("pool created");
///
/// let minted = pool.deposit(&alice, Amount::new(1_000), Amount::new(1_000)).expect("deposit");
/// assert_eq!(minted, Shares::new(1_000));
///
/// let out = pool.swap(&alice, SwapDirection::AToB, Amount::new(100)).expect("swap");
/// assert_eq!(out, Amount::new(90));
/// ```
#[derive(Debug)]
pub struct Pool<A: AssetLedger, B: AssetLedger> {
    asset_pair: AssetPair,
    pool_account: AccountId,
    ledger_a: A,
    ledger_b: B,
    reserves: Reserves,
    total_shares: Shares,
    shares: HashMap<AccountId, Shares>,
    events: Vec<PoolEvent>,
}

impl<A: AssetLedger, B: AssetLedger> Pool<A, B> {
    /// Creates an empty pool.
    ///
    /// # Errors
    ///
    /// - Propagates any error from [`PoolConfig::validate`].
    /// - Returns [`AmmError::InvalidAsset`] if a ledger tracks a different
    ///   asset than its side of the configured pair.
    pub fn new(config: PoolConfig, ledger_a: A, ledger_b: B) -> Result<Self, AmmError> {
        config.validate()?;
        let asset_pair = config.asset_pair();
        if ledger_a.asset() != asset_pair.asset_a() {
            return Err(AmmError::InvalidAsset(
                "ledger A does not track the pair's first asset",
            ));
        }
        if ledger_b.asset() != asset_pair.asset_b() {
            return Err(AmmError::InvalidAsset(
                "ledger B does not track the pair's second asset",
            ));
        }

        debug!(
            asset_a = %asset_pair.asset_a(),
            asset_b = %asset_pair.asset_b(),
            pool_account = %config.pool_account(),
            "pool created"
        );

        Ok(Self {
            asset_pair,
            pool_account: config.pool_account(),
            ledger_a,
            ledger_b,
            reserves: Reserves::default(),
            total_shares: Shares::ZERO,
            shares: HashMap::new(),
            events: Vec::new(),
        })
    }

    /// Returns the reserves as of the last reconciliation.
    pub const fn reserves(&self) -> Reserves {
        self.reserves
    }

    /// Returns the price of asset A in units of asset B, scaled by
    /// [`PRICE_SCALE`]: `floor(reserve_b × 1000 / reserve_a)`.
    ///
    /// Returns `0` if either reserve is empty.  Exact unless `reserve_a`
    /// exceeds `u128::MAX / 1000`, where the fractional part is
    /// approximated; the result saturates at `u128::MAX`.
    #[must_use]
    pub fn price(&self) -> u128 {
        let Reserves { a, b } = self.reserves;
        if a.is_zero() || b.is_zero() {
            return 0;
        }
        let (ra, rb) = (a.get(), b.get());
        let whole = (rb / ra).saturating_mul(PRICE_SCALE);
        let remainder = rb % ra;
        let fraction = match mul_div_floor(
            Amount::new(remainder),
            Amount::new(PRICE_SCALE),
            Amount::new(ra),
        ) {
            Ok(f) => f.get(),
            Err(_) => (remainder / (ra / PRICE_SCALE)).min(PRICE_SCALE - 1),
        };
        whole.saturating_add(fraction)
    }

    /// Returns the total outstanding shares.
    pub const fn total_shares(&self) -> Shares {
        self.total_shares
    }

    /// Returns the shares held by `account`.
    pub fn shares_of(&self, account: &AccountId) -> Shares {
        self.shares.get(account).copied().unwrap_or(Shares::ZERO)
    }

    /// Returns the configured asset pair.
    #[must_use]
    pub const fn asset_pair(&self) -> AssetPair {
        self.asset_pair
    }

    /// Returns the pool's custody account.
    #[must_use]
    pub const fn pool_account(&self) -> AccountId {
        self.pool_account
    }

    /// Returns the ledger of asset A.
    pub const fn ledger_a(&self) -> &A {
        &self.ledger_a
    }

    /// Returns the ledger of asset B.
    pub const fn ledger_b(&self) -> &B {
        &self.ledger_b
    }

    /// Returns the ledger of asset A mutably.
    ///
    /// Movements made through this handle bypass the pool; a credit to the
    /// custody account becomes visible on the next reconciliation.
    pub fn ledger_a_mut(&mut self) -> &mut A {
        &mut self.ledger_a
    }

    /// Returns the ledger of asset B mutably.
    pub fn ledger_b_mut(&mut self) -> &mut B {
        &mut self.ledger_b
    }

    /// Returns every record emitted since the last [`drain_events`](Self::drain_events).
    #[must_use]
    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }

    /// Removes and returns the emitted records.
    pub fn drain_events(&mut self) -> Vec<PoolEvent> {
        core::mem::take(&mut self.events)
    }

    /// Re-reads both reserves from the ledgers and returns them.
    ///
    /// Nothing else changes.  Assets credited to the custody account out
    /// of band become part of the reserves here.
    pub fn sync(&mut self) -> Reserves {
        self.reconcile();
        self.reserves
    }

    /// Rejects the custody account as a counterparty.  Its movements to
    /// itself are no-ops, so it would mint or trade against nothing.
    fn ensure_external(&self, caller: &AccountId) -> Result<(), AmmError> {
        if *caller == self.pool_account {
            return Err(AmmError::CustodyCaller(*caller));
        }
        Ok(())
    }

    fn reconcile(&mut self) {
        let reserves = Reserves::new(
            self.ledger_a.balance_of(&self.pool_account),
            self.ledger_b.balance_of(&self.pool_account),
        );
        if reserves != self.reserves {
            debug!(from = %self.reserves, to = %reserves, "reserves reconciled");
        }
        self.reserves = reserves;
    }

    fn set_shares(&mut self, account: &AccountId, value: Shares) {
        if value.is_zero() {
            self.shares.remove(account);
        } else {
            self.shares.insert(*account, value);
        }
    }

    fn emit(&mut self, event: PoolEvent) {
        info!(%event, "pool event");
        self.events.push(event);
    }

    /// Returns `(ledger_in, ledger_out)` for a trade in `direction`.
    fn route_ledgers(
        &mut self,
        direction: SwapDirection,
    ) -> (&mut dyn AssetLedger, &mut dyn AssetLedger) {
        match direction {
            SwapDirection::AToB => (&mut self.ledger_a, &mut self.ledger_b),
            SwapDirection::BToA => (&mut self.ledger_b, &mut self.ledger_a),
        }
    }

    /// Runs `body` as one all-or-nothing transaction on behalf of `caller`.
    ///
    /// On success both ledgers are committed and reserves reconciled.  On
    /// failure both ledgers are reverted and `total_shares` and `caller`'s
    /// holding are restored.  `body` must not touch any other account's
    /// shares.
    fn transact<T>(
        &mut self,
        caller: &AccountId,
        operation: &'static str,
        body: impl FnOnce(&mut Self) -> Result<T, AmmError>,
    ) -> Result<T, AmmError> {
        let saved_total = self.total_shares;
        let saved_holding = self.shares_of(caller);
        let checkpoint_a = self.ledger_a.checkpoint();
        let checkpoint_b = self.ledger_b.checkpoint();

        match body(self) {
            Ok(value) => {
                self.ledger_b.commit(checkpoint_b);
                self.ledger_a.commit(checkpoint_a);
                self.reconcile();
                Ok(value)
            }
            Err(err) => {
                self.ledger_b.revert(checkpoint_b);
                self.ledger_a.revert(checkpoint_a);
                self.total_shares = saved_total;
                self.set_shares(caller, saved_holding);
                warn!(operation, %caller, error = %err, "operation rolled back");
                Err(err)
            }
        }
    }
}

impl<A: AssetLedger, B: AssetLedger> SwapPool for Pool<A, B> {
    fn swap(
        &mut self,
        caller: &AccountId,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<Amount, AmmError> {
        Self::swap(self, caller, direction, amount_in)
    }

    fn quote_swap(&self, direction: SwapDirection, amount_in: Amount) -> Result<Amount, AmmError> {
        Self::quote_swap(self, direction, amount_in)
    }

    fn reserves(&self) -> Reserves {
        self.reserves
    }

    fn price(&self) -> u128 {
        Self::price(self)
    }

    fn asset_pair(&self) -> AssetPair {
        self.asset_pair
    }
}

impl<A: AssetLedger, B: AssetLedger> LiquidityPool for Pool<A, B> {
    fn deposit(
        &mut self,
        caller: &AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Shares, AmmError> {
        Self::deposit(self, caller, amount_a, amount_b)
    }

    fn withdraw(
        &mut self,
        caller: &AccountId,
        share_amount: Shares,
    ) -> Result<(Amount, Amount), AmmError> {
        Self::withdraw(self, caller, share_amount)
    }

    fn total_shares(&self) -> Shares {
        self.total_shares
    }

    fn shares_of(&self, account: &AccountId) -> Shares {
        Self::shares_of(self, account)
    }
}


#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::domain::AssetId;
    use crate::ledger::InMemoryLedger;

    fn config() -> PoolConfig {
        let Ok(pair) = AssetPair::new(asset_a(), asset_b()) else {
            panic!("expected valid pair");
        };
        let Ok(cfg) = PoolConfig::new(pair, custody()) else {
            panic!("expected valid config");
        };
        cfg
    }

    // -- construction ---------------------------------------------------------

    #[test]
    fn new_pool_is_empty() {
        let pool = make_pool(&[], 0);
        assert!(pool.reserves().is_empty());
        assert_eq!(pool.total_shares(), Shares::ZERO);
        assert!(pool.events().is_empty());
        assert_eq!(pool.pool_account(), custody());
    }

    #[test]
    fn new_rejects_swapped_ledgers() {
        let result = Pool::new(
            config(),
            InMemoryLedger::new(asset_b()),
            InMemoryLedger::new(asset_a()),
        );
        assert!(matches!(result, Err(AmmError::InvalidAsset(_))));
    }

    #[test]
    fn new_rejects_foreign_ledger() {
        let result = Pool::new(
            config(),
            InMemoryLedger::new(asset_a()),
            InMemoryLedger::new(AssetId::from_bytes([9u8; 32])),
        );
        assert!(matches!(result, Err(AmmError::InvalidAsset(_))));
    }

    // -- price ----------------------------------------------------------------

    #[test]
    fn price_of_empty_pool_is_zero() {
        assert_eq!(make_pool(&[], 0).price(), 0);
    }

    #[test]
    fn price_is_scaled_ratio() {
        let pool = seeded_pool(1_000, 2_500);
        assert_eq!(pool.price(), 2_500);
        let pool = seeded_pool(3_000, 1_000);
        // floor(1000 * 1000 / 3000) = 333
        assert_eq!(pool.price(), 333);
    }

    #[test]
    fn price_does_not_overflow_on_large_reserve_b() {
        let mut pool = seeded_pool(1_000, 1_000);
        let big = Amount::new(u128::MAX / 10);
        let Ok(()) = pool.ledger_b_mut().mint(&custody(), big) else {
            panic!("mint");
        };
        pool.sync();
        // floor(rb * 1000 / 1000) == rb
        assert_eq!(pool.price(), pool.reserves().b.get());
    }

    // -- reconciliation -------------------------------------------------------

    #[test]
    fn sync_picks_up_donation() {
        let mut pool = seeded_pool(1_000, 1_000);
        let Ok(()) = pool
            .ledger_a_mut()
            .transfer(&bob(), &custody(), Amount::new(500))
        else {
            panic!("donation");
        };
        assert_eq!(pool.reserves().a, Amount::new(1_000));
        let synced = pool.sync();
        assert_eq!(synced.a, Amount::new(1_500));
        assert_eq!(pool.total_shares(), Shares::new(1_000));
    }

    #[test]
    fn drain_events_empties_trail() {
        let mut pool = seeded_pool(100, 100);
        let drained = pool.drain_events();
        assert_eq!(drained.len(), 1);
        assert!(pool.events().is_empty());
    }

    // -- traits ---------------------------------------------------------------

    fn total_via_trait(pool: &impl LiquidityPool) -> Shares {
        pool.total_shares()
    }

    #[test]
    fn trait_surface_matches_inherent() {
        let pool = seeded_pool(400, 900);
        assert_eq!(total_via_trait(&pool), Shares::new(600));
        assert_eq!(SwapPool::price(&pool), pool.price());
        assert_eq!(SwapPool::reserves(&pool), pool.reserves());
    }
}
