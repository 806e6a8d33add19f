//! Thread-safe handle to a pool.

use std::sync::Arc;

use parking_lot::Mutex;

use super::Pool;
use crate::domain::{AccountId, Amount, PoolEvent, Reserves, Shares, SwapDirection};
use crate::error::AmmError;
use crate::ledger::AssetLedger;

/// A cloneable, thread-safe handle to one [`Pool`].
///
/// Every operation holds the pool's mutex for its whole duration, so
/// operations on one pool are serialized and each observes the reserves
/// left by the previous one.  Handles to different pools never contend.
///
/// # Example
///
/// ```rust
/// use pair_amm::config::PoolConfig;
/// use pair_amm::domain::{AccountId, AssetId, AssetPair};
/// use pair_amm::ledger::InMemoryLedger;
/// use pair_amm::pool::{Pool, SharedPool};
///
/// let asset_a = AssetId::from_bytes([1u8; 32]);
/// let asset_b = AssetId::from_bytes([2u8; 32]);
/// let pair = AssetPair::new(asset_a, asset_b).expect("distinct");
/// let config = PoolConfig::new(pair, AccountId::from_bytes([0x50; 32])).expect("valid");
/// let pool = Pool::new(config, InMemoryLedger::new(asset_a), InMemoryLedger::new(asset_b))
///     .expect("pool created");
///
/// let shared = SharedPool::new(pool);
/// let handle = shared.clone();
/// std::thread::spawn(move || handle.price()).join().expect("thread");
/// assert!(shared.reserves().is_empty());
/// ```
pub struct SharedPool<A: AssetLedger, B: AssetLedger> {
    inner: Arc<Mutex<Pool<A, B>>>,
}

impl<A: AssetLedger, B: AssetLedger> Clone for SharedPool<A, B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: AssetLedger, B: AssetLedger> core::fmt::Debug for SharedPool<A, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let pool = self.inner.lock();
        f.debug_struct("SharedPool")
            .field("reserves", &pool.reserves())
            .field("total_shares", &pool.total_shares())
            .finish_non_exhaustive()
    }
}

impl<A: AssetLedger, B: AssetLedger> SharedPool<A, B> {
    /// Wraps `pool` in a new handle.
    pub fn new(pool: Pool<A, B>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    /// Runs `f` with exclusive access to the pool.
    ///
    /// Use this for several reads that must observe one consistent state,
    /// or to reach the ledgers.
    ///
    /// The lock is not reentrant: calling any `SharedPool` method on this
    /// pool from inside `f`, through this handle or a clone, deadlocks.
    /// Use the `&mut Pool` passed to `f` instead.
    pub fn with<R>(&self, f: impl FnOnce(&mut Pool<A, B>) -> R) -> R {
        let mut pool = self.inner.lock();
        f(&mut pool)
    }

    /// See [`Pool::deposit`].
    ///
    /// # Errors
    ///
    /// Same as [`Pool::deposit`].
    pub fn deposit(
        &self,
        caller: &AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Shares, AmmError> {
        self.inner.lock().deposit(caller, amount_a, amount_b)
    }

    /// See [`Pool::withdraw`].
    ///
    /// # Errors
    ///
    /// Same as [`Pool::withdraw`].
    pub fn withdraw(
        &self,
        caller: &AccountId,
        share_amount: Shares,
    ) -> Result<(Amount, Amount), AmmError> {
        self.inner.lock().withdraw(caller, share_amount)
    }

    /// See [`Pool::swap`].
    ///
    /// # Errors
    ///
    /// Same as [`Pool::swap`].
    pub fn swap(
        &self,
        caller: &AccountId,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<Amount, AmmError> {
        self.inner.lock().swap(caller, direction, amount_in)
    }

    /// See [`Pool::swap_with_min_out`].
    ///
    /// # Errors
    ///
    /// Same as [`Pool::swap_with_min_out`].
    pub fn swap_with_min_out(
        &self,
        caller: &AccountId,
        direction: SwapDirection,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<Amount, AmmError> {
        self.inner
            .lock()
            .swap_with_min_out(caller, direction, amount_in, min_amount_out)
    }

    /// See [`Pool::quote_swap`].
    ///
    /// # Errors
    ///
    /// Same as [`Pool::quote_swap`].
    pub fn quote_swap(
        &self,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<Amount, AmmError> {
        self.inner.lock().quote_swap(direction, amount_in)
    }

    /// See [`Pool::reserves`].
    pub fn reserves(&self) -> Reserves {
        self.inner.lock().reserves()
    }

    /// See [`Pool::price`].
    #[must_use]
    pub fn price(&self) -> u128 {
        self.inner.lock().price()
    }

    /// See [`Pool::total_shares`].
    pub fn total_shares(&self) -> Shares {
        self.inner.lock().total_shares()
    }

    /// See [`Pool::shares_of`].
    pub fn shares_of(&self, account: &AccountId) -> Shares {
        self.inner.lock().shares_of(account)
    }

    /// See [`Pool::sync`].
    pub fn sync(&self) -> Reserves {
        self.inner.lock().sync()
    }

    /// See [`Pool::drain_events`].
    pub fn drain_events(&self) -> Vec<PoolEvent> {
        self.inner.lock().drain_events()
    }
}
