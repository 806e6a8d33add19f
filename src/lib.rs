//! # Pair AMM
//!
//! A two-asset constant-product automated market maker with a fixed 0.3%
//! fee.  Liquidity providers deposit both assets and receive proportional
//! ownership shares; traders exchange one asset for the other along the
//! `reserve_a × reserve_b = k` curve.
//!
//! The pool keeps no balances of its own.  Assets live on two external
//! [`AssetLedger`](ledger::AssetLedger)s under the pool's custody account,
//! and reserves are reconciled from those ledgers after every operation.
//! Each operation is atomic across both ledgers: it completes in full or
//! leaves no trace.
//!
//! ## Create a pool, deposit, and swap
//!
//! ```rust
//! use pair_amm::config::PoolConfig;
//! use pair_amm::domain::{AccountId, Amount, AssetId, AssetPair, Shares, SwapDirection};
//! use pair_amm::ledger::{AssetLedger, InMemoryLedger};
//! use pair_amm::pool::Pool;
//!
//! // 1. Two assets, a custody account and a provider
//! let usd = AssetId::from_bytes([1u8; 32]);
//! let eur = AssetId::from_bytes([2u8; 32]);
//! let custody = AccountId::from_bytes([0x50; 32]);
//! let alice = AccountId::from_bytes([0xA1; 32]);
//!
//! // 2. Fund the provider and approve the custody account
//! let mut usd_ledger = InMemoryLedger::new(usd);
//! let mut eur_ledger = InMemoryLedger::new(eur);
//! usd_ledger.mint(&alice, Amount::new(5_000)).expect("mint");
//! eur_ledger.mint(&alice, Amount::new(5_000)).expect("mint");
//! usd_ledger.approve(&alice, &custody, Amount::MAX).expect("approve");
//! eur_ledger.approve(&alice, &custody, Amount::MAX).expect("approve");
//!
//! // 3. Build the pool
//! let pair = AssetPair::new(usd, eur).expect("distinct assets");
//! let config = PoolConfig::new(pair, custody).expect("valid config");
//! let mut pool = Pool::new(config, usd_ledger, eur_ledger).expect("pool created");
//!
//! // 4. Provide liquidity, then trade against it
//! let minted = pool.deposit(&alice, Amount::new(1_000), Amount::new(1_000)).expect("deposit");
//! assert_eq!(minted, Shares::new(1_000));
//!
//! let out = pool.swap(&alice, SwapDirection::AToB, Amount::new(100)).expect("swap");
//! assert_eq!(out, Amount::new(90));
//! assert_eq!(pool.price(), 827); // floor(910 * 1000 / 1100)
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer    │  PoolConfig + two ledgers
//! └──────┬───────┘
//!        │ Pool::new / SharedPool::new
//!        ▼
//! ┌──────────────┐
//! │     Pool      │  deposit, withdraw, swap; share ledger; reconciliation
//! └──────┬───────┘
//!        │ quote, mul_div_floor, isqrt
//!        ▼
//! ┌──────────────┐
//! │  Swap / Math  │  pure integer pricing
//! └──────┬───────┘
//!        │ transfer, transfer_from, balance_of, checkpoint
//!        ▼
//! ┌──────────────┐
//! │ Asset ledgers │  external custody of both assets
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`AssetPair`](domain::AssetPair), [`PoolEvent`](domain::PoolEvent), etc. |
//! | [`traits`] | Core abstractions: [`SwapPool`](traits::SwapPool), [`LiquidityPool`](traits::LiquidityPool) |
//! | [`config`] | Declarative pool blueprint: [`PoolConfig`](config::PoolConfig) |
//! | [`pool`]   | The [`Pool`](pool::Pool) state manager and the [`SharedPool`](pool::SharedPool) handle |
//! | [`swap`]   | The pure [`quote`](swap::quote) pricing function |
//! | [`ledger`] | The [`AssetLedger`](ledger::AssetLedger) seam and [`InMemoryLedger`](ledger::InMemoryLedger) |
//! | [`math`]   | Checked arithmetic, multiply-divide, integer square root |
//! | [`error`]  | [`AmmError`](error::AmmError) and [`LedgerError`](error::LedgerError) |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! # Logging
//!
//! Operations log through [`tracing`]: `debug` for priced quantities and
//! reconciliations, `info` for every emitted record, `warn` for rollbacks.
//! The library installs no subscriber.

pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod swap;
pub mod traits;
