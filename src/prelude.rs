//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use pair_amm::prelude::*;
//! ```

pub use crate::config::PoolConfig;
pub use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, PoolEvent, Reserves, Shares, SwapDirection,
};
pub use crate::error::{AmmError, LedgerError, Result};
pub use crate::ledger::{AssetLedger, InMemoryLedger};
pub use crate::math::CheckedArithmetic;
pub use crate::pool::{Pool, SharedPool};
pub use crate::swap::quote;
pub use crate::traits::{LiquidityPool, SwapPool};
