//! Core trait abstractions for pool operations.
//!
//! [`SwapPool`] covers trading and price queries; [`LiquidityPool`]
//! extends it with share-based deposits and withdrawals.  Both are
//! implemented by [`Pool`](crate::pool::Pool) so callers can be written
//! against the operation surface rather than a concrete ledger pairing.

mod liquidity_pool;
mod swap_pool;

pub use liquidity_pool::LiquidityPool;
pub use swap_pool::SwapPool;
