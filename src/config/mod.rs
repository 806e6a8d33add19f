//! Pool configuration.
//!
//! [`PoolConfig`] is the declarative blueprint for one pool: which two
//! assets it trades and which account holds its custody balances.  It is
//! serde-enabled so an embedding application can load it from whatever
//! format it prefers.

mod pool_config;

pub use pool_config::PoolConfig;
