//! Fundamental domain value types used throughout the pool.
//!
//! Amounts, shares, identifiers, trade directions, reserve snapshots and
//! the records emitted on completion.  Quantities are newtypes over `u128`
//! with checked arithmetic so unit mix-ups fail to compile.

mod amount;
mod asset_id;
mod asset_pair;
mod event;
mod reserves;
mod shares;

pub use amount::Amount;
pub use asset_id::{AccountId, AssetId};
pub use asset_pair::{AssetPair, SwapDirection};
pub use event::{DepositRecord, PoolEvent, SwapRecord, WithdrawalRecord};
pub use reserves::Reserves;
pub use shares::Shares;
