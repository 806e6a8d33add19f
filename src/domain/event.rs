//! Completion records emitted by mutating pool operations.
//!
//! Each successful deposit, withdrawal, or swap appends exactly one
//! [`PoolEvent`] to the pool's audit trail.  Records are serializable so
//! observers can persist them in whatever format they use.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{AccountId, Amount, AssetId, Shares};

/// Record of a completed deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepositRecord {
    /// Account that supplied the assets and received the shares.
    pub provider: AccountId,
    /// Amount of asset A moved into the pool.
    pub amount_a: Amount,
    /// Amount of asset B moved into the pool.
    pub amount_b: Amount,
    /// Shares credited to `provider`.
    pub shares_minted: Shares,
}

/// Record of a completed withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WithdrawalRecord {
    /// Account that redeemed the shares and received the assets.
    pub provider: AccountId,
    /// Amount of asset A paid out.
    pub amount_a: Amount,
    /// Amount of asset B paid out.
    pub amount_b: Amount,
    /// Shares burned from `provider`.
    pub shares_burned: Shares,
}

/// Record of a completed swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapRecord {
    /// Account that paid `amount_in` and received `amount_out`.
    pub trader: AccountId,
    /// Asset paid into the pool.
    pub asset_in: AssetId,
    /// Asset paid out of the pool.
    pub asset_out: AssetId,
    /// Amount of `asset_in` received by the pool.
    pub amount_in: Amount,
    /// Amount of `asset_out` sent to the trader.
    pub amount_out: Amount,
}

/// One entry of the pool's audit trail.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{AccountId, Amount, DepositRecord, PoolEvent, Shares};
///
/// let event = PoolEvent::Deposit(DepositRecord {
///     provider: AccountId::from_bytes([1u8; 32]),
///     amount_a: Amount::new(100),
///     amount_b: Amount::new(100),
///     shares_minted: Shares::new(100),
/// });
/// assert_eq!(event.share_delta(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolEvent {
    /// Assets deposited and shares minted.
    Deposit(DepositRecord),
    /// Shares burned and assets withdrawn.
    Withdrawal(WithdrawalRecord),
    /// One asset exchanged for the other.
    Swap(SwapRecord),
}

impl PoolEvent {
    /// Returns the account that performed the operation.
    #[must_use]
    pub const fn actor(&self) -> AccountId {
        match self {
            Self::Deposit(r) => r.provider,
            Self::Withdrawal(r) => r.provider,
            Self::Swap(r) => r.trader,
        }
    }

    /// Returns the signed change in total shares caused by the operation.
    ///
    /// Positive for deposits, negative for withdrawals, zero for swaps.
    /// Saturates at `i128` bounds, which no real share count reaches.
    #[must_use]
    pub fn share_delta(&self) -> i128 {
        match self {
            Self::Deposit(r) => i128::try_from(r.shares_minted.get()).unwrap_or(i128::MAX),
            Self::Withdrawal(r) => {
                i128::try_from(r.shares_burned.get()).map_or(i128::MIN, |v| -v)
            }
            Self::Swap(_) => 0,
        }
    }
}

impl fmt::Display for PoolEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit(r) => write!(
                f,
                "Deposit(provider={}, a={}, b={}, minted={})",
                r.provider, r.amount_a, r.amount_b, r.shares_minted
            ),
            Self::Withdrawal(r) => write!(
                f,
                "Withdrawal(provider={}, a={}, b={}, burned={})",
                r.provider, r.amount_a, r.amount_b, r.shares_burned
            ),
            Self::Swap(r) => write!(
                f,
                "Swap(trader={}, in={} {}, out={} {})",
                r.trader, r.amount_in, r.asset_in, r.amount_out, r.asset_out
            ),
        }
    }
}
