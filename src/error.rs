//! Unified error types for the pair AMM library.
//!
//! All fallible pool operations return [`AmmError`].  Asset ledgers report
//! their own [`LedgerError`], which the pool wraps into
//! [`AmmError::TransferFailed`] together with the asset that failed.
//!
//! Every error is a rejected operation: a pool that returns `Err` is left
//! exactly as it was before the call.

use thiserror::Error;

use crate::domain::{AccountId, Amount, AssetId, Shares};

/// Errors raised by pool operations and pricing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// A quantity argument is zero or otherwise meaningless.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// Pricing was attempted against an empty reserve.
    #[error("pool reserves are empty")]
    InvalidReserves,

    /// The operation would mint zero shares or pay out zero output.
    #[error("insufficient liquidity for this operation")]
    InsufficientLiquidity,

    /// A withdrawal exceeds the caller's share balance.
    #[error("insufficient shares: requested {requested}, available {available}")]
    InsufficientShares {
        /// Shares the caller asked to burn.
        requested: Shares,
        /// Shares the caller actually holds.
        available: Shares,
    },

    /// The asset ledger rejected a movement.
    #[error("transfer of asset {asset} failed: {reason}")]
    TransferFailed {
        /// Asset whose ledger rejected the movement.
        asset: AssetId,
        /// Reason reported by the ledger.
        reason: LedgerError,
    },

    /// The quoted output is below the caller's minimum.
    #[error("slippage exceeded: minimum {min_amount_out}, quoted {amount_out}")]
    SlippageExceeded {
        /// Minimum output the caller accepts.
        min_amount_out: Amount,
        /// Output the curve would pay.
        amount_out: Amount,
    },

    /// The pool's own custody account was passed as the caller.
    #[error("custody account {0} cannot trade with its own pool")]
    CustodyCaller(AccountId),

    /// A pool configuration names unusable assets.
    #[error("invalid asset: {0}")]
    InvalidAsset(&'static str),

    /// An intermediate result does not fit in 128 bits.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A subtraction would go below zero.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by a zero divisor.
    #[error("division by zero")]
    DivisionByZero,
}

/// Errors raised by an [`AssetLedger`](crate::ledger::AssetLedger).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The sending account does not hold enough of the asset.
    #[error("insufficient balance for {account}: have {available}, need {required}")]
    InsufficientBalance {
        /// Account being debited.
        account: AccountId,
        /// Its current balance.
        available: Amount,
        /// Amount requested.
        required: Amount,
    },

    /// The spender's allowance does not cover the movement.
    #[error("insufficient allowance for spender {spender}: have {available}, need {required}")]
    InsufficientAllowance {
        /// Account spending on the owner's behalf.
        spender: AccountId,
        /// Remaining allowance.
        available: Amount,
        /// Amount requested.
        required: Amount,
    },

    /// The account is frozen on this ledger.
    #[error("account {0} is frozen")]
    AccountFrozen(AccountId),

    /// Crediting the receiver would overflow its balance.
    #[error("balance overflow for {0}")]
    Overflow(AccountId),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_amount() {
        let e = AmmError::InvalidAmount("amount_in must be positive");
        assert_eq!(e.to_string(), "invalid amount: amount_in must be positive");
    }

    #[test]
    fn display_insufficient_shares() {
        let e = AmmError::InsufficientShares {
            requested: Shares::new(10),
            available: Shares::new(3),
        };
        assert_eq!(
            e.to_string(),
            "insufficient shares: requested 10, available 3"
        );
    }

    #[test]
    fn transfer_failed_carries_ledger_reason() {
        let account = AccountId::from_bytes([7u8; 32]);
        let e = AmmError::TransferFailed {
            asset: AssetId::from_bytes([1u8; 32]),
            reason: LedgerError::AccountFrozen(account),
        };
        let msg = e.to_string();
        assert!(msg.starts_with("transfer of asset"));
        assert!(msg.contains("frozen"));
    }

    #[test]
    fn display_custody_caller() {
        let e = AmmError::CustodyCaller(AccountId::from_bytes([0x50; 32]));
        assert!(e.to_string().starts_with("custody account"));
    }

    #[test]
    fn errors_compare_by_value() {
        assert_eq!(AmmError::InvalidReserves, AmmError::InvalidReserves);
        assert_ne!(AmmError::InvalidReserves, AmmError::InsufficientLiquidity);
    }
}
