//! Opaque identifiers for assets and accounts.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An opaque identifier of a fungible asset tracked by an asset ledger.
///
/// Wraps a fixed-size `[u8; 32]` byte array.  All 32-byte sequences are
/// valid identifiers, so construction is infallible.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::AssetId;
///
/// let id = AssetId::from_bytes([1u8; 32]);
/// assert_eq!(id.as_bytes(), [1u8; 32]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId([u8; 32]);

impl AssetId {
    /// Creates an `AssetId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", short_hex(&self.0))
    }
}

/// An opaque identifier of an account holding balances on a ledger.
///
/// Callers, liquidity providers, and the pool's own custody account are
/// all `AccountId`s.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::AccountId;
///
/// let alice = AccountId::from_bytes([0xA1; 32]);
/// assert_ne!(alice, AccountId::from_bytes([0xB0; 32]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", short_hex(&self.0))
    }
}

/// First eight bytes as lowercase hex, enough to tell identifiers apart in logs.
fn short_hex(bytes: &[u8; 32]) -> String {
    hex::encode(&bytes[..8])
}
