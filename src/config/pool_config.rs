//! Configuration for a two-asset constant-product pool.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, AssetPair};
use crate::error::AmmError;

/// Configuration for a constant-product pool.
///
/// Defines the immutable parameters of a pool: its asset pair and its
/// custody account.  Fee and curve are fixed and therefore not
/// configurable.
///
/// # Validation
///
/// - The two assets must be distinct.  [`AssetPair::new`] enforces this,
///   but a deserialized config bypasses that constructor, so
///   [`validate`](Self::validate) checks it again.
///
/// # Examples
///
/// ```
/// use pair_amm::config::PoolConfig;
/// use pair_amm::domain::{AccountId, AssetId, AssetPair};
///
/// let pair = AssetPair::new(AssetId::from_bytes([1u8; 32]), AssetId::from_bytes([2u8; 32]))
///     .expect("distinct assets");
/// let config = PoolConfig::new(pair, AccountId::from_bytes([0x50; 32])).expect("valid config");
/// assert_eq!(config.asset_pair(), pair);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolConfig {
    asset_pair: AssetPair,
    pool_account: AccountId,
}

impl PoolConfig {
    /// Creates a new `PoolConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if the pair names the same asset
    /// twice.
    pub fn new(asset_pair: AssetPair, pool_account: AccountId) -> Result<Self, AmmError> {
        let config = Self {
            asset_pair,
            pool_account,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if the pair names the same asset
    /// twice.
    pub fn validate(&self) -> Result<(), AmmError> {
        AssetPair::new(self.asset_pair.asset_a(), self.asset_pair.asset_b())?;
        Ok(())
    }

    /// Returns the asset pair.
    #[must_use]
    pub const fn asset_pair(&self) -> AssetPair {
        self.asset_pair
    }

    /// Returns the pool's custody account.
    #[must_use]
    pub const fn pool_account(&self) -> AccountId {
        self.pool_account
    }
}
