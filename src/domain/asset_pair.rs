//! The two assets a pool trades, and trade directions over them.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::AssetId;
use crate::error::AmmError;

/// An ordered pair of distinct assets.
///
/// Unlike a canonically sorted pair, the order here is the order the pool
/// was configured with: `asset_a` is the asset whose reserve is reported
/// first and against which [`price`](crate::pool::Pool::price) is quoted.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{AssetId, AssetPair};
///
/// let usd = AssetId::from_bytes([2u8; 32]);
/// let eur = AssetId::from_bytes([1u8; 32]);
///
/// let pair = AssetPair::new(usd, eur).expect("distinct assets");
/// assert_eq!(pair.asset_a(), usd);
/// assert_eq!(pair.asset_b(), eur);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetPair {
    asset_a: AssetId,
    asset_b: AssetId,
}

impl AssetPair {
    /// Creates a new pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if both identifiers are equal.
    pub fn new(asset_a: AssetId, asset_b: AssetId) -> Result<Self, AmmError> {
        if asset_a == asset_b {
            return Err(AmmError::InvalidAsset(
                "asset pair requires two distinct assets",
            ));
        }
        Ok(Self { asset_a, asset_b })
    }

    /// Returns asset A.
    #[must_use]
    pub const fn asset_a(&self) -> AssetId {
        self.asset_a
    }

    /// Returns asset B.
    #[must_use]
    pub const fn asset_b(&self) -> AssetId {
        self.asset_b
    }

    /// Returns `true` if `asset` is one of the two assets.
    #[must_use]
    pub fn contains(&self, asset: &AssetId) -> bool {
        self.asset_a == *asset || self.asset_b == *asset
    }

    /// Returns `(asset_in, asset_out)` for a trade in `direction`.
    #[must_use]
    pub const fn route(&self, direction: SwapDirection) -> (AssetId, AssetId) {
        match direction {
            SwapDirection::AToB => (self.asset_a, self.asset_b),
            SwapDirection::BToA => (self.asset_b, self.asset_a),
        }
    }
}

/// Direction of a trade through the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Pay asset A, receive asset B.
    AToB,
    /// Pay asset B, receive asset A.
    BToA,
}

impl SwapDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn reverse(&self) -> Self {
        match self {
            Self::AToB => Self::BToA,
            Self::BToA => Self::AToB,
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AToB => write!(f, "A->B"),
            Self::BToA => write!(f, "B->A"),
        }
    }
}
