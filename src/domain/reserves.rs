//! Snapshot of a pool's two reserves.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, SwapDirection};

/// The pool's holdings of asset A and asset B at one point in time.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Amount, Reserves, SwapDirection};
///
/// let r = Reserves::new(Amount::new(1_000), Amount::new(4_000));
/// assert_eq!(r.oriented(SwapDirection::BToA), (Amount::new(4_000), Amount::new(1_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Reserves {
    /// Reserve of asset A.
    pub a: Amount,
    /// Reserve of asset B.
    pub b: Amount,
}

impl Reserves {
    /// Creates a reserve snapshot.
    pub const fn new(a: Amount, b: Amount) -> Self {
        Self { a, b }
    }

    /// Returns `true` if both reserves are zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.a.is_zero() && self.b.is_zero()
    }

    /// Returns `(reserve_in, reserve_out)` for a trade in `direction`.
    #[must_use]
    pub const fn oriented(&self, direction: SwapDirection) -> (Amount, Amount) {
        match direction {
            SwapDirection::AToB => (self.a, self.b),
            SwapDirection::BToA => (self.b, self.a),
        }
    }

    /// Returns `reserve_a * reserve_b`, or `None` if it exceeds `u128`.
    #[must_use]
    pub const fn product(&self) -> Option<u128> {
        self.a.get().checked_mul(self.b.get())
    }
}

impl fmt::Display for Reserves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reserves(a={}, b={})", self.a, self.b)
    }
}
