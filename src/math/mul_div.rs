//! Multiply-then-divide with floor rounding.
//!
//! Every ratio the pool computes has the shape `a × b / d`: proportional
//! share mints, proportional payouts, the swap curve and the fixed-point
//! price.  The product is formed in full before dividing so no precision
//! is lost to early truncation, and it is overflow-checked so an
//! oversized intermediate surfaces as [`AmmError::Overflow`] instead of
//! wrapping.
//!
//! Rounding is always towards zero, which favours the pool: a trader or
//! withdrawing provider receives at most the real-valued result.

use super::CheckedArithmetic;
use crate::domain::Amount;
use crate::error::AmmError;

/// Computes `floor(a × b / denominator)`.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::Overflow`] if `a × b` exceeds `u128`.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::Amount;
/// use pair_amm::math::mul_div_floor;
///
/// let out = mul_div_floor(Amount::new(50), Amount::new(100), Amount::new(100));
/// assert_eq!(out, Ok(Amount::new(50)));
/// ```
pub fn mul_div_floor(a: Amount, b: Amount, denominator: Amount) -> Result<Amount, AmmError> {
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    a.safe_mul(&b)?.safe_div(&denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floors_the_quotient() {
        assert_eq!(
            mul_div_floor(Amount::new(7), Amount::new(3), Amount::new(4)),
            Ok(Amount::new(5))
        );
    }

    #[test]
    fn full_product_before_division() {
        // 3 * (10 / 4) would give 6; the full product gives 7.
        assert_eq!(
            mul_div_floor(Amount::new(3), Amount::new(10), Amount::new(4)),
            Ok(Amount::new(7))
        );
    }

    #[test]
    fn zero_denominator() {
        assert_eq!(
            mul_div_floor(Amount::new(1), Amount::new(1), Amount::ZERO),
            Err(AmmError::DivisionByZero)
        );
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(
            mul_div_floor(Amount::MAX, Amount::new(2), Amount::new(2)),
            Err(AmmError::Overflow("amount multiplication overflow"))
        );
    }

    #[test]
    fn large_but_representable() {
        let big = Amount::new(u128::from(u64::MAX));
        assert_eq!(mul_div_floor(big, big, big), Ok(big));
    }
}
