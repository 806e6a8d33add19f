//! The constant-product quote with the embedded 0.3% fee.
//!
//! # Formula
//!
//! ```text
//! after_fee  = amount_in × 997
//! amount_out = ⌊ after_fee × reserve_out / (reserve_in × 1000 + after_fee) ⌋
//! ```
//!
//! This is `reserve_in × reserve_out = k` solved for the output after
//! deducting the fee from the input.  Floor division means the trader
//! receives at most the real-valued solution.

use tracing::trace;

use crate::domain::Amount;
use crate::error::AmmError;
use crate::math::{mul_div_floor, CheckedArithmetic};

/// Fraction of the input, in thousandths, that is priced on the curve.
pub const FEE_NUMERATOR: u128 = 997;

/// Denominator of the fee fraction.
pub const FEE_DENOMINATOR: u128 = 1_000;

/// Quotes the output of trading `amount_in` against the given reserves.
///
/// Pure: reads no pool state.
///
/// # Errors
///
/// - [`AmmError::InvalidAmount`] if `amount_in` is zero.
/// - [`AmmError::InvalidReserves`] if either reserve is zero.
/// - [`AmmError::Overflow`] if an intermediate product exceeds `u128`.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::Amount;
/// use pair_amm::swap::quote;
///
/// // ⌊99_700 × 1_000 / 1_099_700⌋ = 90
/// let out = quote(Amount::new(100), Amount::new(1_000), Amount::new(1_000));
/// assert_eq!(out, Ok(Amount::new(90)));
/// ```
pub fn quote(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
) -> Result<Amount, AmmError> {
    if amount_in.is_zero() {
        return Err(AmmError::InvalidAmount("amount_in must be positive"));
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InvalidReserves);
    }

    let after_fee = amount_in.safe_mul(&Amount::new(FEE_NUMERATOR))?;
    let scaled_reserve = reserve_in.safe_mul(&Amount::new(FEE_DENOMINATOR))?;
    let denominator = scaled_reserve.safe_add(&after_fee)?;

    let amount_out = mul_div_floor(after_fee, reserve_out, denominator)?;
    trace!(%amount_in, %reserve_in, %reserve_out, %amount_out, "quoted swap");
    Ok(amount_out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amt(v: u128) -> Amount {
        Amount::new(v)
    }

    #[test]
    fn reference_quote() {
        // 99_700 * 1_000 / 1_099_700 = 90.66...
        assert_eq!(quote(amt(100), amt(1_000), amt(1_000)), Ok(amt(90)));
    }

    #[test]
    fn asymmetric_reserves() {
        // after_fee = 997_000; 997_000 * 2_000_000 / (1_000_000_000 + 997_000) = 1992.0...
        assert_eq!(
            quote(amt(1_000), amt(1_000_000), amt(2_000_000)),
            Ok(amt(1_992))
        );
    }

    #[test]
    fn zero_input_rejected() {
        assert_eq!(
            quote(Amount::ZERO, amt(1_000), amt(1_000)),
            Err(AmmError::InvalidAmount("amount_in must be positive"))
        );
    }

    #[test]
    fn zero_reserve_rejected() {
        assert_eq!(
            quote(amt(10), Amount::ZERO, amt(1_000)),
            Err(AmmError::InvalidReserves)
        );
        assert_eq!(
            quote(amt(10), amt(1_000), Amount::ZERO),
            Err(AmmError::InvalidReserves)
        );
    }

    #[test]
    fn zero_input_checked_before_reserves() {
        assert!(matches!(
            quote(Amount::ZERO, Amount::ZERO, Amount::ZERO),
            Err(AmmError::InvalidAmount(_))
        ));
    }

    #[test]
    fn tiny_input_quotes_zero() {
        // 997 * 1 / (1_000_000 * 1_000 + 997) rounds down to zero.
        assert_eq!(quote(amt(1), amt(1_000_000), amt(1)), Ok(Amount::ZERO));
    }

    #[test]
    fn output_never_drains_reserve() {
        let out = quote(amt(u128::from(u64::MAX)), amt(1), amt(1_000));
        assert_eq!(out, Ok(amt(999)));
    }

    #[test]
    fn overflow_reported() {
        assert!(matches!(
            quote(Amount::MAX, amt(1), amt(1)),
            Err(AmmError::Overflow(_))
        ));
    }
}
