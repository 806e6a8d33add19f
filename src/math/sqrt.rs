//! Integer square root.

/// Floor of the square root of `n`, via Newton's method.
///
/// Used for the first-deposit share mint, `floor(sqrt(amount_a × amount_b))`.
///
/// # Examples
///
/// ```
/// use pair_amm::math::isqrt;
///
/// assert_eq!(isqrt(10_000), 100);
/// assert_eq!(isqrt(99), 9);
/// assert_eq!(isqrt(0), 0);
/// ```
#[must_use]
pub const fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    // Start at ceil(n / 2), at or above the root for n >= 2; the sequence
    // then decreases monotonically to the floor root.
    let mut x = n;
    let mut y = n / 2 + n % 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}
