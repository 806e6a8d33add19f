//! Arithmetic helpers shared by the pool and the swap engine.
//!
//! - [`CheckedArithmetic`]: overflow-safe operations on domain newtypes.
//! - [`mul_div_floor`]: `floor(a × b / d)` with a checked full-width product.
//! - [`isqrt`]: integer square root for the first-deposit share mint.
//!
//! All helpers are integer-only and never panic.

mod checked;
mod mul_div;
mod sqrt;

pub use checked::CheckedArithmetic;
pub use mul_div::mul_div_floor;
pub use sqrt::isqrt;
