//! Constant-product pricing.
//!
//! The swap curve is stateless: [`quote`] maps an input amount and the two
//! pre-trade reserves to the output amount.  The stateful trade operation
//! lives on [`Pool`](crate::pool::Pool) and calls into this module.
//!
//! # Fee
//!
//! A fixed 0.3% fee is embedded in the curve as integer thousandths: the
//! input is weighted by [`FEE_NUMERATOR`] / [`FEE_DENOMINATOR`] before the
//! constant-product formula is solved.  The fee never leaves the pool, so
//! `reserve_in × reserve_out` grows on every trade.

mod quote;

pub use quote::{quote, FEE_DENOMINATOR, FEE_NUMERATOR};
