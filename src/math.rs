//! Integer helpers with floor semantics and overflow detection.
//!
//! Calendar arithmetic on negative years, negative durations and weekdays
//! all need the remainder to share the sign of the divisor, so none of the
//! code in this crate uses `/` or `%` on possibly negative operands.

use crate::error::{Error, Result};

/// Floor division: rounds toward negative infinity.
#[inline]
pub(crate) const fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if (a % b != 0) && ((a < 0) != (b < 0)) { q - 1 } else { q }
}

/// Floor modulo: the result has the sign of `b`.
#[inline]
pub(crate) const fn floor_mod(a: i64, b: i64) -> i64 {
    let r = a % b;
    if r != 0 && ((r < 0) != (b < 0)) { r + b } else { r }
}

#[inline]
pub(crate) const fn floor_div_i128(a: i128, b: i128) -> i128 {
    let q = a / b;
    if (a % b != 0) && ((a < 0) != (b < 0)) { q - 1 } else { q }
}

#[inline]
pub(crate) const fn floor_mod_i128(a: i128, b: i128) -> i128 {
    let r = a % b;
    if r != 0 && ((r < 0) != (b < 0)) { r + b } else { r }
}

/// Adds two values, failing with an overflow error instead of wrapping.
#[inline]
pub(crate) fn add_exact(a: i64, b: i64) -> Result<i64> {
    a.checked_add(b).ok_or_else(Error::overflow)
}

/// Multiplies two values, failing with an overflow error instead of wrapping.
#[inline]
pub(crate) fn mul_exact(a: i64, b: i64) -> Result<i64> {
    a.checked_mul(b).ok_or_else(Error::overflow)
}

/// Negates a value, failing on `i64::MIN`.
#[inline]
pub(crate) fn neg_exact(a: i64) -> Result<i64> {
    a.checked_neg().ok_or_else(Error::overflow)
}

/// Narrows a wide intermediate back to `i64`.
#[inline]
pub(crate) fn narrow(v: i128) -> Result<i64> {
    i64::try_from(v).map_err(|_| Error::overflow())
}
