//! Fixed-point temperature helpers.
//!
//! Temperatures travel through the pipeline as integers counting tenths of a
//! degree. They are parsed straight from the input bytes and only turned into
//! decimal text when the report is written.

use crate::utils::constants::{DECIMAL_POINT, MINUS, TENTHS_PER_DEGREE};
use std::fmt;

/// Parse a temperature field of the form `[-]digits.digit` into tenths.
///
/// Digits accumulate as `value * 10 + digit` and the decimal point is skipped,
/// so `b"-3.4"` becomes `-34`. Returns `None` for anything that does not match
/// the format exactly (no digits, missing or repeated point, more than one
/// fractional digit, stray bytes, overflow).
#[inline]
pub fn parse_temperature(field: &[u8]) -> Option<i32> {
    let (negative, digits) = match field.split_first() {
        Some((&MINUS, rest)) => (true, rest),
        Some(_) => (false, field),
        None => return None,
    };

    // Shortest valid body is "d.d"
    if digits.len() < 3 || digits[digits.len() - 2] != DECIMAL_POINT {
        return None;
    }

    let mut value: i32 = 0;
    let mut seen_point = false;
    for &b in digits {
        if b == DECIMAL_POINT {
            if seen_point {
                return None;
            }
            seen_point = true;
            continue;
        }
        if !b.is_ascii_digit() {
            return None;
        }
        value = value.checked_mul(10)?.checked_add(i32::from(b - b'0'))?;
    }

    Some(if negative { -value } else { value })
}

/// Mean of `sum / count` in tenths, rounded half away from zero.
///
/// Computed in integer arithmetic so the result is exact for any
/// sum that fits in an `i64`.
pub fn rounded_mean_tenths(sum: i64, count: u64) -> i64 {
    if count == 0 {
        return 0;
    }
    let sum = i128::from(sum);
    let count = i128::from(count);
    let quotient = sum / count;
    let remainder = sum % count;
    let rounded = if 2 * remainder.abs() >= count {
        quotient + sum.signum()
    } else {
        quotient
    };
    rounded as i64
}

/// Display adapter rendering tenths with exactly one fractional digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tenths(pub i64);

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_degree = TENTHS_PER_DEGREE as u64;
        write!(f, "{}{}.{}", sign, abs / per_degree, abs % per_degree)
    }
}

/// Render tenths as a decimal string, e.g. `-34` -> `"-3.4"`.
pub fn format_tenths(tenths: i64) -> String {
    Tenths(tenths).to_string()
}
