//! Decimal rounding helpers.
//!
//! Two flavours are needed because reference documents were produced with two different
//! rounding routines:
//!
//! - [`round_to`] rounds the exact decimal value of the float (ties to even), used for every
//!   per-record metric.
//! - [`round_scaled`] scales by `10^digits`, rounds half to even and scales back, used for yearly
//!   averages.
//!
//! They disagree when scaling moves a value onto a rounding boundary: `2.675 * 100.0` is exactly
//! `267.5`, so `round_scaled(2.675, 2) == 2.68` while `round_to(2.675, 2) == 2.67`.

/// Round `value` to `digits` decimal places using its exact decimal expansion.
///
/// Non-finite values are returned unchanged.
pub fn round_to(value: f64, digits: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // Fixed-precision formatting rounds the exact value, ties to even.
    format!("{value:.digits$}").parse().unwrap_or(value)
}

/// Round `value` to `digits` decimal places by scaling, rounding half to even, and scaling back.
pub fn round_scaled(value: f64, digits: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(digits);
    let scaled = (value * scale).round_ties_even() / scale;
    if scaled.is_finite() { scaled } else { value }
}
