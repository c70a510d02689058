//! Numeric utilities shared by every stage of the pipeline
//!
//! All helpers are total: they never panic and never hand back NaN or
//! infinity to the caller.

use std::f64::consts::PI;

pub const TWO_PI: f64 = 2.0 * PI;

/// Convert degrees to radians
pub fn to_radians(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees
pub fn to_degrees(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Division that returns `fallback` instead of dividing by zero
pub fn safe_divide(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 {
        fallback
    } else {
        numerator / denominator
    }
}

/// Replace NaN and ±inf with 0
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Clamp to the finite range `[-f64::MAX, f64::MAX]`. NaN becomes 0.
pub fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-f64::MAX, f64::MAX)
    }
}

/// Clamp `value` to `[min, f64::MAX]`. NaN collapses to `min`, +∞ saturates.
pub fn clamp_min(value: f64, min: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, f64::MAX)
    }
}
