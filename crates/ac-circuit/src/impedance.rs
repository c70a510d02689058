//! Impedance magnitude and RMS current

use crate::math::{finite_or_zero, safe_divide};

/// |Z| = √(R² + X²) in Ohms, or 0 when R is negative or the result is not finite
pub fn impedance(resistance: f64, reactance: f64) -> f64 {
    if resistance < 0.0 || reactance.is_nan() {
        return 0.0;
    }
    let z = resistance.hypot(reactance);
    if z.is_finite() {
        z
    } else {
        0.0
    }
}

/// Ohm's law, I = V/Z (RMS amperes). 0 for a non-positive impedance or
/// when the quotient overflows.
pub fn current(voltage: f64, impedance: f64) -> f64 {
    if voltage < 0.0 || impedance <= 0.0 || voltage.is_nan() {
        return 0.0;
    }
    finite_or_zero(safe_divide(voltage, impedance, 0.0))
}
