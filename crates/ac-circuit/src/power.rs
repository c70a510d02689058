//! Real, reactive and apparent power

use serde::Serialize;

use crate::math::finite_or_zero;

/// P = V·I·cos φ (W)
pub fn real_power(voltage: f64, current: f64, phi: f64) -> f64 {
    if voltage < 0.0 || current < 0.0 || phi.is_nan() {
        return 0.0;
    }
    finite_or_zero(voltage * current * phi.cos())
}

/// Q = V·I·sin φ (VAR). Negative for a leading (capacitive) load.
pub fn reactive_power(voltage: f64, current: f64, phi: f64) -> f64 {
    if voltage < 0.0 || current < 0.0 || phi.is_nan() {
        return 0.0;
    }
    finite_or_zero(voltage * current * phi.sin())
}

/// S = V·I (VA)
pub fn apparent_power(voltage: f64, current: f64) -> f64 {
    if voltage < 0.0 || current < 0.0 {
        return 0.0;
    }
    finite_or_zero(voltage * current)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerTriangle {
    pub real: f64,
    pub reactive: f64,
    pub apparent: f64,
}

impl PowerTriangle {
    pub fn compute(voltage: f64, current: f64, phi: f64) -> Self {
        Self {
            real: real_power(voltage, current, phi),
            reactive: reactive_power(voltage, current, phi),
            apparent: apparent_power(voltage, current),
        }
    }
}
