//! Phase angle and power factor

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use serde::Serialize;

use crate::math::{safe_divide, to_degrees};

/// Phase angles inside this band (degrees) are labelled unity so the label
/// does not flicker on floating-point noise around a zero crossing.
pub const UNITY_BAND_DEG: f64 = 1.0;

/// Phase of current relative to voltage, φ = atan(X/R) in radians.
///
/// Positive φ means current lags (inductive), negative means it leads.
/// With R = 0 the circuit is purely reactive and φ is pinned to ±π/2
/// (or 0 when X is also 0) instead of going through atan(±∞).
pub fn phase_angle(resistance: f64, reactance: f64) -> f64 {
    if reactance.is_nan() {
        return 0.0;
    }
    if resistance <= 0.0 {
        return if reactance > 0.0 {
            FRAC_PI_2
        } else if reactance < 0.0 {
            -FRAC_PI_2
        } else {
            0.0
        };
    }
    safe_divide(reactance, resistance, 0.0).atan()
}

pub fn phase_angle_degrees(resistance: f64, reactance: f64) -> f64 {
    to_degrees(phase_angle(resistance, reactance))
}

/// |cos φ|, clamped to [0, 1]
pub fn power_factor(phi: f64) -> f64 {
    let pf = phi.cos().abs();
    if pf.is_finite() {
        pf.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PowerFactorType {
    Unity,
    Lagging,
    Leading,
}

impl PowerFactorType {
    pub fn from_phase_degrees(phi_deg: f64) -> Self {
        if phi_deg.is_nan() || phi_deg.abs() < UNITY_BAND_DEG {
            PowerFactorType::Unity
        } else if phi_deg > 0.0 {
            PowerFactorType::Lagging
        } else {
            PowerFactorType::Leading
        }
    }
}

impl fmt::Display for PowerFactorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PowerFactorType::Unity => "Unity",
            PowerFactorType::Lagging => "Lagging",
            PowerFactorType::Leading => "Leading",
        };
        f.write_str(label)
    }
}
