//! Resonance detection and qualitative circuit classification

use std::fmt;

use serde::Serialize;

use crate::math::{safe_divide, TWO_PI};

/// |XL - XC| (Ohms) at or below which the circuit is at true resonance.
pub const STRICT_RESONANCE_TOLERANCE: f64 = 0.01;

/// |X| (Ohms) below which the resonance badge reads "Resonant". Looser than
/// the strict check so the badge stays put under small parameter jitter.
pub const RESONANCE_CLASSIFICATION_TOLERANCE: f64 = 0.5;

/// |X| (Ohms) below which a non-resonant circuit is called resistive.
pub const RESISTIVE_TOLERANCE: f64 = 0.1;

/// f₀ = 1/(2π√(LC)) in Hz, defined only for L > 0 and C > 0
pub fn resonant_frequency(inductance: f64, capacitance: f64) -> Option<f64> {
    if inductance <= 0.0 || capacitance <= 0.0 {
        return None;
    }
    let lc = inductance * capacitance;
    if lc <= 0.0 {
        return None;
    }
    let f0 = safe_divide(1.0, TWO_PI * lc.sqrt(), 0.0);
    (f0.is_finite() && f0 > 0.0).then_some(f0)
}

/// |XL - XC| <= tolerance
pub fn is_resonance(xl: f64, xc: f64, tolerance: f64) -> bool {
    if xl.is_nan() || xc.is_nan() || tolerance < 0.0 {
        return false;
    }
    (xl - xc).abs() <= tolerance
}

/// Qualitative badge on net reactance alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResonanceType {
    Inductive,
    Capacitive,
    Resonant,
}

impl ResonanceType {
    pub fn from_reactance(reactance: f64) -> Self {
        if reactance.abs() < RESONANCE_CLASSIFICATION_TOLERANCE {
            ResonanceType::Resonant
        } else if reactance > 0.0 {
            ResonanceType::Inductive
        } else {
            ResonanceType::Capacitive
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CircuitType {
    Inductive,
    Capacitive,
    Resonant,
    Resistive,
}

impl CircuitType {
    pub fn classify(reactance: f64, is_resonant: bool) -> Self {
        if is_resonant {
            CircuitType::Resonant
        } else if reactance.abs() < RESISTIVE_TOLERANCE {
            CircuitType::Resistive
        } else if reactance > 0.0 {
            CircuitType::Inductive
        } else {
            CircuitType::Capacitive
        }
    }
}

impl fmt::Display for CircuitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CircuitType::Inductive => "Inductive",
            CircuitType::Capacitive => "Capacitive",
            CircuitType::Resonant => "Resonant",
            CircuitType::Resistive => "Resistive",
        };
        f.write_str(label)
    }
}
