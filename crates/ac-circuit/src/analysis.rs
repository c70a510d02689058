//! Steady-state derivation: every scalar quantity that follows from the
//! primitive parameters at the source frequency.

use serde::Serialize;

use crate::impedance::{current, impedance};
use crate::math::to_degrees;
use crate::params::CircuitParameters;
use crate::phase::{phase_angle, power_factor, PowerFactorType};
use crate::power::PowerTriangle;
use crate::reactance::{angular_frequency, Reactances};
use crate::resonance::{
    is_resonance, resonant_frequency, CircuitType, ResonanceType, STRICT_RESONANCE_TOLERANCE,
};

/// Snapshot of all derived quantities. Always rebuilt as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedState {
    /// Angular frequency (rad/s)
    pub omega: f64,
    /// Inductive reactance (Ohms); absent when the topology has no inductor
    #[serde(rename = "XL")]
    pub xl: Option<f64>,
    /// Capacitive reactance (Ohms); absent when the topology has no capacitor
    #[serde(rename = "XC")]
    pub xc: Option<f64>,
    /// Net reactance (Ohms)
    #[serde(rename = "X")]
    pub x: f64,
    /// Impedance magnitude (Ohms)
    #[serde(rename = "Z")]
    pub z: f64,
    /// RMS current (A)
    #[serde(rename = "I")]
    pub i: f64,
    /// Phase angle (rad)
    pub phi: f64,
    pub phi_deg: f64,
    pub power_factor: f64,
    pub power_factor_type: PowerFactorType,
    /// Real power (W)
    #[serde(rename = "P")]
    pub p: f64,
    /// Reactive power (VAR)
    #[serde(rename = "Q")]
    pub q: f64,
    /// Apparent power (VA)
    #[serde(rename = "S")]
    pub s: f64,
    pub is_resonant: bool,
    /// Only reported for RLC with both L and C positive
    pub resonant_frequency: Option<f64>,
    pub circuit_type: CircuitType,
    pub resonance_type: ResonanceType,
}

impl DerivedState {
    pub fn compute(params: &CircuitParameters) -> Self {
        let topology = params.topology();
        let r = params.resistance();
        let v = params.voltage();

        let omega = angular_frequency(params.frequency());
        let reactances = Reactances::compute(topology, params.inductance(), params.capacitance(), omega);
        let x = reactances.net();

        let z = impedance(r, x);
        let i = current(v, z);

        let phi = phase_angle(r, x);
        let phi_deg = to_degrees(phi);
        let power = PowerTriangle::compute(v, i, phi);

        let (is_resonant, f0) = if topology.supports_resonance() {
            (
                is_resonance(
                    reactances.inductive.unwrap_or(0.0),
                    reactances.capacitive.unwrap_or(0.0),
                    STRICT_RESONANCE_TOLERANCE,
                ),
                resonant_frequency(params.inductance(), params.capacitance()),
            )
        } else {
            (false, None)
        };

        Self {
            omega,
            xl: reactances.inductive,
            xc: reactances.capacitive,
            x,
            z,
            i,
            phi,
            phi_deg,
            power_factor: power_factor(phi),
            power_factor_type: PowerFactorType::from_phase_degrees(phi_deg),
            p: power.real,
            q: power.reactive,
            s: power.apparent,
            is_resonant,
            resonant_frequency: f0,
            circuit_type: CircuitType::classify(x, is_resonant),
            resonance_type: ResonanceType::from_reactance(x),
        }
    }

    /// Peak current, I·√2
    pub fn peak_current(&self) -> f64 {
        self.i * std::f64::consts::SQRT_2
    }
}
