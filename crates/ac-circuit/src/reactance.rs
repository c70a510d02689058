//! Angular frequency and element reactances

use serde::Serialize;

use crate::math::{safe_divide, saturate, TWO_PI};
use crate::topology::Topology;

/// ω = 2πf, or 0 for non-positive f. Saturates at `f64::MAX`.
pub fn angular_frequency(frequency: f64) -> f64 {
    if frequency > 0.0 {
        saturate(TWO_PI * frequency)
    } else {
        0.0
    }
}

/// XL = ωL (Ohms), saturating at `f64::MAX`
pub fn inductive_reactance(inductance: f64, omega: f64) -> f64 {
    if inductance > 0.0 && omega > 0.0 {
        saturate(omega * inductance)
    } else {
        0.0
    }
}

/// XC = 1/(ωC) (Ohms). Never infinite: a missing capacitor or zero ω gives 0.
pub fn capacitive_reactance(capacitance: f64, omega: f64) -> f64 {
    if capacitance > 0.0 && omega > 0.0 {
        saturate(safe_divide(1.0, omega * capacitance, 0.0))
    } else {
        0.0
    }
}

/// X = XL - XC. Positive is net inductive, negative net capacitive.
pub fn net_reactance(xl: f64, xc: f64) -> f64 {
    xl - xc
}

/// Per-element reactances for one frequency, gated by topology.
/// `None` means the element is not part of the circuit, which is distinct
/// from an element whose reactance happens to be zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reactances {
    pub inductive: Option<f64>,
    pub capacitive: Option<f64>,
}

impl Reactances {
    pub fn compute(topology: Topology, inductance: f64, capacitance: f64, omega: f64) -> Self {
        let inductive = topology
            .has_inductor()
            .then(|| inductive_reactance(inductance, omega));
        let capacitive = topology
            .has_capacitor()
            .then(|| capacitive_reactance(capacitance, omega));
        Self { inductive, capacitive }
    }

    /// Net reactance, inactive elements counting as 0
    pub fn net(&self) -> f64 {
        net_reactance(self.inductive.unwrap_or(0.0), self.capacitive.unwrap_or(0.0))
    }
}
