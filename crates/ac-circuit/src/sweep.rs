//! Frequency-response sweep: impedance and current over a log-spaced range
//!
//! Resonance peaks and nulls span decades, so samples are spread evenly in
//! log10(f) rather than in f.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::impedance::{current, impedance};
use crate::params::CircuitParameters;
use crate::reactance::{angular_frequency, capacitive_reactance, inductive_reactance, net_reactance};
use crate::topology::Topology;

/// Upper bound on sweep samples; larger requests give an empty dataset
pub const MAX_SWEEP_POINTS: usize = 1_000_000;

/// Sweep window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepConfig {
    /// Lowest swept frequency (Hz)
    pub f_min: f64,
    /// Highest swept frequency (Hz)
    pub f_max: f64,
    /// Number of samples, endpoints included
    pub points: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            f_min: 10.0,
            f_max: 500.0,
            points: 200,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SweepDataset {
    /// Frequencies (Hz), strictly increasing
    pub frequencies: Vec<f64>,
    /// Impedance magnitude (Ohms)
    pub impedances: Vec<f64>,
    /// RMS current (A)
    pub currents: Vec<f64>,
}

/// One sample of a sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub frequency: f64,
    pub impedance: f64,
    pub current: f64,
}

impl SweepDataset {
    fn with_capacity(n: usize) -> Self {
        Self {
            frequencies: Vec::with_capacity(n),
            impedances: Vec::with_capacity(n),
            currents: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = SweepPoint> + '_ {
        self.frequencies
            .iter()
            .zip(&self.impedances)
            .zip(&self.currents)
            .map(|((&frequency, &impedance), &current)| SweepPoint {
                frequency,
                impedance,
                current,
            })
    }

    /// Sample with the smallest impedance (series resonance dip)
    pub fn min_impedance(&self) -> Option<SweepPoint> {
        self.points()
            .min_by(|a, b| a.impedance.total_cmp(&b.impedance))
    }
}

/// `count` values spread evenly in log10 between `first` and `last`
pub fn log_space(first: f64, last: f64, count: usize) -> impl Iterator<Item = f64> {
    let (lf, ll) = (first.log10(), last.log10());
    let step = if count > 1 {
        (ll - lf) / (count - 1) as f64
    } else {
        0.0
    };
    (0..count).map(move |i| 10f64.powf(lf + i as f64 * step))
}

/// Sweep impedance and current over `[f_min, f_max]`.
///
/// Reactances are recomputed at every sample from the primitives; inactive
/// elements count as zero. Invalid inputs give an empty dataset.
#[allow(clippy::too_many_arguments)]
pub fn generate_frequency_sweep(
    resistance: f64,
    inductance: f64,
    capacitance: f64,
    voltage: f64,
    topology: Topology,
    f_min: f64,
    f_max: f64,
    points: usize,
) -> SweepDataset {
    let valid = f_min.is_finite()
        && f_max.is_finite()
        && f_min > 0.0
        && f_max > 0.0
        && (2..=MAX_SWEEP_POINTS).contains(&points)
        && voltage >= 0.0
        && resistance >= 0.0
        && f_min < f_max;
    if !valid {
        debug!(f_min, f_max, points, "Rejected sweep range, returning empty dataset");
        return SweepDataset::default();
    }

    let mut sweep = SweepDataset::with_capacity(points);
    for frequency in log_space(f_min, f_max, points) {
        let omega = angular_frequency(frequency);

        let xl = match topology {
            Topology::Rl | Topology::Rlc => inductive_reactance(inductance, omega),
            Topology::R | Topology::Rc => 0.0,
        };
        let xc = match topology {
            Topology::Rc | Topology::Rlc => capacitive_reactance(capacitance, omega),
            Topology::R | Topology::Rl => 0.0,
        };

        let z = impedance(resistance, net_reactance(xl, xc));
        sweep.frequencies.push(frequency);
        sweep.impedances.push(z);
        sweep.currents.push(current(voltage, z));
    }
    sweep
}

/// Sweep the given circuit over a configured window
pub fn sweep_circuit(params: &CircuitParameters, config: &SweepConfig) -> SweepDataset {
    generate_frequency_sweep(
        params.resistance(),
        params.inductance(),
        params.capacitance(),
        params.voltage(),
        params.topology(),
        config.f_min,
        config.f_max,
        config.points,
    )
}
