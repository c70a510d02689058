//! ac-circuit: steady-state and time-domain analysis of single-frequency AC circuits
//!
//! This crate provides:
//! - Primitive parameters (R, L, C, V, f, topology) with clamping setters
//! - The derivation pipeline: reactance, impedance, current, phase, power
//!   and resonance
//! - A log-spaced frequency-response sweep
//! - Sampled voltage/current waveforms
//! - `Circuit`, which owns the parameters and keeps every derived output
//!   current
//!
//! Every stage is total: degenerate input produces 0, an empty dataset or
//! an absent value, never a panic or a NaN. Overflowing reactances saturate
//! at `f64::MAX`.

pub mod analysis;
pub mod circuit;
pub mod error;
pub mod impedance;
pub mod math;
pub mod params;
pub mod phase;
pub mod power;
pub mod reactance;
pub mod resonance;
pub mod sweep;
pub mod topology;
pub mod waveform;

pub use analysis::DerivedState;
pub use circuit::{Circuit, Snapshot};
pub use error::CircuitError;
pub use params::{CircuitParameters, Parameter, MIN_FREQUENCY};
pub use phase::PowerFactorType;
pub use resonance::{CircuitType, ResonanceType};
pub use sweep::{generate_frequency_sweep, SweepConfig, SweepDataset, MAX_SWEEP_POINTS};
pub use topology::Topology;
pub use waveform::{generate_waveforms, WaveformConfig, WaveformDataset, MAX_WAVEFORM_SAMPLES};

use serde::{Deserialize, Serialize};

/// Windows for the two generated datasets
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub sweep: SweepConfig,
    pub waveform: WaveformConfig,
}

/// One-shot analysis of a parameter set with the default windows
pub fn analyze(params: CircuitParameters) -> Snapshot {
    Circuit::with_parameters(params).snapshot()
}
