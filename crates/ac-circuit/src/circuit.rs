//! Derivation orchestrator
//!
//! `Circuit` owns the primitive parameters and eagerly rebuilds the derived
//! state, the sweep and the waveform on every write, so the three outputs
//! always describe the current primitives. It does no locking of its own;
//! callers serialize writes.

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::analysis::DerivedState;
use crate::params::{CircuitParameters, Parameter};
use crate::sweep::{sweep_circuit, SweepDataset};
use crate::topology::Topology;
use crate::waveform::{generate_waveforms, WaveformDataset};
use crate::AnalysisConfig;

#[derive(Debug, Clone)]
pub struct Circuit {
    params: CircuitParameters,
    config: AnalysisConfig,
    derived: DerivedState,
    sweep: SweepDataset,
    waveform: WaveformDataset,
}

/// Owned copy of everything a collaborator may read
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub parameters: CircuitParameters,
    pub derived: DerivedState,
    pub sweep: SweepDataset,
    pub waveform: WaveformDataset,
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

impl Circuit {
    /// Circuit with the documented default parameters
    pub fn new() -> Self {
        Self::with_config(CircuitParameters::default(), AnalysisConfig::default())
    }

    pub fn with_parameters(params: CircuitParameters) -> Self {
        Self::with_config(params, AnalysisConfig::default())
    }

    pub fn with_config(params: CircuitParameters, config: AnalysisConfig) -> Self {
        let (derived, sweep, waveform) = derive_all(&params, &config);
        Self {
            params,
            config,
            derived,
            sweep,
            waveform,
        }
    }

    pub fn parameters(&self) -> &CircuitParameters {
        &self.params
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn derived(&self) -> &DerivedState {
        &self.derived
    }

    pub fn sweep(&self) -> &SweepDataset {
        &self.sweep
    }

    pub fn waveform(&self) -> &WaveformDataset {
        &self.waveform
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            parameters: self.params,
            derived: self.derived,
            sweep: self.sweep.clone(),
            waveform: self.waveform.clone(),
        }
    }

    pub fn set_resistance(&mut self, value: f64) {
        self.params.set_resistance(value);
        self.recompute();
    }

    pub fn set_inductance(&mut self, value: f64) {
        self.params.set_inductance(value);
        self.recompute();
    }

    pub fn set_capacitance(&mut self, value: f64) {
        self.params.set_capacitance(value);
        self.recompute();
    }

    pub fn set_voltage(&mut self, value: f64) {
        self.params.set_voltage(value);
        self.recompute();
    }

    pub fn set_frequency(&mut self, value: f64) {
        self.params.set_frequency(value);
        self.recompute();
    }

    pub fn set_topology(&mut self, topology: Topology) {
        self.params.set_topology(topology);
        self.recompute();
    }

    pub fn set(&mut self, parameter: Parameter, value: f64) {
        self.params.set(parameter, value);
        self.recompute();
    }

    /// Replace the analysis windows and rebuild the datasets
    pub fn set_config(&mut self, config: AnalysisConfig) {
        self.config = config;
        self.recompute();
    }

    /// Back to the documented defaults
    pub fn reset(&mut self) {
        self.params = CircuitParameters::default();
        self.recompute();
    }

    fn recompute(&mut self) {
        let (derived, sweep, waveform) = derive_all(&self.params, &self.config);
        self.derived = derived;
        self.sweep = sweep;
        self.waveform = waveform;
    }
}

fn derive_all(
    params: &CircuitParameters,
    config: &AnalysisConfig,
) -> (DerivedState, SweepDataset, WaveformDataset) {
    let _span = debug_span!("recompute", topology = %params.topology()).entered();

    let derived = DerivedState::compute(params);
    let sweep = sweep_circuit(params, &config.sweep);

    let f = params.frequency();
    let waveform = generate_waveforms(
        params.peak_voltage(),
        derived.peak_current(),
        derived.phi,
        f,
        config.waveform.duration(f),
        config.waveform.samples,
    );

    debug!(
        "Derived Z={:.4} Ohm, I={:.4} A, phi={:.3} deg, {} sweep points, {} waveform samples",
        derived.z,
        derived.i,
        derived.phi_deg,
        sweep.len(),
        waveform.len()
    );

    (derived, sweep, waveform)
}
