//! Time-domain voltage and current traces
//!
//! v(t) = V_peak·sin(ωt), i(t) = I_peak·sin(ωt − φ), sampled uniformly over
//! a window that starts at t = 0.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::math::TWO_PI;

/// Upper bound on samples per trace; larger requests give an empty dataset
pub const MAX_WAVEFORM_SAMPLES: usize = 1_000_000;

/// Sampling window, expressed in source cycles so it scales with f
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveformConfig {
    /// Number of source periods covered
    pub cycles: f64,
    /// Number of samples, endpoints included
    pub samples: usize,
}

impl Default for WaveformConfig {
    fn default() -> Self {
        Self {
            cycles: 2.0,
            samples: 600,
        }
    }
}

impl WaveformConfig {
    /// Window length in seconds at `frequency`, or 0 if it is not positive
    pub fn duration(&self, frequency: f64) -> f64 {
        if frequency > 0.0 {
            self.cycles / frequency
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WaveformDataset {
    /// Sample times (s)
    pub time: Vec<f64>,
    /// Instantaneous voltage (V)
    pub voltage: Vec<f64>,
    /// Instantaneous current (A)
    pub current: Vec<f64>,
}

impl WaveformDataset {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// A single sampled trace
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trace {
    pub time: Vec<f64>,
    pub values: Vec<f64>,
}

fn sample_times(duration: f64, samples: usize) -> impl Iterator<Item = f64> {
    let dt = duration / (samples - 1) as f64;
    (0..samples).map(move |k| k as f64 * dt)
}

fn window_is_valid(frequency: f64, duration: f64, samples: usize) -> bool {
    (TWO_PI * frequency).is_finite()
        && duration.is_finite()
        && frequency > 0.0
        && duration > 0.0
        && (2..=MAX_WAVEFORM_SAMPLES).contains(&samples)
}

fn peak_is_valid(peak: f64) -> bool {
    peak.is_finite() && peak >= 0.0
}

/// Sample the voltage/current pair.
///
/// `phi` is in radians; positive φ makes the current lag the voltage.
/// Invalid inputs give an empty dataset.
pub fn generate_waveforms(
    v_peak: f64,
    i_peak: f64,
    phi: f64,
    frequency: f64,
    duration: f64,
    samples: usize,
) -> WaveformDataset {
    if !peak_is_valid(v_peak)
        || !peak_is_valid(i_peak)
        || !phi.is_finite()
        || !window_is_valid(frequency, duration, samples)
    {
        debug!(v_peak, i_peak, frequency, duration, samples, "Rejected waveform window, returning empty dataset");
        return WaveformDataset::default();
    }

    let omega = TWO_PI * frequency;
    let mut wave = WaveformDataset {
        time: Vec::with_capacity(samples),
        voltage: Vec::with_capacity(samples),
        current: Vec::with_capacity(samples),
    };

    for t in sample_times(duration, samples) {
        let wt = omega * t;
        wave.time.push(t);
        wave.voltage.push(v_peak * wt.sin());
        wave.current.push(i_peak * (wt - phi).sin());
    }
    wave
}

/// Voltage trace alone
pub fn generate_voltage_waveform(v_peak: f64, frequency: f64, duration: f64, samples: usize) -> Trace {
    if !peak_is_valid(v_peak) || !window_is_valid(frequency, duration, samples) {
        return Trace::default();
    }
    let omega = TWO_PI * frequency;
    let time: Vec<f64> = sample_times(duration, samples).collect();
    let values = time.iter().map(|t| v_peak * (omega * t).sin()).collect();
    Trace { time, values }
}

/// Current trace alone
pub fn generate_current_waveform(
    i_peak: f64,
    frequency: f64,
    phi: f64,
    duration: f64,
    samples: usize,
) -> Trace {
    if !peak_is_valid(i_peak) || !phi.is_finite() || !window_is_valid(frequency, duration, samples) {
        return Trace::default();
    }
    let omega = TWO_PI * frequency;
    let time: Vec<f64> = sample_times(duration, samples).collect();
    let values = time.iter().map(|t| i_peak * (omega * t - phi).sin()).collect();
    Trace { time, values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_waveform_structure() {
        let wave = generate_waveforms(325.0, 32.5, 0.3, 50.0, 0.04, 600);

        assert_eq!(wave.len(), 600);
        assert_eq!(wave.voltage.len(), 600);
        assert_eq!(wave.current.len(), 600);
        assert_eq!(wave.time[0], 0.0);
        assert_relative_eq!(wave.time[599], 0.04, max_relative = 1e-12);
    }

    #[test]
    fn test_initial_samples() {
        let phi = -0.0415;
        let wave = generate_waveforms(325.0, 32.5, phi, 50.0, 0.04, 600);

        assert_eq!(wave.voltage[0], 0.0);
        assert_relative_eq!(wave.current[0], 32.5 * (-phi).sin());
    }

    #[test]
    fn test_uniform_time_step() {
        let wave = generate_waveforms(1.0, 1.0, 0.0, 1000.0, 0.002, 11);
        for w in wave.time.windows(2) {
            assert_relative_eq!(w[1] - w[0], 0.0002, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_peaks_bounded() {
        let wave = generate_waveforms(10.0, 2.0, 1.0, 60.0, 2.0 / 60.0, 600);
        assert!(wave.voltage.iter().all(|v| v.abs() <= 10.0 + 1e-12));
        assert!(wave.current.iter().all(|i| i.abs() <= 2.0 + 1e-12));
        let v_max = wave.voltage.iter().cloned().fold(f64::MIN, f64::max);
        assert!(v_max > 9.99, "Two full cycles should reach the peak, got {}", v_max);
    }

    #[test]
    fn test_lagging_current_crosses_zero_later() {
        // φ = π/2: current is -cos(ωt), voltage zero crossing leads by a quarter period
        let wave = generate_waveforms(1.0, 1.0, std::f64::consts::FRAC_PI_2, 1.0, 1.0, 5);
        assert_relative_eq!(wave.current[0], -1.0);
        assert_relative_eq!(wave.voltage[1], 1.0);
        assert!(wave.current[1].abs() < 1e-12);
    }

    #[test]
    fn test_invalid_windows_yield_empty() {
        assert!(generate_waveforms(1.0, 1.0, 0.0, 50.0, 0.0, 600).is_empty());
        assert!(generate_waveforms(1.0, 1.0, 0.0, 50.0, 0.04, 1).is_empty());
        assert!(generate_waveforms(1.0, 1.0, 0.0, 0.0, 0.04, 600).is_empty());
        assert!(generate_waveforms(-1.0, 1.0, 0.0, 50.0, 0.04, 600).is_empty());
        assert!(generate_waveforms(1.0, -1.0, 0.0, 50.0, 0.04, 600).is_empty());
        assert!(generate_waveforms(1.0, 1.0, 0.0, 50.0, -0.04, 600).is_empty());
    }

    #[test]
    fn test_non_finite_inputs_yield_empty() {
        let inf = f64::INFINITY;
        assert!(generate_waveforms(inf, 1.0, 0.0, 50.0, 0.04, 600).is_empty());
        assert!(generate_waveforms(1.0, inf, 0.0, 50.0, 0.04, 600).is_empty());
        assert!(generate_waveforms(1.0, 1.0, f64::NAN, 50.0, 0.04, 600).is_empty());
        assert!(generate_waveforms(1.0, 1.0, 0.0, f64::MAX, 0.04, 600).is_empty());
        assert!(generate_voltage_waveform(inf, 50.0, 0.04, 600).values.is_empty());
        assert!(generate_current_waveform(inf, 50.0, 0.0, 0.04, 600).values.is_empty());
    }

    #[test]
    fn test_oversized_sample_count_yields_empty() {
        assert!(generate_waveforms(1.0, 1.0, 0.0, 50.0, 0.04, usize::MAX).is_empty());
        assert!(generate_voltage_waveform(1.0, 50.0, 0.04, MAX_WAVEFORM_SAMPLES + 1).values.is_empty());
        assert_eq!(generate_waveforms(1.0, 1.0, 0.0, 50.0, 0.04, MAX_WAVEFORM_SAMPLES).len(), MAX_WAVEFORM_SAMPLES);
    }

    #[test]
    fn test_single_traces_match_pair() {
        let pair = generate_waveforms(10.0, 3.0, 0.4, 50.0, 0.04, 64);
        let v = generate_voltage_waveform(10.0, 50.0, 0.04, 64);
        let i = generate_current_waveform(3.0, 50.0, 0.4, 0.04, 64);

        assert_eq!(v.time, pair.time);
        assert_eq!(v.values, pair.voltage);
        assert_eq!(i.values, pair.current);

        assert!(generate_voltage_waveform(10.0, 50.0, 0.04, 0).values.is_empty());
        assert!(generate_current_waveform(-3.0, 50.0, 0.4, 0.04, 64).values.is_empty());
    }

    #[test]
    fn test_duration_from_cycles() {
        let config = WaveformConfig::default();
        assert_relative_eq!(config.duration(50.0), 0.04);
        assert_eq!(config.duration(0.0), 0.0);
    }
}
