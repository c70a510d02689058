use ac_circuit::impedance::{current, impedance};
use ac_circuit::phase::phase_angle;
use ac_circuit::reactance::{angular_frequency, capacitive_reactance, inductive_reactance};
use ac_circuit::resonance::{resonant_frequency, STRICT_RESONANCE_TOLERANCE};
use ac_circuit::{
    analyze, generate_frequency_sweep, generate_waveforms, AnalysisConfig, Circuit, CircuitParameters,
    CircuitType, PowerFactorType, Snapshot, SweepConfig, Topology, WaveformConfig,
};
use approx::{assert_abs_diff_eq, assert_relative_eq};
use std::f64::consts::FRAC_PI_2;

#[test]
fn test_reference_rlc_circuit() {
    let snapshot = analyze(CircuitParameters::new(10.0, 0.1, 0.0001, 230.0, 50.0, Topology::Rlc));
    let d = snapshot.derived;

    assert_abs_diff_eq!(d.omega, 314.16, epsilon = 0.01);
    assert_abs_diff_eq!(d.xl.unwrap(), 31.42, epsilon = 0.01);
    assert_abs_diff_eq!(d.xc.unwrap(), 31.83, epsilon = 0.01);
    assert_abs_diff_eq!(d.x, -0.41, epsilon = 0.01);
    assert_abs_diff_eq!(d.z, 10.01, epsilon = 0.01);
    assert_abs_diff_eq!(d.i, 22.98, epsilon = 0.01);
    assert_abs_diff_eq!(d.phi_deg, -2.38, epsilon = 0.01);
    assert_eq!(d.power_factor_type, PowerFactorType::Leading);
    assert_eq!(d.circuit_type, CircuitType::Capacitive);
}

#[test]
fn test_resonance_round_trip() {
    let f0 = resonant_frequency(0.1, 0.0001).unwrap();
    assert_abs_diff_eq!(f0, 50.33, epsilon = 0.01);

    let mut circuit = Circuit::new();
    circuit.set_frequency(50.33);
    let d = circuit.derived();

    assert!((d.xl.unwrap() - d.xc.unwrap()).abs() <= STRICT_RESONANCE_TOLERANCE);
    assert!(d.is_resonant);
    assert_eq!(d.circuit_type, CircuitType::Resonant);
    assert_relative_eq!(d.resonant_frequency.unwrap(), f0);
}

#[test]
fn test_topology_gating_rlc_to_r() {
    let mut circuit = Circuit::new();
    circuit.set_topology(Topology::R);
    let d = circuit.derived();

    assert_eq!(d.xl, None);
    assert_eq!(d.xc, None);
    assert_eq!(d.x, 0.0);
    assert_eq!(d.z, 10.0);
    assert_relative_eq!(d.i, 230.0 / 10.0);
    assert_eq!(d.circuit_type, CircuitType::Resistive);
}

#[test]
fn test_impedance_and_current_properties() {
    for r in [0.0, 0.5, 10.0, 1e4] {
        for x in [-1e3, -1.0, 0.0, 2.0, 5e5] {
            let z = impedance(r, x);
            assert!(z >= r);
            assert_eq!(z == r, x == 0.0, "Z=R iff X=0 (R={}, X={})", r, x);
            if z > 0.0 {
                assert_relative_eq!(current(230.0, z) * z, 230.0, max_relative = 1e-12);
            }
        }
    }
    assert_eq!(current(230.0, 0.0), 0.0);
}

#[test]
fn test_zero_resistance_phase() {
    assert_eq!(phase_angle(0.0, 3.0), FRAC_PI_2);
    assert_eq!(phase_angle(0.0, -3.0), -FRAC_PI_2);
    assert_eq!(phase_angle(0.0, 0.0), 0.0);
}

#[test]
fn test_sweep_properties() {
    let sweep = generate_frequency_sweep(10.0, 0.1, 1e-4, 230.0, Topology::Rlc, 10.0, 500.0, 200);
    assert_eq!(sweep.len(), 200);
    assert!(sweep.frequencies.windows(2).all(|w| w[0] < w[1]));

    // Every sample agrees with a pointwise evaluation
    for p in sweep.points().step_by(37) {
        let omega = angular_frequency(p.frequency);
        let x = inductive_reactance(0.1, omega) - capacitive_reactance(1e-4, omega);
        assert_relative_eq!(p.impedance, impedance(10.0, x), max_relative = 1e-12);
    }

    assert!(generate_frequency_sweep(10.0, 0.1, 1e-4, 230.0, Topology::Rlc, 500.0, 10.0, 200).is_empty());
    assert!(generate_frequency_sweep(10.0, 0.1, 1e-4, 230.0, Topology::Rlc, 10.0, 500.0, 1).is_empty());
}

#[test]
fn test_waveform_properties() {
    let phi = 0.7;
    let wave = generate_waveforms(325.27, 10.0, phi, 50.0, 0.04, 600);

    assert_eq!(wave.len(), 600);
    assert_eq!(wave.voltage[0], 0.0);
    assert_relative_eq!(wave.current[0], 10.0 * (-phi).sin());

    assert!(generate_waveforms(325.27, 10.0, phi, 50.0, 0.0, 600).is_empty());
    assert!(generate_waveforms(325.27, 10.0, phi, 50.0, 0.04, 1).is_empty());
}

fn assert_all_finite(snapshot: &Snapshot) {
    let d = &snapshot.derived;
    for value in [d.omega, d.x, d.z, d.i, d.phi, d.phi_deg, d.power_factor, d.p, d.q, d.s] {
        assert!(value.is_finite(), "Non-finite derived value in {:?}", d);
    }
    assert!(d.xl.map_or(true, f64::is_finite));
    assert!(d.xc.map_or(true, f64::is_finite));
    assert!(snapshot.sweep.impedances.iter().all(|z| z.is_finite()));
    assert!(snapshot.sweep.currents.iter().all(|i| i.is_finite()));
    assert!(snapshot.waveform.voltage.iter().all(|v| v.is_finite()));
    assert!(snapshot.waveform.current.iter().all(|i| i.is_finite()));
    if let Some(&v0) = snapshot.waveform.voltage.first() {
        assert_eq!(v0, 0.0);
    }
}

#[test]
fn test_degenerate_inputs_stay_finite() {
    let mut circuit = Circuit::new();
    circuit.set_resistance(0.0);
    circuit.set_inductance(0.0);
    circuit.set_capacitance(0.0);
    circuit.set_voltage(-12.0);
    circuit.set_frequency(-1.0);

    let snapshot = circuit.snapshot();
    assert_all_finite(&snapshot);
    assert_eq!(snapshot.waveform.len(), 600);
}

#[test]
fn test_subnormal_impedance_stays_finite() {
    let mut circuit = Circuit::new();
    circuit.set_topology(Topology::Rl);
    circuit.set_resistance(0.0);
    circuit.set_inductance(1e-320);

    let snapshot = circuit.snapshot();
    assert!(snapshot.derived.z > 0.0);
    assert_eq!(snapshot.derived.i, 0.0);
    assert_all_finite(&snapshot);
    assert_eq!(snapshot.waveform.len(), 600);
}

#[test]
fn test_huge_values_stay_finite() {
    let mut circuit = Circuit::new();
    circuit.set_voltage(f64::MAX);
    assert_all_finite(&circuit.snapshot());
    assert!(circuit.waveform().is_empty());

    let mut circuit = Circuit::new();
    circuit.set_frequency(f64::INFINITY);
    assert_eq!(circuit.parameters().frequency(), f64::MAX);
    assert_all_finite(&circuit.snapshot());
    assert!(circuit.derived().z > 1e300);

    let mut circuit = Circuit::new();
    circuit.set_inductance(f64::INFINITY);
    assert_all_finite(&circuit.snapshot());
}

#[test]
fn test_oversized_sample_counts_give_empty_datasets() {
    let config = AnalysisConfig {
        sweep: SweepConfig {
            points: usize::MAX,
            ..SweepConfig::default()
        },
        waveform: WaveformConfig {
            samples: usize::MAX,
            ..WaveformConfig::default()
        },
    };
    let circuit = Circuit::with_config(CircuitParameters::default(), config);

    assert!(circuit.sweep().is_empty());
    assert!(circuit.waveform().is_empty());
    assert_relative_eq!(circuit.derived().z, 10.0086, epsilon = 1e-3);
}
