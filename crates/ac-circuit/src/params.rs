//! Primitive circuit parameters
//!
//! Fields are private: the only way in is through the clamping setters, so
//! an out-of-domain value can never be observed.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CircuitError;
use crate::math::clamp_min;
use crate::topology::Topology;

/// Lowest accepted source frequency (Hz). Zero and negative frequencies are
/// physically degenerate for a steady-state AC analysis.
pub const MIN_FREQUENCY: f64 = 0.1;

pub const DEFAULT_RESISTANCE: f64 = 10.0;
pub const DEFAULT_INDUCTANCE: f64 = 0.1;
pub const DEFAULT_CAPACITANCE: f64 = 100e-6;
pub const DEFAULT_VOLTAGE: f64 = 230.0;
pub const DEFAULT_FREQUENCY: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CircuitParameters {
    /// Resistance (Ohms)
    #[serde(rename = "R")]
    resistance: f64,
    /// Inductance (H)
    #[serde(rename = "L")]
    inductance: f64,
    /// Capacitance (F)
    #[serde(rename = "C")]
    capacitance: f64,
    /// Source RMS voltage (V)
    #[serde(rename = "V")]
    voltage: f64,
    /// Source frequency (Hz)
    #[serde(rename = "f")]
    frequency: f64,
    topology: Topology,
}

impl Default for CircuitParameters {
    fn default() -> Self {
        Self {
            resistance: DEFAULT_RESISTANCE,
            inductance: DEFAULT_INDUCTANCE,
            capacitance: DEFAULT_CAPACITANCE,
            voltage: DEFAULT_VOLTAGE,
            frequency: DEFAULT_FREQUENCY,
            topology: Topology::Rlc,
        }
    }
}

impl CircuitParameters {
    /// Build a parameter set, clamping every value into its domain
    pub fn new(
        resistance: f64,
        inductance: f64,
        capacitance: f64,
        voltage: f64,
        frequency: f64,
        topology: Topology,
    ) -> Self {
        let mut params = Self::default();
        params.set_resistance(resistance);
        params.set_inductance(inductance);
        params.set_capacitance(capacitance);
        params.set_voltage(voltage);
        params.set_frequency(frequency);
        params.set_topology(topology);
        params
    }

    pub fn resistance(&self) -> f64 {
        self.resistance
    }

    pub fn inductance(&self) -> f64 {
        self.inductance
    }

    pub fn capacitance(&self) -> f64 {
        self.capacitance
    }

    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Peak source voltage, V·√2
    pub fn peak_voltage(&self) -> f64 {
        self.voltage * std::f64::consts::SQRT_2
    }

    pub fn set_resistance(&mut self, value: f64) {
        self.resistance = clamp_min(value, 0.0);
    }

    pub fn set_inductance(&mut self, value: f64) {
        self.inductance = clamp_min(value, 0.0);
    }

    pub fn set_capacitance(&mut self, value: f64) {
        self.capacitance = clamp_min(value, 0.0);
    }

    pub fn set_voltage(&mut self, value: f64) {
        self.voltage = clamp_min(value, 0.0);
    }

    pub fn set_frequency(&mut self, value: f64) {
        self.frequency = clamp_min(value, MIN_FREQUENCY);
    }

    pub fn set_topology(&mut self, topology: Topology) {
        self.topology = topology;
    }

    /// Route a numeric write by parameter name
    pub fn set(&mut self, parameter: Parameter, value: f64) {
        match parameter {
            Parameter::Resistance => self.set_resistance(value),
            Parameter::Inductance => self.set_inductance(value),
            Parameter::Capacitance => self.set_capacitance(value),
            Parameter::Voltage => self.set_voltage(value),
            Parameter::Frequency => self.set_frequency(value),
        }
    }

    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Resistance => self.resistance,
            Parameter::Inductance => self.inductance,
            Parameter::Capacitance => self.capacitance,
            Parameter::Voltage => self.voltage,
            Parameter::Frequency => self.frequency,
        }
    }
}

/// Numeric primitives addressable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Resistance,
    Inductance,
    Capacitance,
    Voltage,
    Frequency,
}

impl Parameter {
    pub fn symbol(&self) -> &'static str {
        match self {
            Parameter::Resistance => "R",
            Parameter::Inductance => "L",
            Parameter::Capacitance => "C",
            Parameter::Voltage => "V",
            Parameter::Frequency => "f",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Parameter {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "R" | "r" | "resistance" => Ok(Parameter::Resistance),
            "L" | "l" | "inductance" => Ok(Parameter::Inductance),
            "C" | "c" | "capacitance" => Ok(Parameter::Capacitance),
            "V" | "v" | "voltage" => Ok(Parameter::Voltage),
            "F" | "f" | "frequency" => Ok(Parameter::Frequency),
            _ => Err(CircuitError::UnknownParameter(s.to_string())),
        }
    }
}
