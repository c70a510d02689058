//! Wire protocol between the server and its display clients
//!
//! Client -> server: JSON text commands, one setter per message.
//! Server -> client: a JSON text frame with parameters and derived state,
//! followed by one binary frame per dataset.

use ac_circuit::{Circuit, CircuitParameters, DerivedState, Parameter, SweepDataset, Topology, WaveformDataset};
use serde::{Deserialize, Serialize};

pub const SWEEP_MAGIC: &[u8; 8] = b"SWEEP\0\0\0";
pub const WAVEFORM_MAGIC: &[u8; 8] = b"WAVEFORM";

/// Writes accepted from clients
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    #[serde(rename = "setR")]
    SetResistance { value: f64 },
    #[serde(rename = "setL")]
    SetInductance { value: f64 },
    #[serde(rename = "setC")]
    SetCapacitance { value: f64 },
    #[serde(rename = "setV")]
    SetVoltage { value: f64 },
    #[serde(rename = "setF")]
    SetFrequency { value: f64 },
    SetTopology { topology: Topology },
    Reset,
}

impl Command {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The numeric primitive this command writes, if any
    pub fn write(&self) -> Option<(Parameter, f64)> {
        match *self {
            Command::SetResistance { value } => Some((Parameter::Resistance, value)),
            Command::SetInductance { value } => Some((Parameter::Inductance, value)),
            Command::SetCapacitance { value } => Some((Parameter::Capacitance, value)),
            Command::SetVoltage { value } => Some((Parameter::Voltage, value)),
            Command::SetFrequency { value } => Some((Parameter::Frequency, value)),
            Command::SetTopology { .. } | Command::Reset => None,
        }
    }

    /// Apply to the circuit. Values are clamped by the circuit's setters.
    pub fn apply(&self, circuit: &mut Circuit) {
        match *self {
            Command::SetTopology { topology } => circuit.set_topology(topology),
            Command::Reset => circuit.reset(),
            _ => {
                if let Some((parameter, value)) = self.write() {
                    circuit.set(parameter, value);
                }
            }
        }
    }
}

/// Outgoing WebSocket frame, independent of the socket library
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum ServerMessage<'a> {
    State {
        parameters: &'a CircuitParameters,
        derived: &'a DerivedState,
    },
    Error {
        message: String,
    },
}

pub fn encode_state(circuit: &Circuit) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ServerMessage::State {
        parameters: circuit.parameters(),
        derived: circuit.derived(),
    })
}

pub fn encode_error(message: impl Into<String>) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ServerMessage::Error {
        message: message.into(),
    })
}

fn encode_arrays(magic: &[u8; 8], arrays: [&[f64]; 3]) -> Vec<u8> {
    let len = arrays[0].len();
    let mut data = Vec::with_capacity(12 + 3 * 4 * len);

    data.extend_from_slice(magic);
    data.extend_from_slice(&(len as u32).to_le_bytes());

    for array in arrays {
        for &value in array {
            data.extend_from_slice(&(value as f32).to_le_bytes());
        }
    }
    data
}

/// Header, point count, then frequencies, impedances, currents as f32
pub fn encode_sweep(sweep: &SweepDataset) -> Vec<u8> {
    encode_arrays(
        SWEEP_MAGIC,
        [
            sweep.frequencies.as_slice(),
            sweep.impedances.as_slice(),
            sweep.currents.as_slice(),
        ],
    )
}

/// Header, sample count, then time, voltage, current as f32
pub fn encode_waveform(wave: &WaveformDataset) -> Vec<u8> {
    encode_arrays(
        WAVEFORM_MAGIC,
        [wave.time.as_slice(), wave.voltage.as_slice(), wave.current.as_slice()],
    )
}

/// Everything a client needs to redraw
pub fn snapshot_frames(circuit: &Circuit) -> Result<Vec<Frame>, serde_json::Error> {
    Ok(vec![
        Frame::Text(encode_state(circuit)?),
        Frame::Binary(encode_sweep(circuit.sweep())),
        Frame::Binary(encode_waveform(circuit.waveform())),
    ])
}
