//! JSON and CSV writers for the CLI

use std::io::Write;

use anyhow::{bail, Result};
use clap::ValueEnum;
use serde::Serialize;

use ac_circuit::{Circuit, CircuitParameters, DerivedState, SweepDataset, WaveformDataset};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    /// Parameters and derived scalar quantities
    State,
    /// Frequency-response sweep
    Sweep,
    /// Time-domain voltage and current
    Waveform,
    /// Everything
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Csv,
}

#[derive(Serialize)]
struct StateReport<'a> {
    parameters: &'a CircuitParameters,
    derived: &'a DerivedState,
}

pub fn write_section<W: Write>(writer: W, circuit: &Circuit, section: Section, format: Format) -> Result<()> {
    match (format, section) {
        (Format::Json, Section::State) => write_json(
            writer,
            &StateReport {
                parameters: circuit.parameters(),
                derived: circuit.derived(),
            },
        ),
        (Format::Json, Section::Sweep) => write_json(writer, circuit.sweep()),
        (Format::Json, Section::Waveform) => write_json(writer, circuit.waveform()),
        (Format::Json, Section::All) => write_json(writer, &circuit.snapshot()),
        (Format::Csv, Section::Sweep) => write_sweep_csv(writer, circuit.sweep()),
        (Format::Csv, Section::Waveform) => write_waveform_csv(writer, circuit.waveform()),
        (Format::Csv, other) => bail!("CSV output supports the sweep and waveform sections, not {:?}", other),
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_sweep_csv<W: Write>(writer: W, sweep: &SweepDataset) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["frequency_hz", "impedance_ohm", "current_a"])?;
    for p in sweep.points() {
        csv.serialize((p.frequency, p.impedance, p.current))?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_waveform_csv<W: Write>(writer: W, wave: &WaveformDataset) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["time_s", "voltage_v", "current_a"])?;
    for ((t, v), i) in wave.time.iter().zip(&wave.voltage).zip(&wave.current) {
        csv.serialize((t, v, i))?;
    }
    csv.flush()?;
    Ok(())
}
