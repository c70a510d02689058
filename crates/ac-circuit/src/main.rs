//! ac-circuit: CLI for analyzing a single-frequency R/RL/RC/RLC circuit

mod export;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use ac_circuit::{AnalysisConfig, Circuit, CircuitError, CircuitParameters, Parameter, SweepConfig, Topology, WaveformConfig};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};

use export::{write_section, Format, Section};

#[derive(Parser, Debug)]
#[command(name = "ac-circuit")]
#[command(about = "Steady-state and time-domain analysis of an AC R/RL/RC/RLC circuit")]
#[command(version)]
struct Args {
    /// Resistance in Ohms
    #[arg(short = 'R', long, default_value = "10")]
    resistance: f64,

    /// Inductance in H
    #[arg(short = 'L', long, default_value = "0.1")]
    inductance: f64,

    /// Capacitance in F
    #[arg(short = 'C', long, default_value = "0.0001")]
    capacitance: f64,

    /// Source RMS voltage in V (-V is --version)
    #[arg(short = 'U', long, default_value = "230")]
    voltage: f64,

    /// Source frequency in Hz
    #[arg(short = 'f', long, default_value = "50")]
    frequency: f64,

    /// Circuit topology (R, RL, RC, RLC)
    #[arg(short = 't', long, default_value = "RLC")]
    topology: Topology,

    /// Extra parameter writes applied in order after the flags above, e.g. `--set f=60`
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    assignments: Vec<(Parameter, f64)>,

    /// Lowest swept frequency in Hz
    #[arg(long, default_value = "10")]
    sweep_min: f64,

    /// Highest swept frequency in Hz
    #[arg(long, default_value = "500")]
    sweep_max: f64,

    /// Number of sweep points
    #[arg(long, default_value = "200")]
    sweep_points: usize,

    /// Source cycles covered by the waveform
    #[arg(long, default_value = "2")]
    cycles: f64,

    /// Number of waveform samples
    #[arg(long, default_value = "600")]
    samples: usize,

    /// What to output
    #[arg(long, value_enum, default_value = "state")]
    section: Section,

    /// Output format (CSV only for sweep and waveform)
    #[arg(long, value_enum, default_value = "json")]
    format: Format,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log pipeline details to stderr
    #[arg(long)]
    verbose: bool,
}

impl Args {
    fn circuit(&self) -> Circuit {
        let params = CircuitParameters::new(
            self.resistance,
            self.inductance,
            self.capacitance,
            self.voltage,
            self.frequency,
            self.topology,
        );
        let config = AnalysisConfig {
            sweep: SweepConfig {
                f_min: self.sweep_min,
                f_max: self.sweep_max,
                points: self.sweep_points,
            },
            waveform: WaveformConfig {
                cycles: self.cycles,
                samples: self.samples,
            },
        };
        let mut circuit = Circuit::with_config(params, config);
        for &(parameter, value) in &self.assignments {
            circuit.set(parameter, value);
        }
        circuit
    }
}

/// Parse `NAME=VALUE`, where NAME is R, L, C, V or f
fn parse_assignment(s: &str) -> Result<(Parameter, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected NAME=VALUE, got {:?}", s))?;
    let parameter: Parameter = name.parse().map_err(|e: CircuitError| e.to_string())?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("Invalid value for {}: {}", parameter, e))?;
    Ok((parameter, value))
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let circuit = args.circuit();

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            let mut writer = BufWriter::new(file);
            write_section(&mut writer, &circuit, args.section, args.format)
                .context("Failed to write analysis")?;
            writer.flush()?;
            info!("Wrote {:?} to {:?}", args.section, path);
        }
        None => {
            let stdout = io::stdout();
            write_section(stdout.lock(), &circuit, args.section, args.format)
                .context("Failed to write analysis")?;
        }
    }

    Ok(())
}
