//! Circuit topology: which reactive elements take part in the analysis

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CircuitError;

/// Active subset of circuit elements. The resistor is always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Topology {
    #[serde(rename = "R")]
    R,
    #[serde(rename = "RL")]
    Rl,
    #[serde(rename = "RC")]
    Rc,
    #[default]
    #[serde(rename = "RLC")]
    Rlc,
}

impl Topology {
    pub const ALL: [Topology; 4] = [Topology::R, Topology::Rl, Topology::Rc, Topology::Rlc];

    /// Whether the inductor participates
    pub fn has_inductor(&self) -> bool {
        match self {
            Topology::Rl | Topology::Rlc => true,
            Topology::R | Topology::Rc => false,
        }
    }

    /// Whether the capacitor participates
    pub fn has_capacitor(&self) -> bool {
        match self {
            Topology::Rc | Topology::Rlc => true,
            Topology::R | Topology::Rl => false,
        }
    }

    /// Resonance is only meaningful when both reactive elements are present
    pub fn supports_resonance(&self) -> bool {
        match self {
            Topology::Rlc => true,
            Topology::R | Topology::Rl | Topology::Rc => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Topology::R => "R",
            Topology::Rl => "RL",
            Topology::Rc => "RC",
            Topology::Rlc => "RLC",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topology {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "R" => Ok(Topology::R),
            "RL" => Ok(Topology::Rl),
            "RC" => Ok(Topology::Rc),
            "RLC" => Ok(Topology::Rlc),
            _ => Err(CircuitError::UnknownTopology(s.to_string())),
        }
    }
}
