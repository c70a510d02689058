use thiserror::Error;

/// Boundary errors. The derivation pipeline itself never fails; these only
/// come from parsing external tags into the closed enums.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CircuitError {
    #[error("Unknown topology: {0}. Use: R, RL, RC, or RLC")]
    UnknownTopology(String),

    #[error("Unknown parameter: {0}. Use: R, L, C, V, or f")]
    UnknownParameter(String),
}
