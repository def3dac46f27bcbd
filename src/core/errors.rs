use thiserror::Error;

/// Errors that can occur while configuring or running a simulation.
///
/// None of these are transient. Every variant is either a configuration
/// mistake or a broken invariant, so callers should surface them rather
/// than retry.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Unknown game mode: {0}")]
    UnknownMode(String),

    #[error("Player {player_id} is missing from the rankings of a {mode} game")]
    DataConsistency { player_id: usize, mode: String },

    #[error("Mode {mode} has {player_count} players but no payout table for that count")]
    MissingPayout { mode: String, player_count: usize },

    #[error("Invalid payout table: {0}")]
    InvalidPayout(String),

    #[error("Expected {expected} skill values but got {actual}")]
    InvalidSkills { expected: usize, actual: usize },

    #[error("Skill {0} is outside of [0, 1]")]
    SkillOutOfRange(f64),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for SimulationError {
    fn from(err: serde_json::Error) -> Self {
        SimulationError::Json(err.to_string())
    }
}

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, SimulationError>;
