use crate::core::{Result, SimulationError};

/// Games simulated for a single mode analysis.
pub const DEFAULT_SIMULATIONS: usize = 10_000;
/// Games simulated per mode when comparing every mode.
pub const DEFAULT_ALL_MODES_SIMULATIONS: usize = 5_000;
/// Skill levels the skill impact sweep is run at.
pub const DEFAULT_SKILL_LEVELS: [f64; 3] = [0.2, 0.5, 0.8];
/// Games simulated at each skill level of the sweep.
pub const DEFAULT_SKILL_IMPACT_RUNS: usize = 1_000;

/// Configuration for a Monte Carlo analysis
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloConfig {
    /// Number of games simulated for the tracked player. `None` uses
    /// [`DEFAULT_SIMULATIONS`] for a single mode and
    /// [`DEFAULT_ALL_MODES_SIMULATIONS`] per mode when comparing every mode.
    pub simulation_count: Option<usize>,
    /// Skill of the tracked player (seat 0)
    pub subject_skill: f64,
    /// Skill levels for the skill impact sweep
    pub skill_levels: Vec<f64>,
    /// Number of games at each sweep level
    pub skill_impact_runs: usize,
    /// Optional random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            simulation_count: None,
            subject_skill: 0.5,
            skill_levels: DEFAULT_SKILL_LEVELS.to_vec(),
            skill_impact_runs: DEFAULT_SKILL_IMPACT_RUNS,
            seed: None,
        }
    }
}

impl MonteCarloConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Games to simulate for a single mode analysis.
    pub fn single_mode_simulations(&self) -> usize {
        self.simulation_count.unwrap_or(DEFAULT_SIMULATIONS)
    }

    /// Games to simulate per mode when every mode is analyzed in one go.
    pub fn all_modes_simulations(&self) -> usize {
        self.simulation_count.unwrap_or(DEFAULT_ALL_MODES_SIMULATIONS)
    }

    pub fn validate(&self) -> Result<()> {
        if self.simulation_count == Some(0) {
            return Err(SimulationError::ValidationError(
                "simulation_count must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.subject_skill) {
            return Err(SimulationError::ValidationError(format!(
                "subject_skill ({}) must be within [0, 1]",
                self.subject_skill
            )));
        }

        if let Some(level) = self
            .skill_levels
            .iter()
            .find(|level| !(0.0..=1.0).contains(*level))
        {
            return Err(SimulationError::ValidationError(format!(
                "skill level ({}) must be within [0, 1]",
                level
            )));
        }

        if !self.skill_levels.is_empty() && self.skill_impact_runs == 0 {
            return Err(SimulationError::ValidationError(
                "skill_impact_runs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
