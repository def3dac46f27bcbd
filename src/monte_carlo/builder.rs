use crate::core::{ModeSet, Result};
use crate::simulation::{EliminationGame, HazardModel, SkillDistribution};

use super::config::{DEFAULT_SKILL_IMPACT_RUNS, DEFAULT_SKILL_LEVELS, MonteCarloConfig};
use super::runner::MonteCarloRunner;

/// Builder for constructing MonteCarloRunner instances
///
/// # Example
///
/// ```
/// use elim_ev::monte_carlo::MonteCarloBuilder;
///
/// let runner = MonteCarloBuilder::new()
///     .simulation_count(200)
///     .subject_skill(0.7)
///     .skill_impact_runs(100)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let report = runner.run_monte_carlo("squad").unwrap();
/// assert_eq!(report.statistics.games, 200);
/// ```
#[derive(Debug, Default)]
pub struct MonteCarloBuilder {
    modes: Option<ModeSet>,
    hazard: Option<HazardModel>,
    skill_distribution: Option<SkillDistribution>,
    simulation_count: Option<usize>,
    subject_skill: Option<f64>,
    skill_levels: Option<Vec<f64>>,
    skill_impact_runs: Option<usize>,
    seed: Option<u64>,
}

impl MonteCarloBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: MonteCarloConfig) -> Self {
        Self {
            simulation_count: config.simulation_count,
            subject_skill: Some(config.subject_skill),
            skill_levels: Some(config.skill_levels),
            skill_impact_runs: Some(config.skill_impact_runs),
            seed: config.seed,
            ..Default::default()
        }
    }

    /// Use a custom set of game modes instead of the standard four
    pub fn modes(mut self, modes: ModeSet) -> Self {
        self.modes = Some(modes);
        self
    }

    pub fn hazard(mut self, hazard: HazardModel) -> Self {
        self.hazard = Some(hazard);
        self
    }

    /// Distribution the other seats draw their skills from
    pub fn skill_distribution(mut self, skill_distribution: SkillDistribution) -> Self {
        self.skill_distribution = Some(skill_distribution);
        self
    }

    /// Set the number of games to simulate per mode. Left unset, a single
    /// mode runs 10000 games and a comparison of every mode runs 5000 each.
    pub fn simulation_count(mut self, simulation_count: usize) -> Self {
        self.simulation_count = Some(simulation_count);
        self
    }

    /// Set the skill of the tracked player
    pub fn subject_skill(mut self, subject_skill: f64) -> Self {
        self.subject_skill = Some(subject_skill);
        self
    }

    /// Set the skill levels of the skill impact sweep. An empty list
    /// disables the sweep.
    pub fn skill_levels(mut self, skill_levels: Vec<f64>) -> Self {
        self.skill_levels = Some(skill_levels);
        self
    }

    /// Set the number of games at each sweep level
    pub fn skill_impact_runs(mut self, skill_impact_runs: usize) -> Self {
        self.skill_impact_runs = Some(skill_impact_runs);
        self
    }

    /// Set the random seed for reproducibility
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the MonteCarloRunner
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> Result<MonteCarloRunner> {
        let config = MonteCarloConfig {
            simulation_count: self.simulation_count,
            subject_skill: self.subject_skill.unwrap_or(0.5),
            skill_levels: self
                .skill_levels
                .unwrap_or_else(|| DEFAULT_SKILL_LEVELS.to_vec()),
            skill_impact_runs: self.skill_impact_runs.unwrap_or(DEFAULT_SKILL_IMPACT_RUNS),
            seed: self.seed,
        };
        config.validate()?;

        let hazard = self.hazard.unwrap_or_default();
        hazard.validate()?;

        let game = EliminationGame::new(
            hazard,
            self.skill_distribution.unwrap_or_default(),
        );

        Ok(MonteCarloRunner::new(
            config,
            self.modes.unwrap_or_default(),
            game,
        ))
    }
}
