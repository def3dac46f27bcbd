use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::event;

use crate::core::{GameMode, ModeSet, Result, SimulationError};
use crate::simulation::EliminationGame;

use super::analysis::{HouseAnalysis, SkillImpact, SkillImpactAnalysis};
use super::config::MonteCarloConfig;
use super::result::{AggregateReport, CrossModeReport};
use super::stats::{SimulationStatistics, SimulationStatsBuilder};

/// Player id of the tracked player. Always seated first.
pub const SUBJECT_ID: usize = 0;

/// Seeds handed to different modes in a cross mode analysis are this far
/// apart, leaving room for the per sweep level offsets in between.
const MODE_SEED_STRIDE: u64 = 1 << 32;

/// Runs Monte Carlo analyses of one or every configured mode.
///
/// The tracked player sits in seat 0 with a fixed skill while every other
/// seat draws a fresh skill each game.
#[derive(Debug, Clone)]
pub struct MonteCarloRunner {
    config: MonteCarloConfig,
    modes: ModeSet,
    game: EliminationGame,
}

impl MonteCarloRunner {
    /// Create a new runner (internal - use MonteCarloBuilder instead)
    pub(crate) fn new(config: MonteCarloConfig, modes: ModeSet, game: EliminationGame) -> Self {
        Self {
            config,
            modes,
            game,
        }
    }

    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    pub fn modes(&self) -> &ModeSet {
        &self.modes
    }

    pub fn game(&self) -> &EliminationGame {
        &self.game
    }

    /// Run the full analysis for a single mode.
    ///
    /// Fails with [`SimulationError::UnknownMode`] before simulating
    /// anything when the mode isn't configured.
    pub fn run_monte_carlo(&self, mode_name: &str) -> Result<AggregateReport> {
        let mode = self.modes.mode(mode_name)?;
        self.analyze_mode(mode, self.config.single_mode_simulations(), self.base_seed())
    }

    /// Run the full analysis for every configured mode, in configuration
    /// order. Modes share no state and each gets its own seed.
    pub fn analyze_all_modes(&self) -> Result<CrossModeReport> {
        let base_seed = self.base_seed();
        let simulation_count = self.config.all_modes_simulations();

        let reports = self
            .modes
            .modes()
            .iter()
            .enumerate()
            .map(|(idx, mode)| {
                event!(
                    tracing::Level::INFO,
                    mode = mode.name.as_str(),
                    "Simulating mode"
                );
                let seed = base_seed.wrapping_add(idx as u64 * MODE_SEED_STRIDE);
                self.analyze_mode(mode, simulation_count, seed)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CrossModeReport::new(reports))
    }

    /// Aggregate only the tracked player's statistics, splitting the games
    /// across `threads` worker threads.
    ///
    /// Every worker gets its own seeded rng and batch, and the batches are
    /// merged in worker order so a seeded run is repeatable.
    pub fn run_parallel(&self, mode_name: &str, threads: usize) -> Result<SimulationStatistics> {
        let mode = self.modes.mode(mode_name)?;
        if threads == 0 {
            return Err(SimulationError::ValidationError(
                "threads must be greater than 0".to_string(),
            ));
        }

        let base_seed = self.base_seed();
        let total = self.config.single_mode_simulations();
        let subject_skill = self.config.subject_skill;

        let batches: Vec<Result<SimulationStatsBuilder>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..threads)
                .map(|worker| {
                    // Spread the remainder over the first workers.
                    let runs = total / threads + usize::from(worker < total % threads);
                    scope.spawn(move || {
                        let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(worker as u64));
                        self.run_subject(mode, subject_skill, runs, &mut rng)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect()
        });

        let mut merged = SimulationStatsBuilder::with_capacity(total);
        for batch in batches {
            merged.merge(batch?);
        }
        Ok(merged.build())
    }

    /// Run the skill impact sweep for a mode.
    pub fn skill_impact(&self, mode: &GameMode, seed: u64) -> Result<SkillImpactAnalysis> {
        let levels = self
            .config
            .skill_levels
            .iter()
            .enumerate()
            .map(|(idx, &skill)| {
                // Offset by one so the sweep never reuses the main run's seed.
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(idx as u64 + 1));
                let builder =
                    self.run_subject(mode, skill, self.config.skill_impact_runs, &mut rng)?;

                let impact = SkillImpact {
                    skill,
                    games: builder.games(),
                    expected_value: builder.expected_value(),
                    win_rate: builder.win_rate(),
                };
                event!(
                    tracing::Level::DEBUG,
                    mode = mode.name.as_str(),
                    skill,
                    expected_value = impact.expected_value,
                    win_rate = impact.win_rate,
                    "Skill level complete"
                );
                Ok(impact)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SkillImpactAnalysis { levels })
    }

    fn analyze_mode(
        &self,
        mode: &GameMode,
        simulation_count: usize,
        seed: u64,
    ) -> Result<AggregateReport> {
        event!(
            tracing::Level::INFO,
            mode = mode.name.as_str(),
            simulation_count,
            subject_skill = self.config.subject_skill,
            seed,
            "Starting Monte Carlo analysis"
        );

        let mut rng = StdRng::seed_from_u64(seed);
        let statistics = self
            .run_subject(mode, self.config.subject_skill, simulation_count, &mut rng)?
            .build();

        let house_analysis = HouseAnalysis::from_mode(mode);
        let skill_impact = self.skill_impact(mode, seed)?;

        event!(
            tracing::Level::INFO,
            mode = mode.name.as_str(),
            expected_value = statistics.expected_value,
            win_rate = statistics.win_rate,
            house_edge_percent = house_analysis.house_edge_percent,
            "Monte Carlo analysis complete"
        );

        Ok(AggregateReport::new(
            mode.clone(),
            self.config.subject_skill,
            statistics,
            house_analysis,
            skill_impact,
        ))
    }

    /// Simulate `runs` games with the tracked player at `subject_skill`.
    fn run_subject<R: Rng + ?Sized>(
        &self,
        mode: &GameMode,
        subject_skill: f64,
        runs: usize,
        rng: &mut R,
    ) -> Result<SimulationStatsBuilder> {
        let payouts = self.modes.payouts();
        let skill_distribution = self.game.skill_distribution();
        let mut builder = SimulationStatsBuilder::with_capacity(runs);

        for _ in 0..runs {
            let skills =
                skill_distribution.table_with_subject(subject_skill, mode.player_count, rng);
            let result = self.game.simulate(mode, &skills, rng)?;

            let rank = result
                .rank_of(SUBJECT_ID)
                .ok_or_else(|| SimulationError::DataConsistency {
                    player_id: SUBJECT_ID,
                    mode: mode.name.clone(),
                })?;
            let profit = payouts.resolve_profit(mode, rank)?;
            builder.record(rank, profit, result.duration_ticks);
        }

        Ok(builder)
    }

    fn base_seed(&self) -> u64 {
        self.config.seed.unwrap_or_else(rand::random::<u64>)
    }
}
