//! Monte Carlo analysis of game modes
//!
//! This module repeatedly simulates games with a tracked player in seat 0,
//! converts each finish into a profit with the mode's payout table, and
//! aggregates the results. On top of the raw statistics every report
//! carries the house edge of the mode and a sweep of EV against the
//! tracked player's skill.
//!
//! # Example
//!
//! ```
//! use elim_ev::monte_carlo::MonteCarloBuilder;
//!
//! let runner = MonteCarloBuilder::new()
//!     .simulation_count(100)
//!     .skill_impact_runs(50)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! // Every configured mode
//! let all = runner.analyze_all_modes().unwrap();
//! for report in all.reports() {
//!     println!(
//!         "{}: EV {:+.3}, house edge {:.1}%",
//!         report.mode, report.statistics.expected_value, report.house_analysis.house_edge_percent
//!     );
//! }
//!
//! println!("{}", all.to_markdown());
//! ```
mod analysis;
mod builder;
mod config;
mod result;
mod runner;
mod stats;

pub use analysis::{
    FairnessVerdict, HouseAnalysis, MAX_EV_LOSS_FRACTION, MAX_FAIR_HOUSE_EDGE_PERCENT,
    MIN_DURATION_SECONDS, MIN_SKILL_SPREAD, SkillImpact, SkillImpactAnalysis,
};
pub use builder::MonteCarloBuilder;
pub use config::{
    DEFAULT_ALL_MODES_SIMULATIONS, DEFAULT_SIMULATIONS, DEFAULT_SKILL_IMPACT_RUNS,
    DEFAULT_SKILL_LEVELS, MonteCarloConfig,
};
pub use result::{AggregateReport, CrossModeReport, PERSISTED_SAMPLE_LIMIT};
pub use runner::{MonteCarloRunner, SUBJECT_ID};
pub use stats::{SimulationStatistics, SimulationStatsBuilder};
