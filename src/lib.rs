//! Simulate multiplayer elimination games to check that a game mode is
//! fair before it ships.
//!
//! Games are modeled as a discrete time hazard process. Each tick every
//! player still in the arena has a small chance of being knocked out,
//! rising as the game speeds up and the arena shrinks and falling with the
//! player's skill. Simulating many games per mode gives the expected value
//! of entering, the spread of outcomes, the house edge, and how much skill
//! moves the needle.
//!
//! - [`core`](crate::core) holds the game modes and payout tables.
//! - [`simulation`] plays a single game.
//! - [`monte_carlo`] aggregates many games into reports.
//!
//! ```
//! use elim_ev::monte_carlo::MonteCarloBuilder;
//!
//! let runner = MonteCarloBuilder::new()
//!     .simulation_count(500)
//!     .subject_skill(0.8)
//!     .skill_levels(vec![])
//!     .seed(1)
//!     .build()
//!     .unwrap();
//! let report = runner.run_monte_carlo("ranked").unwrap();
//!
//! assert_eq!(report.statistics.games, 500);
//! assert!((report.house_analysis.house_edge_percent - 30.0).abs() < 1e-9);
//! ```
pub mod core;
pub mod monte_carlo;
pub mod simulation;
