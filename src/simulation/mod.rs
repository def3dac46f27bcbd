//! Tick based simulation of a single elimination game.
//!
//! A game starts with every seat alive. On every tick each alive player is
//! independently eliminated with a small probability given by the
//! [`HazardModel`]. The game ends when at most one player is left or the
//! tick ceiling is reached. Finish order is the reverse of elimination
//! order, with anyone still alive at the end shuffled into the top places.
//!
//! The random source is always passed in, so a seeded rng gives an exactly
//! repeatable game.
//!
//! ```
//! use elim_ev::core::ModeSet;
//! use elim_ev::simulation::EliminationGame;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let modes = ModeSet::default();
//! let duel = modes.mode("duel").unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let result = EliminationGame::default()
//!     .simulate(duel, &[0.9, 0.1], &mut rng)
//!     .unwrap();
//! assert_eq!(result.rankings.len(), 2);
//! ```
mod hazard;
mod skill;

pub use hazard::{HazardModel, PressureSchedule, TICKS_PER_SECOND, TickPressure};
pub use skill::SkillDistribution;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::event;

use crate::core::{GameMode, ModeSet, Result, SimulationError};

/// Outcome of one simulated game.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameResult {
    pub mode_name: String,
    /// Player ids in finish order, the winner first.
    pub rankings: Vec<usize>,
    /// Number of ticks the game ran for
    pub duration_ticks: u32,
}

impl GameResult {
    /// 1-based finishing rank of a player, if they were at the table.
    pub fn rank_of(&self, player_id: usize) -> Option<usize> {
        self.rankings
            .iter()
            .position(|&id| id == player_id)
            .map(|idx| idx + 1)
    }

    pub fn winner(&self) -> Option<usize> {
        self.rankings.first().copied()
    }

    pub fn duration_seconds(&self) -> f64 {
        f64::from(self.duration_ticks) / f64::from(TICKS_PER_SECOND)
    }
}

#[derive(Debug, Clone, Copy)]
struct Player {
    id: usize,
    skill: f64,
    alive: bool,
}

/// Runs single games using a hazard model and a skill distribution for
/// any seats that weren't given a skill.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EliminationGame {
    hazard: HazardModel,
    skills: SkillDistribution,
}

impl EliminationGame {
    pub fn new(hazard: HazardModel, skills: SkillDistribution) -> Self {
        Self { hazard, skills }
    }

    pub fn hazard(&self) -> &HazardModel {
        &self.hazard
    }

    pub fn skill_distribution(&self) -> &SkillDistribution {
        &self.skills
    }

    /// Simulate a game with one skill per seat. Seat `i` is player id `i`.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        mode: &GameMode,
        skills: &[f64],
        rng: &mut R,
    ) -> Result<GameResult> {
        if skills.len() != mode.player_count {
            return Err(SimulationError::InvalidSkills {
                expected: mode.player_count,
                actual: skills.len(),
            });
        }
        if let Some(bad) = skills.iter().find(|s| !(0.0..=1.0).contains(*s)) {
            return Err(SimulationError::SkillOutOfRange(*bad));
        }

        let total_players = skills.len();
        let mut players: Vec<Player> = skills
            .iter()
            .enumerate()
            .map(|(id, &skill)| Player {
                id,
                skill,
                alive: true,
            })
            .collect();

        // Elimination order, first out first.
        let mut eliminated: Vec<usize> = Vec::with_capacity(total_players);
        let mut duration_ticks = 0;

        for pressure in self.hazard.schedule() {
            let alive_count = total_players - eliminated.len();
            if alive_count <= 1 {
                break;
            }
            duration_ticks = pressure.tick;

            let density_factor = alive_count as f64 / total_players as f64;
            for player in players.iter_mut().filter(|p| p.alive) {
                let chance = self
                    .hazard
                    .collision_chance(&pressure, density_factor, player.skill);
                if rng.random::<f64>() < chance {
                    player.alive = false;
                    eliminated.push(player.id);
                }
            }
        }

        // Anyone left standing is tied, break the tie randomly. They all
        // still finish ahead of every eliminated player.
        let mut survivors: Vec<usize> = players
            .iter()
            .filter(|p| p.alive)
            .map(|p| p.id)
            .collect();
        survivors.shuffle(rng);
        eliminated.extend(survivors);
        eliminated.reverse();

        event!(
            tracing::Level::TRACE,
            mode = mode.name.as_str(),
            duration_ticks,
            winner = eliminated.first().copied(),
            "Game complete"
        );

        Ok(GameResult {
            mode_name: mode.name.clone(),
            rankings: eliminated,
            duration_ticks,
        })
    }

    /// Simulate a game where every seat draws its skill from the skill
    /// distribution.
    pub fn simulate_random<R: Rng + ?Sized>(
        &self,
        mode: &GameMode,
        rng: &mut R,
    ) -> Result<GameResult> {
        let skills = self.skills.sample_n(mode.player_count, rng);
        self.simulate(mode, &skills, rng)
    }
}

/// Look up `mode_name` and simulate one game.
///
/// When `skills` is `None` every seat gets a random skill.
pub fn simulate_game<R: Rng + ?Sized>(
    modes: &ModeSet,
    mode_name: &str,
    skills: Option<&[f64]>,
    rng: &mut R,
) -> Result<GameResult> {
    let mode = modes.mode(mode_name)?;
    let game = EliminationGame::default();
    match skills {
        Some(skills) => game.simulate(mode, skills, rng),
        None => game.simulate_random(mode, rng),
    }
}
