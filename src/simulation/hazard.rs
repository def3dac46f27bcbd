use crate::core::{Result, SimulationError};

/// Simulation steps per second of game time.
pub const TICKS_PER_SECOND: u32 = 20;

/// Parameters of the per tick elimination hazard.
///
/// Each alive player is eliminated on a tick with probability
///
/// ```text
/// base * speed_multiplier * arena_factor * density_factor / skill_factor
/// ```
///
/// where the speed multiplier steps up over time, the arena factor grows
/// linearly towards the tick ceiling, density is the fraction of the table
/// still alive, and the skill factor grows with skill.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardModel {
    pub base_collision_chance: f64,
    /// Hard cap on game length
    pub max_ticks: u32,
    /// The speed multiplier increases once every this many ticks
    pub speed_step_ticks: u32,
    pub speed_step: f64,
    pub max_speed_multiplier: f64,
    /// Skill factor of a player with skill 0. A skill of 1 has factor 1.
    pub min_skill_factor: f64,
}

impl Default for HazardModel {
    fn default() -> Self {
        Self {
            base_collision_chance: 0.005,
            max_ticks: 3_000,
            speed_step_ticks: 100,
            speed_step: 0.15,
            max_speed_multiplier: 2.5,
            min_skill_factor: 0.3,
        }
    }
}

impl HazardModel {
    /// Check that every game run with this model terminates with sane
    /// probabilities.
    pub fn validate(&self) -> Result<()> {
        if self.max_ticks == 0 {
            return Err(SimulationError::ValidationError(
                "max_ticks must be at least 1".to_string(),
            ));
        }

        if self.speed_step_ticks == 0 {
            return Err(SimulationError::ValidationError(
                "speed_step_ticks must be greater than 0".to_string(),
            ));
        }

        if !(self.base_collision_chance.is_finite() && self.base_collision_chance > 0.0) {
            return Err(SimulationError::ValidationError(format!(
                "base_collision_chance ({}) must be finite and positive",
                self.base_collision_chance
            )));
        }

        if !(self.speed_step.is_finite() && self.speed_step >= 0.0) {
            return Err(SimulationError::ValidationError(format!(
                "speed_step ({}) must be finite and non-negative",
                self.speed_step
            )));
        }

        if !(self.max_speed_multiplier.is_finite() && self.max_speed_multiplier >= 1.0) {
            return Err(SimulationError::ValidationError(format!(
                "max_speed_multiplier ({}) must be at least 1",
                self.max_speed_multiplier
            )));
        }

        if !(self.min_skill_factor > 0.0 && self.min_skill_factor <= 1.0) {
            return Err(SimulationError::ValidationError(format!(
                "min_skill_factor ({}) must be within (0, 1]",
                self.min_skill_factor
            )));
        }

        Ok(())
    }

    /// The pressure applied on every tick of a game, in order.
    pub fn schedule(&self) -> PressureSchedule {
        PressureSchedule {
            model: *self,
            tick: 0,
            speed_multiplier: 1.0,
        }
    }

    /// Shrinking arena pressure, 1.0 at the start rising to 3.0 at the cap.
    pub fn arena_factor(&self, tick: u32) -> f64 {
        1.0 + (f64::from(tick) / f64::from(self.max_ticks)) * 2.0
    }

    /// Higher skill gives a larger factor and so a lower hazard.
    pub fn skill_factor(&self, skill: f64) -> f64 {
        self.min_skill_factor + skill * (1.0 - self.min_skill_factor)
    }

    /// Probability that a player with `skill` is eliminated on a tick.
    pub fn collision_chance(
        &self,
        pressure: &TickPressure,
        density_factor: f64,
        skill: f64,
    ) -> f64 {
        self.base_collision_chance
            * pressure.speed_multiplier
            * pressure.arena_factor
            * density_factor
            / self.skill_factor(skill)
    }
}

/// Table wide hazard inputs for a single tick.
///
/// These are fixed for the whole tick, players eliminated earlier in the
/// same tick don't change them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickPressure {
    /// 1-based tick number
    pub tick: u32,
    pub speed_multiplier: f64,
    pub arena_factor: f64,
}

/// Iterator over the [`TickPressure`] of every tick up to the ceiling.
#[derive(Debug, Clone)]
pub struct PressureSchedule {
    model: HazardModel,
    tick: u32,
    speed_multiplier: f64,
}

impl Iterator for PressureSchedule {
    type Item = TickPressure;

    fn next(&mut self) -> Option<Self::Item> {
        if self.tick >= self.model.max_ticks {
            return None;
        }
        self.tick += 1;

        if self.tick % self.model.speed_step_ticks == 0 {
            self.speed_multiplier = (self.speed_multiplier + self.model.speed_step)
                .min(self.model.max_speed_multiplier);
        }

        Some(TickPressure {
            tick: self.tick,
            speed_multiplier: self.speed_multiplier,
            arena_factor: self.model.arena_factor(self.tick),
        })
    }
}
