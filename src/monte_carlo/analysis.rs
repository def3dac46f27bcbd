use crate::core::GameMode;

use super::stats::SimulationStatistics;

/// House edge above this percentage is flagged as high.
pub const MAX_FAIR_HOUSE_EDGE_PERCENT: f64 = 15.0;
/// Minimum EV gap between the highest and lowest sweep skill for skill to
/// count as meaningful.
pub const MIN_SKILL_SPREAD: f64 = 0.1;
/// Target minimum average game length.
pub const MIN_DURATION_SECONDS: f64 = 30.0;
/// EV is considered fair while the average loss is within this fraction
/// of the entry fee.
pub const MAX_EV_LOSS_FRACTION: f64 = 0.2;

/// What the operator keeps from every full game of a mode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HouseAnalysis {
    pub total_entry_per_game: f64,
    pub total_prize_per_game: f64,
    pub house_take_per_game: f64,
    pub house_edge_percent: f64,
}

impl HouseAnalysis {
    pub fn from_mode(mode: &GameMode) -> Self {
        let total_entry = mode.total_entry();
        let total_prize = mode.prize_pool;
        let house_take = total_entry - total_prize;
        Self {
            total_entry_per_game: total_entry,
            total_prize_per_game: total_prize,
            house_take_per_game: house_take,
            house_edge_percent: house_take / total_entry * 100.0,
        }
    }
}

/// Outcome of the tracked player at one fixed skill level.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillImpact {
    pub skill: f64,
    pub games: usize,
    pub expected_value: f64,
    /// Fraction of games with profit > 0
    pub win_rate: f64,
}

/// Sensitivity of EV to the tracked player's skill.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillImpactAnalysis {
    /// One entry per sweep level, in sweep order
    pub levels: Vec<SkillImpact>,
}

impl SkillImpactAnalysis {
    pub fn level(&self, skill: f64) -> Option<&SkillImpact> {
        self.levels.iter().find(|impact| impact.skill == skill)
    }

    /// EV at the highest swept skill minus EV at the lowest.
    pub fn skill_spread(&self) -> Option<f64> {
        let lowest = self
            .levels
            .iter()
            .min_by(|a, b| a.skill.total_cmp(&b.skill))?;
        let highest = self
            .levels
            .iter()
            .max_by(|a, b| a.skill.total_cmp(&b.skill))?;
        Some(highest.expected_value - lowest.expected_value)
    }
}

/// Pass/fail checks a designer looks at before shipping a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FairnessVerdict {
    pub house_edge_reasonable: bool,
    /// `None` when no skill sweep was run
    pub skill_matters: Option<bool>,
    pub duration_on_target: bool,
    pub expected_value_fair: bool,
}

impl FairnessVerdict {
    pub fn evaluate(
        mode: &GameMode,
        statistics: &SimulationStatistics,
        house: &HouseAnalysis,
        skill_impact: &SkillImpactAnalysis,
    ) -> Self {
        Self {
            house_edge_reasonable: house.house_edge_percent < MAX_FAIR_HOUSE_EDGE_PERCENT,
            skill_matters: skill_impact
                .skill_spread()
                .map(|spread| spread > MIN_SKILL_SPREAD),
            duration_on_target: statistics.avg_duration_seconds >= MIN_DURATION_SECONDS,
            expected_value_fair: statistics.expected_value
                > -mode.entry_fee * MAX_EV_LOSS_FRACTION,
        }
    }
}
