use std::collections::HashSet;

use super::errors::{Result, SimulationError};
use super::payout::PayoutTable;

/// A named game configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameMode {
    pub name: String,
    /// Number of seats filled for every game
    pub player_count: usize,
    /// Paid by every player to enter
    pub entry_fee: f64,
    /// Total paid out across all placed ranks
    pub prize_pool: f64,
    /// Side length of the arena grid. Recorded for reporting, the hazard
    /// model does not look at it.
    pub arena_size: u32,
}

impl GameMode {
    pub fn new(
        name: impl Into<String>,
        player_count: usize,
        entry_fee: f64,
        prize_pool: f64,
        arena_size: u32,
    ) -> Self {
        Self {
            name: name.into(),
            player_count,
            entry_fee,
            prize_pool,
            arena_size,
        }
    }

    /// Entry fees collected from a full table.
    pub fn total_entry(&self) -> f64 {
        self.entry_fee * self.player_count as f64
    }

    fn validate(&self) -> Result<()> {
        if self.player_count < 2 {
            return Err(SimulationError::ValidationError(format!(
                "mode {} needs at least 2 players, has {}",
                self.name, self.player_count
            )));
        }
        if !(self.entry_fee.is_finite() && self.entry_fee > 0.0) {
            return Err(SimulationError::ValidationError(format!(
                "mode {} must have a finite positive entry fee, has {}",
                self.name, self.entry_fee
            )));
        }
        if !(self.prize_pool.is_finite() && self.prize_pool >= 0.0) {
            return Err(SimulationError::ValidationError(format!(
                "mode {} must have a finite non-negative prize pool, has {}",
                self.name, self.prize_pool
            )));
        }
        Ok(())
    }
}

/// The immutable set of configured modes together with the payout table
/// they resolve against.
///
/// Every mode is checked against the payout table when the set is built so
/// a missing schedule is a construction error rather than a failure in the
/// middle of a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ModeSet {
    modes: Vec<GameMode>,
    payouts: PayoutTable,
}

impl Default for ModeSet {
    fn default() -> Self {
        Self {
            modes: vec![
                GameMode::new("duel", 2, 0.50, 0.90, 36),
                GameMode::new("squad", 4, 0.50, 1.40, 52),
                GameMode::new("ranked", 8, 1.00, 5.60, 84),
                GameMode::new("arena", 10, 1.00, 7.00, 112),
            ],
            payouts: PayoutTable::default(),
        }
    }
}

impl ModeSet {
    pub fn new(modes: Vec<GameMode>, payouts: PayoutTable) -> Result<Self> {
        payouts.validate()?;

        {
            let mut seen = HashSet::new();
            for mode in &modes {
                mode.validate()?;
                if !seen.insert(mode.name.as_str()) {
                    return Err(SimulationError::ValidationError(format!(
                        "mode {} is configured more than once",
                        mode.name
                    )));
                }
                if payouts.schedule(mode.player_count).is_none() {
                    return Err(SimulationError::MissingPayout {
                        mode: mode.name.clone(),
                        player_count: mode.player_count,
                    });
                }
            }
        }

        Ok(Self { modes, payouts })
    }

    /// Look up a mode by name.
    pub fn mode(&self, name: &str) -> Result<&GameMode> {
        self.modes
            .iter()
            .find(|mode| mode.name == name)
            .ok_or_else(|| SimulationError::UnknownMode(name.to_string()))
    }

    /// Profit for finishing at `rank` in the mode called `mode_name`.
    pub fn resolve_profit(&self, mode_name: &str, rank: usize) -> Result<f64> {
        let mode = self.mode(mode_name)?;
        self.payouts.resolve_profit(mode, rank)
    }

    /// Modes in configuration order.
    pub fn modes(&self) -> &[GameMode] {
        &self.modes
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modes.iter().map(|mode| mode.name.as_str())
    }

    pub fn payouts(&self) -> &PayoutTable {
        &self.payouts
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ModeSetFile {
    modes: Vec<GameMode>,
    #[serde(default)]
    payouts: Option<PayoutTable>,
}

#[cfg(feature = "serde")]
impl ModeSet {
    /// Parse a mode set from JSON.
    ///
    /// The `payouts` key is optional and falls back to the default table.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: ModeSetFile = serde_json::from_str(json)?;
        Self::new(file.modes, file.payouts.unwrap_or_default())
    }

    /// Load a mode set from a JSON file on disk.
    pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::core::PrizeShare;

    #[test]
    fn test_default_modes() {
        let modes = ModeSet::default();
        assert_eq!(modes.len(), 4);
        let names: Vec<&str> = modes.names().collect();
        assert_eq!(names, vec!["duel", "squad", "ranked", "arena"]);

        let duel = modes.mode("duel").unwrap();
        assert_eq!(duel.player_count, 2);
        assert_eq!(duel.entry_fee, 0.5);
        assert_eq!(duel.prize_pool, 0.9);
        assert_eq!(duel.arena_size, 36);
    }

    #[test]
    fn test_default_modes_are_valid() {
        let defaults = ModeSet::default();
        let rebuilt = ModeSet::new(defaults.modes().to_vec(), defaults.payouts().clone());
        assert_eq!(rebuilt.unwrap(), defaults);
    }

    #[test]
    fn test_unknown_mode() {
        let modes = ModeSet::default();
        match modes.mode("battle_royale") {
            Err(SimulationError::UnknownMode(name)) => assert_eq!(name, "battle_royale"),
            other => panic!("Expected UnknownMode, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_payout_detected_at_build() {
        let result = ModeSet::new(
            vec![GameMode::new("trio", 3, 1.0, 2.5, 40)],
            PayoutTable::default(),
        );
        assert!(matches!(
            result,
            Err(SimulationError::MissingPayout { player_count: 3, .. })
        ));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = ModeSet::new(
            vec![
                GameMode::new("duel", 2, 0.5, 0.9, 36),
                GameMode::new("duel", 2, 1.0, 1.8, 36),
            ],
            PayoutTable::default(),
        );
        assert!(matches!(result, Err(SimulationError::ValidationError(_))));
    }

    #[test]
    fn test_single_player_rejected() {
        let payouts =
            PayoutTable::new(BTreeMap::from([(1, vec![PrizeShare::new(1, 1.0)])])).unwrap();
        let result = ModeSet::new(vec![GameMode::new("solo", 1, 1.0, 0.9, 10)], payouts);
        assert!(matches!(result, Err(SimulationError::ValidationError(_))));
    }

    #[test]
    fn test_non_finite_amounts_rejected() {
        let bad = [
            GameMode::new("duel", 2, f64::NAN, 0.9, 36),
            GameMode::new("duel", 2, f64::INFINITY, 0.9, 36),
            GameMode::new("duel", 2, 0.5, f64::NAN, 36),
            GameMode::new("duel", 2, 0.5, -0.1, 36),
        ];
        for mode in bad {
            let result = ModeSet::new(vec![mode.clone()], PayoutTable::default());
            assert!(
                matches!(result, Err(SimulationError::ValidationError(_))),
                "{:?} should be rejected",
                mode
            );
        }
    }

    #[test]
    fn test_resolve_profit_by_name() {
        let modes = ModeSet::default();
        let first = modes.resolve_profit("squad", 1).unwrap();
        assert!((first - (1.4 * 0.75 - 0.5)).abs() < 1e-12);
        assert_eq!(modes.resolve_profit("squad", 3).unwrap(), -0.5);
        assert!(matches!(
            modes.resolve_profit("royale", 1),
            Err(SimulationError::UnknownMode(_))
        ));
    }

    #[test]
    fn test_total_entry() {
        let modes = ModeSet::default();
        assert_eq!(modes.mode("arena").unwrap().total_entry(), 10.0);
        assert_eq!(modes.mode("squad").unwrap().total_entry(), 2.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_default_payouts() {
        let json = r#"{
            "modes": [
                {"name": "quick", "player_count": 4, "entry_fee": 0.25,
                 "prize_pool": 0.8, "arena_size": 40}
            ]
        }"#;
        let modes = ModeSet::from_json_str(json).unwrap();
        let quick = modes.mode("quick").unwrap();
        assert_eq!(quick.player_count, 4);
        assert_eq!(modes.payouts(), &PayoutTable::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_custom_payouts() {
        let json = r#"{
            "modes": [
                {"name": "trio", "player_count": 3, "entry_fee": 1.0,
                 "prize_pool": 2.7, "arena_size": 40}
            ],
            "payouts": {
                "schedules": {
                    "3": [{"rank": 1, "share": 0.7}, {"rank": 2, "share": 0.3}]
                }
            }
        }"#;
        let modes = ModeSet::from_json_str(json).unwrap();
        let trio = modes.mode("trio").unwrap();
        let profit = modes.payouts().resolve_profit(trio, 3).unwrap();
        assert_eq!(profit, -1.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_rejects_bad_json() {
        assert!(matches!(
            ModeSet::from_json_str("{ not json"),
            Err(SimulationError::Json(_))
        ));
    }
}
