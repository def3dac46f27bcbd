use std::collections::BTreeMap;

use super::errors::{Result, SimulationError};
use super::mode::GameMode;

/// One paid finishing position and the share of the prize pool it takes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrizeShare {
    /// 1-based finishing rank
    pub rank: usize,
    /// Fraction of the prize pool paid to this rank
    pub share: f64,
}

impl PrizeShare {
    pub const fn new(rank: usize, share: f64) -> Self {
        Self { rank, share }
    }
}

/// Payout schedules keyed by the number of players at the table.
///
/// Ranks that are not listed for a player count are paid nothing, the
/// player simply loses the entry fee.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoutTable {
    schedules: BTreeMap<usize, Vec<PrizeShare>>,
}

impl Default for PayoutTable {
    fn default() -> Self {
        let top_three = vec![
            PrizeShare::new(1, 0.694),
            PrizeShare::new(2, 0.208),
            PrizeShare::new(3, 0.098),
        ];
        let schedules = BTreeMap::from([
            (2, vec![PrizeShare::new(1, 1.0)]),
            (4, vec![PrizeShare::new(1, 0.75), PrizeShare::new(2, 0.25)]),
            (8, top_three.clone()),
            (10, top_three),
        ]);
        Self { schedules }
    }
}

impl PayoutTable {
    /// Build a payout table, rejecting schedules that could pay out more
    /// than the prize pool.
    pub fn new(schedules: BTreeMap<usize, Vec<PrizeShare>>) -> Result<Self> {
        let table = Self { schedules };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<()> {
        for (player_count, shares) in &self.schedules {
            let mut total = 0.0;
            for prize in shares {
                if prize.rank == 0 || prize.rank > *player_count {
                    return Err(SimulationError::InvalidPayout(format!(
                        "rank {} is not a valid finish for {} players",
                        prize.rank, player_count
                    )));
                }
                if !(0.0..=1.0).contains(&prize.share) {
                    return Err(SimulationError::InvalidPayout(format!(
                        "share {} for rank {} must be within [0, 1]",
                        prize.share, prize.rank
                    )));
                }
                total += prize.share;
            }
            // Shares are decimal fractions so allow for float rounding.
            if total > 1.0 + 1e-9 {
                return Err(SimulationError::InvalidPayout(format!(
                    "shares for {} players sum to {}, more than the whole pool",
                    player_count, total
                )));
            }
        }
        Ok(())
    }

    /// The payout schedule for a given player count.
    pub fn schedule(&self, player_count: usize) -> Option<&[PrizeShare]> {
        self.schedules.get(&player_count).map(Vec::as_slice)
    }

    /// Money paid out to the finisher at `rank`, before the entry fee.
    pub fn prize_for_rank(&self, mode: &GameMode, rank: usize) -> Result<f64> {
        let schedule = self
            .schedule(mode.player_count)
            .ok_or_else(|| SimulationError::MissingPayout {
                mode: mode.name.clone(),
                player_count: mode.player_count,
            })?;

        Ok(schedule
            .iter()
            .find(|prize| prize.rank == rank)
            .map(|prize| mode.prize_pool * prize.share)
            .unwrap_or(0.0))
    }

    /// Profit (or loss) for a player finishing at `rank` in `mode`.
    ///
    /// An unlisted rank is the normal "not placed" outcome and returns
    /// `-entry_fee`.
    pub fn resolve_profit(&self, mode: &GameMode, rank: usize) -> Result<f64> {
        let prize = self.prize_for_rank(mode, rank)?;
        Ok(prize - mode.entry_fee)
    }

    /// Total money the schedule for `mode` pays out if every listed rank is
    /// filled.
    pub fn total_payout(&self, mode: &GameMode) -> Result<f64> {
        let schedule = self
            .schedule(mode.player_count)
            .ok_or_else(|| SimulationError::MissingPayout {
                mode: mode.name.clone(),
                player_count: mode.player_count,
            })?;
        Ok(schedule
            .iter()
            .map(|prize| prize.share * mode.prize_pool)
            .sum())
    }
}
