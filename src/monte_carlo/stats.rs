use std::collections::BTreeMap;

use crate::simulation::TICKS_PER_SECOND;

/// Aggregated outcomes for the tracked player over many games.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationStatistics {
    /// Number of games aggregated
    pub games: usize,
    /// 1-based finishing rank -> number of games finished there
    pub rank_distribution: BTreeMap<usize, usize>,
    pub total_profit: f64,
    /// Profit of every game, in the order played
    pub profits: Vec<f64>,
    /// Length of every game in ticks, in the order played
    pub durations: Vec<u32>,

    // Profit summary
    /// Mean profit per game
    pub expected_value: f64,
    /// Population standard deviation of profit
    pub std_deviation: f64,
    pub median_profit: f64,
    pub min_profit: f64,
    pub max_profit: f64,
    /// Fraction of games with profit > 0
    pub win_rate: f64,
    /// Fraction of games with profit >= 0
    pub break_even_rate: f64,

    // Game length
    pub avg_duration_ticks: f64,
    pub avg_duration_seconds: f64,
}

impl SimulationStatistics {
    /// Fraction of games finished at `rank`.
    pub fn rank_frequency(&self, rank: usize) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        let count = self.rank_distribution.get(&rank).copied().unwrap_or(0);
        count as f64 / self.games as f64
    }
}

/// Accumulates per game outcomes and finalizes them into
/// [`SimulationStatistics`].
///
/// Builders can be merged, so batches of games may be aggregated
/// separately and combined afterwards. Merging is order independent apart
/// from the order of the retained samples.
#[derive(Debug, Clone, Default)]
pub struct SimulationStatsBuilder {
    rank_distribution: BTreeMap<usize, usize>,
    total_profit: f64,
    profits: Vec<f64>,
    durations: Vec<u32>,
    wins: usize,
    break_evens: usize,
}

impl SimulationStatsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(games: usize) -> Self {
        Self {
            profits: Vec::with_capacity(games),
            durations: Vec::with_capacity(games),
            ..Default::default()
        }
    }

    /// Record the outcome of a single game.
    pub fn record(&mut self, rank: usize, profit: f64, duration_ticks: u32) {
        *self.rank_distribution.entry(rank).or_insert(0) += 1;
        self.total_profit += profit;
        self.profits.push(profit);
        self.durations.push(duration_ticks);
        if profit > 0.0 {
            self.wins += 1;
        }
        if profit >= 0.0 {
            self.break_evens += 1;
        }
    }

    /// Fold another batch of games into this one.
    pub fn merge(&mut self, other: SimulationStatsBuilder) {
        for (rank, count) in other.rank_distribution {
            *self.rank_distribution.entry(rank).or_insert(0) += count;
        }
        self.total_profit += other.total_profit;
        self.profits.extend(other.profits);
        self.durations.extend(other.durations);
        self.wins += other.wins;
        self.break_evens += other.break_evens;
    }

    pub fn games(&self) -> usize {
        self.profits.len()
    }

    /// Mean profit so far.
    pub fn expected_value(&self) -> f64 {
        if self.profits.is_empty() {
            0.0
        } else {
            self.total_profit / self.profits.len() as f64
        }
    }

    /// Fraction of games so far with a profit.
    pub fn win_rate(&self) -> f64 {
        if self.profits.is_empty() {
            0.0
        } else {
            self.wins as f64 / self.profits.len() as f64
        }
    }

    /// Compute the derived statistics and consume the builder.
    pub fn build(self) -> SimulationStatistics {
        let games = self.profits.len();
        let expected_value = self.expected_value();
        let win_rate = self.win_rate();

        if games == 0 {
            return SimulationStatistics {
                games,
                rank_distribution: self.rank_distribution,
                total_profit: 0.0,
                profits: self.profits,
                durations: self.durations,
                expected_value: 0.0,
                std_deviation: 0.0,
                median_profit: 0.0,
                min_profit: 0.0,
                max_profit: 0.0,
                win_rate: 0.0,
                break_even_rate: 0.0,
                avg_duration_ticks: 0.0,
                avg_duration_seconds: 0.0,
            };
        }

        let n = games as f64;
        let variance = self
            .profits
            .iter()
            .map(|p| (p - expected_value).powi(2))
            .sum::<f64>()
            / n;

        let mut sorted = self.profits.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mid = games / 2;
        let median_profit = if games % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        let avg_duration_ticks =
            self.durations.iter().map(|&d| f64::from(d)).sum::<f64>() / self.durations.len() as f64;

        SimulationStatistics {
            games,
            rank_distribution: self.rank_distribution,
            total_profit: self.total_profit,
            expected_value,
            std_deviation: variance.sqrt(),
            median_profit,
            min_profit: sorted[0],
            max_profit: sorted[games - 1],
            win_rate,
            break_even_rate: self.break_evens as f64 / n,
            avg_duration_ticks,
            avg_duration_seconds: avg_duration_ticks / f64::from(TICKS_PER_SECOND),
            profits: self.profits,
            durations: self.durations,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_build_empty() {
        let stats = SimulationStatsBuilder::new().build();
        assert_eq!(stats.games, 0);
        assert_eq!(stats.expected_value, 0.0);
        assert_eq!(stats.rank_frequency(1), 0.0);
        assert!(stats.profits.is_empty());
    }

    #[test]
    fn test_summary_statistics() {
        let mut builder = SimulationStatsBuilder::new();
        builder.record(1, 0.4, 400);
        builder.record(2, -0.5, 600);
        builder.record(2, -0.5, 800);
        builder.record(1, 0.4, 200);

        let stats = builder.build();
        assert_eq!(stats.games, 4);
        assert_abs_diff_eq!(stats.total_profit, -0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.expected_value, -0.05, epsilon = 1e-12);
        // Every profit is 0.45 away from the mean.
        assert_abs_diff_eq!(stats.std_deviation, 0.45, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.median_profit, -0.05, epsilon = 1e-12);
        assert_eq!(stats.min_profit, -0.5);
        assert_eq!(stats.max_profit, 0.4);
        assert_eq!(stats.win_rate, 0.5);
        assert_eq!(stats.break_even_rate, 0.5);
        assert_eq!(stats.avg_duration_ticks, 500.0);
        assert_eq!(stats.avg_duration_seconds, 25.0);
        assert_eq!(stats.rank_distribution.get(&1), Some(&2));
        assert_eq!(stats.rank_frequency(2), 0.5);
    }

    #[test]
    fn test_median_odd_count() {
        let mut builder = SimulationStatsBuilder::new();
        for profit in [3.0, -1.0, 2.0] {
            builder.record(1, profit, 10);
        }
        assert_eq!(builder.build().median_profit, 2.0);
    }

    #[test]
    fn test_zero_profit_breaks_even_but_does_not_win() {
        let mut builder = SimulationStatsBuilder::new();
        builder.record(2, 0.0, 100);
        builder.record(3, -1.0, 100);
        let stats = builder.build();
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.break_even_rate, 0.5);
    }

    #[test]
    fn test_merge_matches_single_builder() {
        let outcomes = [
            (1, 4.0, 900),
            (5, -1.0, 300),
            (2, 0.2, 1_200),
            (8, -1.0, 100),
            (3, -0.4, 700),
        ];

        let mut single = SimulationStatsBuilder::new();
        let mut first = SimulationStatsBuilder::new();
        let mut second = SimulationStatsBuilder::new();
        for (idx, &(rank, profit, duration)) in outcomes.iter().enumerate() {
            single.record(rank, profit, duration);
            if idx % 2 == 0 {
                first.record(rank, profit, duration);
            } else {
                second.record(rank, profit, duration);
            }
        }

        // Merge in the opposite order to check it doesn't matter.
        second.merge(first);
        let merged = second.build();
        let single = single.build();

        assert_eq!(merged.games, single.games);
        assert_eq!(merged.rank_distribution, single.rank_distribution);
        assert_abs_diff_eq!(merged.total_profit, single.total_profit, epsilon = 1e-12);
        assert_abs_diff_eq!(merged.expected_value, single.expected_value, epsilon = 1e-12);
        assert_abs_diff_eq!(merged.std_deviation, single.std_deviation, epsilon = 1e-12);
        assert_eq!(merged.median_profit, single.median_profit);
        assert_eq!(merged.min_profit, single.min_profit);
        assert_eq!(merged.max_profit, single.max_profit);
        assert_eq!(merged.win_rate, single.win_rate);
        assert_eq!(merged.avg_duration_ticks, single.avg_duration_ticks);
    }
}
