use crate::core::GameMode;

use super::analysis::{FairnessVerdict, HouseAnalysis, SkillImpactAnalysis};
use super::stats::SimulationStatistics;

/// Number of profit and duration samples written out when a report is
/// persisted. Reports in memory always keep every sample.
pub const PERSISTED_SAMPLE_LIMIT: usize = 100;

/// Everything learned about one mode from a Monte Carlo analysis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregateReport {
    pub mode: String,
    pub simulation_count: usize,
    pub subject_skill: f64,
    pub mode_config: GameMode,
    pub statistics: SimulationStatistics,
    pub house_analysis: HouseAnalysis,
    pub skill_impact: SkillImpactAnalysis,
}

impl AggregateReport {
    pub fn new(
        mode_config: GameMode,
        subject_skill: f64,
        statistics: SimulationStatistics,
        house_analysis: HouseAnalysis,
        skill_impact: SkillImpactAnalysis,
    ) -> Self {
        Self {
            mode: mode_config.name.clone(),
            simulation_count: statistics.games,
            subject_skill,
            mode_config,
            statistics,
            house_analysis,
            skill_impact,
        }
    }

    pub fn verdict(&self) -> FairnessVerdict {
        FairnessVerdict::evaluate(
            &self.mode_config,
            &self.statistics,
            &self.house_analysis,
            &self.skill_impact,
        )
    }

    /// A copy with the profit and duration samples cut down to `limit`
    /// entries. Every other field is unchanged.
    pub fn truncated(&self, limit: usize) -> Self {
        let mut report = self.clone();
        report.statistics.profits.truncate(limit);
        report.statistics.durations.truncate(limit);
        report
    }

    /// Format the report as Markdown
    pub fn to_markdown(&self) -> String {
        let stats = &self.statistics;
        let mut output = String::new();

        output.push_str(&format!("{}\n", "=".repeat(60)));
        output.push_str("# Monte Carlo Simulation Report\n");
        output.push_str(&format!("{}\n\n", "=".repeat(60)));

        output.push_str(&format!("- **Mode**: {}\n", self.mode.to_uppercase()));
        output.push_str(&format!("- **Simulations**: {}\n", self.simulation_count));
        output.push_str(&format!("- **Player Skill**: {}\n\n", self.subject_skill));

        output.push_str("## Rank Distribution\n\n");
        output.push_str("```text\n");
        for rank in 1..=self.mode_config.player_count {
            let pct = stats.rank_frequency(rank) * 100.0;
            let bar = "#".repeat((pct / 2.0) as usize);
            output.push_str(&format!("Rank {:>2}: {} {:.1}%\n", rank, bar, pct));
        }
        output.push_str("```\n\n");

        output.push_str("## Financial Analysis\n\n");
        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|-------|\n");
        output.push_str(&format!("| Expected Value | ${:+.4} |\n", stats.expected_value));
        output.push_str(&format!("| Std Deviation | ${:.4} |\n", stats.std_deviation));
        output.push_str(&format!("| Median Profit | ${:+.4} |\n", stats.median_profit));
        output.push_str(&format!(
            "| Min/Max Profit | ${:.2} / ${:.2} |\n",
            stats.min_profit, stats.max_profit
        ));
        output.push_str(&format!("| Win Rate | {:.1}% |\n", stats.win_rate * 100.0));
        output.push_str(&format!(
            "| Break-even Rate | {:.1}% |\n",
            stats.break_even_rate * 100.0
        ));
        output.push('\n');

        let house = &self.house_analysis;
        output.push_str("## House Edge Analysis\n\n");
        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|-------|\n");
        output.push_str(&format!("| Entry Pool | ${:.2} |\n", house.total_entry_per_game));
        output.push_str(&format!("| Prize Pool | ${:.2} |\n", house.total_prize_per_game));
        output.push_str(&format!("| House Take | ${:.2} |\n", house.house_take_per_game));
        output.push_str(&format!("| House Edge | {:.1}% |\n", house.house_edge_percent));
        output.push('\n');

        if !self.skill_impact.levels.is_empty() {
            output.push_str("## Skill Impact Analysis\n\n");
            output.push_str("| Skill | EV | Win Rate |\n");
            output.push_str("|-------|----|----------|\n");
            for level in &self.skill_impact.levels {
                output.push_str(&format!(
                    "| {} | ${:+.4} | {:.1}% |\n",
                    level.skill,
                    level.expected_value,
                    level.win_rate * 100.0
                ));
            }
            output.push('\n');
        }

        output.push_str("## Game Duration\n\n");
        output.push_str(&format!(
            "- **Avg Duration**: {:.1} seconds ({:.0} ticks)\n\n",
            stats.avg_duration_seconds, stats.avg_duration_ticks
        ));

        let verdict = self.verdict();
        output.push_str("## Verdict\n\n");
        output.push_str(&verdict_line(
            verdict.house_edge_reasonable,
            "House edge is reasonable (<15%)",
            "House edge is high (>=15%)",
        ));
        if let Some(skill_matters) = verdict.skill_matters {
            output.push_str(&verdict_line(
                skill_matters,
                "Skill significantly impacts outcomes",
                "Skill has limited impact on outcomes",
            ));
        }
        output.push_str(&verdict_line(
            verdict.duration_on_target,
            "Game duration meets 30+ second target",
            "Games are shorter than 30 second target",
        ));
        output.push_str(&verdict_line(
            verdict.expected_value_fair,
            "Expected value is fair for skill-based game",
            "Expected value may be too negative",
        ));

        output
    }

    /// Serialize the report with samples cut to [`PERSISTED_SAMPLE_LIMIT`].
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> crate::core::Result<String> {
        Ok(serde_json::to_string_pretty(
            &self.truncated(PERSISTED_SAMPLE_LIMIT),
        )?)
    }
}

fn verdict_line(ok: bool, pass: &str, fail: &str) -> String {
    if ok {
        format!("- [OK] {}\n", pass)
    } else {
        format!("- [!] {}\n", fail)
    }
}

/// Reports for every configured mode, in configuration order.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossModeReport {
    reports: Vec<AggregateReport>,
}

impl CrossModeReport {
    pub fn new(reports: Vec<AggregateReport>) -> Self {
        Self { reports }
    }

    pub fn reports(&self) -> &[AggregateReport] {
        &self.reports
    }

    pub fn get(&self, mode: &str) -> Option<&AggregateReport> {
        self.reports.iter().find(|report| report.mode == mode)
    }

    /// Side by side comparison of every mode
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();
        output.push_str("# Cross-Mode Comparison\n\n");
        output.push_str("| Mode | House Edge | EV | Win Rate | Skill Impact |\n");
        output.push_str("|------|------------|----|----------|--------------|\n");
        for report in &self.reports {
            let skill_impact = report
                .skill_impact
                .skill_spread()
                .map(|spread| format!("${:+.3}", spread))
                .unwrap_or_else(|| "n/a".to_string());
            output.push_str(&format!(
                "| {} | {:.1}% | ${:+.3} | {:.1}% | {} |\n",
                report.mode,
                report.house_analysis.house_edge_percent,
                report.statistics.expected_value,
                report.statistics.win_rate * 100.0,
                skill_impact
            ));
        }
        output
    }

    /// Serialize as a JSON object keyed by mode name, with samples cut to
    /// [`PERSISTED_SAMPLE_LIMIT`].
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> crate::core::Result<String> {
        let persisted: serde_json::Map<String, serde_json::Value> = self
            .reports
            .iter()
            .map(|report| {
                serde_json::to_value(report.truncated(PERSISTED_SAMPLE_LIMIT))
                    .map(|value| (report.mode.clone(), value))
            })
            .collect::<Result<_, _>>()?;
        Ok(serde_json::to_string_pretty(&persisted)?)
    }

    /// Write the JSON results to `path`
    #[cfg(feature = "serde")]
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> crate::core::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::core::ModeSet;
    use crate::monte_carlo::{SimulationStatsBuilder, SkillImpact};

    fn create_test_report(mode_name: &str, games: usize) -> AggregateReport {
        let modes = ModeSet::default();
        let mode = modes.mode(mode_name).unwrap().clone();

        let mut builder = SimulationStatsBuilder::new();
        for idx in 0..games {
            if idx % 4 == 0 {
                builder.record(1, 0.4, 700);
            } else {
                builder.record(2, -0.5, 500);
            }
        }

        AggregateReport::new(
            mode.clone(),
            0.5,
            builder.build(),
            HouseAnalysis::from_mode(&mode),
            SkillImpactAnalysis {
                levels: vec![
                    SkillImpact {
                        skill: 0.2,
                        games: 10,
                        expected_value: -0.3,
                        win_rate: 0.2,
                    },
                    SkillImpact {
                        skill: 0.8,
                        games: 10,
                        expected_value: 0.1,
                        win_rate: 0.6,
                    },
                ],
            },
        )
    }

    #[test]
    fn test_new_takes_name_and_count() {
        let report = create_test_report("duel", 40);
        assert_eq!(report.mode, "duel");
        assert_eq!(report.simulation_count, 40);
    }

    #[test]
    fn test_truncated_keeps_summary() {
        let report = create_test_report("duel", 250);
        let truncated = report.truncated(PERSISTED_SAMPLE_LIMIT);
        assert_eq!(truncated.statistics.profits.len(), 100);
        assert_eq!(truncated.statistics.durations.len(), 100);
        assert_eq!(truncated.statistics.profits[..], report.statistics.profits[..100]);
        assert_eq!(
            truncated.statistics.expected_value,
            report.statistics.expected_value
        );
        assert_eq!(truncated.statistics.games, 250);
        // The untruncated report still has every sample.
        assert_eq!(report.statistics.profits.len(), 250);
    }

    #[test]
    fn test_to_markdown_contains_sections() {
        let markdown = create_test_report("duel", 8).to_markdown();
        assert!(markdown.contains("Mode**: DUEL"));
        assert!(markdown.contains("## Rank Distribution"));
        assert!(markdown.contains("Rank  1: ############ 25.0%"));
        assert!(markdown.contains("## Financial Analysis"));
        assert!(markdown.contains("## House Edge Analysis"));
        assert!(markdown.contains("| House Edge | 10.0% |"));
        assert!(markdown.contains("## Skill Impact Analysis"));
        assert!(markdown.contains("## Verdict"));
        assert!(markdown.contains("[OK] House edge is reasonable"));
        assert!(markdown.contains("[OK] Skill significantly impacts outcomes"));
        // 550 ticks on average is 27.5 seconds.
        assert!(markdown.contains("[!] Games are shorter than 30 second target"));
    }

    #[test]
    fn test_cross_mode_markdown() {
        let cross = CrossModeReport::new(vec![
            create_test_report("duel", 8),
            create_test_report("ranked", 8),
        ]);
        let markdown = cross.to_markdown();
        assert!(markdown.contains("| duel | 10.0% |"));
        assert!(markdown.contains("| ranked | 30.0% |"));
        assert!(markdown.contains("$+0.400"));
        assert_eq!(cross.get("ranked").unwrap().mode, "ranked");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_to_json_truncates_samples() {
        let report = create_test_report("squad", 300);
        let json = report.to_json().unwrap();
        let parsed: AggregateReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.statistics.profits.len(), 100);
        assert_eq!(parsed.statistics.durations.len(), 100);
        assert_eq!(parsed.statistics.games, 300);
        assert_eq!(parsed.mode_config, report.mode_config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_save_to_file() {
        let cross = CrossModeReport::new(vec![
            create_test_report("duel", 150),
            create_test_report("arena", 20),
        ]);

        let temp_dir =
            std::env::temp_dir().join(format!("elim_ev_test_{}", std::process::id()));
        let path = temp_dir.join("monte_carlo_results.json");
        cross.save_to_file(&path).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        let parsed: BTreeMap<String, AggregateReport> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["duel"].statistics.profits.len(), 100);
        assert_eq!(parsed["arena"].statistics.profits.len(), 20);

        std::fs::remove_dir_all(&temp_dir).unwrap();
    }
}
