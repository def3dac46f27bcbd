extern crate elim_ev;

mod common;

use std::path::PathBuf;

use clap::Parser;
use elim_ev::core::ModeSet;
use elim_ev::monte_carlo::{CrossModeReport, MonteCarloBuilder};

#[derive(Parser, Debug)]
#[command(
    name = "monte_carlo_ev",
    about = "Estimate expected value and fairness of elimination game modes",
    long_about = "Simulate thousands of elimination games and report the expected value,\n\
                  win rate, house edge and skill impact of one or every game mode."
)]
struct Args {
    /// Tracing/logging options
    #[command(flatten)]
    tracing: common::TracingArgs,

    /// Mode to analyze. Every mode is analyzed when omitted.
    #[arg(short, long)]
    mode: Option<String>,

    /// Number of games to simulate per mode
    /// [default: 10000 for one mode, 5000 for every mode]
    #[arg(short = 'n', long)]
    simulations: Option<usize>,

    /// Skill of the tracked player, between 0 and 1
    #[arg(short, long, default_value_t = 0.5)]
    skill: f64,

    /// Random seed for a repeatable run
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file describing custom modes and payouts
    #[arg(long)]
    modes: Option<PathBuf>,

    /// Where to write the JSON results
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.tracing.init_tracing();

    let modes = match &args.modes {
        Some(path) => ModeSet::from_path(path)?,
        None => ModeSet::default(),
    };

    let mut builder = MonteCarloBuilder::new().modes(modes).subject_skill(args.skill);
    if let Some(simulations) = args.simulations {
        builder = builder.simulation_count(simulations);
    }
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let runner = builder.build()?;

    let all = match &args.mode {
        Some(mode) => {
            let report = runner.run_monte_carlo(mode)?;
            CrossModeReport::new(vec![report])
        }
        None => runner.analyze_all_modes()?,
    };

    for report in all.reports() {
        println!("{}", report.to_markdown());
    }
    if all.reports().len() > 1 {
        println!("{}", all.to_markdown());
    }

    if let Some(output) = &args.output {
        all.save_to_file(output)?;
        println!("Detailed results saved to {}", output.display());
    }

    Ok(())
}
