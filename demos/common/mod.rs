//! Logging setup shared by the demo programs.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Logging flags, flattened into each demo's arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct TracingArgs {
    /// More logging. -v logs every skill level, -vv every game
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Only log warnings and errors
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log output format
    #[arg(long = "log-format", default_value = "compact", global = true)]
    pub log_format: LogFormat,
}

/// Available log output formats.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    /// One JSON object per event, for feeding runs into other tools
    Json,
}

impl TracingArgs {
    /// Filter directives for the simulator's own targets.
    ///
    /// Per game events live under `elim_ev::simulation` and only show up
    /// at `-vv`, since a single run plays tens of thousands of games.
    /// `-v` adds the per skill level progress of the runner. Other crates
    /// stay at warn.
    fn directives(&self) -> String {
        let (runner, games) = match (self.quiet, self.verbosity) {
            (true, _) => ("warn", "warn"),
            (false, 0) => ("info", "info"),
            (false, 1) => ("debug", "info"),
            (false, _) => ("trace", "trace"),
        };
        format!("warn,elim_ev={runner},elim_ev::simulation={games}")
    }

    /// Install the global subscriber. `RUST_LOG` wins when set.
    ///
    /// # Panics
    ///
    /// Panics if the subscriber has already been set.
    pub fn init_tracing(&self) {
        let filter = match std::env::var("RUST_LOG") {
            Ok(_) => EnvFilter::from_default_env(),
            Err(_) => EnvFilter::new(self.directives()),
        };

        let layer = match self.log_format {
            LogFormat::Compact => fmt::layer().compact().boxed(),
            LogFormat::Pretty => fmt::layer().pretty().boxed(),
            LogFormat::Json => fmt::layer().json().boxed(),
        };

        tracing_subscriber::registry().with(filter).with(layer).init();
    }
}
