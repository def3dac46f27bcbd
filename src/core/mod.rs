//! Game configuration shared by the simulator and the Monte Carlo runner.
//!
//! [`ModeSet`] owns the configured [`GameMode`]s and the [`PayoutTable`]
//! they pay out from. Both are immutable once built and are passed
//! explicitly to everything that needs them.
mod errors;
mod mode;
mod payout;

pub use errors::{Result, SimulationError};
pub use mode::{GameMode, ModeSet};
pub use payout::{PayoutTable, PrizeShare};
