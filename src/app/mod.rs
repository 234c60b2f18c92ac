//! Application layer containing the scrape collector, configuration and startup.

pub mod collector;
pub mod config;
pub mod startup;
pub mod state;

pub use collector::{BALANCE_METRIC, BalanceCollector, UP_METRIC};
pub use config::Config;
pub use startup::{bootstrap, probe, run, serve};
pub use state::AppState;
