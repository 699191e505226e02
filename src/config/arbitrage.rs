//! Arbitrage pass configuration.

use serde::Deserialize;
use std::time::Duration;

use super::duration;

/// Arbitrage pass settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArbitrageConfig {
    /// Initial capital as a decimal string (default: "10000").
    pub starting_balance: Option<String>,
    /// Longest cycle to evaluate, in hops (default: 4).
    pub max_cycle_length: Option<usize>,
    /// Delay between passes (default: 5s).
    #[serde(default, with = "duration")]
    pub pass_interval: Duration,
    /// Run a single pass and exit. Defaults to true for the fixture source.
    pub single_pass: Option<bool>,
}
