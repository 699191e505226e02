//! Market data source configuration.

use serde::Deserialize;
use std::time::Duration;

use super::duration;

/// Where rate graphs come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketSource {
    /// Binance public book tickers.
    #[default]
    Binance,
    /// Static rates listed in the config file.
    Fixture,
}

/// Market data settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketConfig {
    /// Market data provider (default: binance).
    #[serde(default)]
    pub source: MarketSource,
    /// Proportional taker fee as a decimal string (e.g., "0.001" for 0.1%).
    pub fee: Option<String>,
    /// REST API base URL override.
    pub base_url: Option<String>,
    /// HTTP request timeout (default: 10s).
    #[serde(default, with = "duration")]
    pub timeout: Duration,
    /// Maximum API requests per minute.
    pub rate_limit: Option<i64>,
    /// Quoted markets for the fixture source.
    #[serde(default)]
    pub rates: Vec<FixtureRate>,
}

/// A single `base/quote` market quoted at `rate` units of quote per base.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureRate {
    pub base: String,
    pub quote: String,
    /// Raw rate as a decimal string (e.g., "2000").
    pub rate: String,
}
