//! Configuration loading and validation.
//!
//! Uses serde_yaml to load YAML configuration files. Numeric money values are
//! written as decimal strings and parsed with rust_decimal so that "0.001"
//! means exactly what it says in the file.

mod app;
mod arbitrage;
mod duration;
mod error;
mod market;

pub use app::AppConfig;
pub use arbitrage::ArbitrageConfig;
pub use error::ConfigError;
pub use market::{MarketConfig, MarketSource};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use std::{env, fs, str::FromStr, time::Duration};

use crate::arbitrage::DEFAULT_MAX_CYCLE_LENGTH;
use crate::domain::{Balance, Currency, Fee};

/// Fee applied when `market.fee` is not set (Binance spot taker fee).
const DEFAULT_FEE: &str = "0.001";

/// Starting capital when `arbitrage.starting_balance` is not set.
const DEFAULT_STARTING_BALANCE: &str = "10000";

/// Delay between passes when `arbitrage.pass_interval` is not set.
const DEFAULT_PASS_INTERVAL: Duration = Duration::from_secs(5);

/// Root configuration structure.
///
/// Required sections: app, market, currencies.
/// Optional sections: arbitrage.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Application-level settings like name and log level.
    pub app: AppConfig,
    /// Market data provider settings.
    pub market: MarketConfig,
    /// Pass settings (optional).
    #[serde(default)]
    pub arbitrage: ArbitrageConfig,
    /// Currency universe scanned for cycles (e.g., "BTC", "ETH").
    pub currencies: Vec<String>,
}

impl Config {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Loads `.env` first (if present) so that `MARKET_BASE_URL` can override
    /// the configured REST endpoint.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("MARKET_BASE_URL") {
            if !url.is_empty() {
                self.market.base_url = Some(url);
            }
        }
    }

    /// Returns the configured trading fee.
    pub fn fee(&self) -> Result<Fee, ConfigError> {
        let raw = self.market.fee.as_deref().unwrap_or(DEFAULT_FEE);
        let value = parse_decimal("market.fee", raw)?;
        Fee::from_decimal(value).ok_or_else(|| {
            ConfigError::Validation(format!("market.fee must be in [0, 1), got {}", raw))
        })
    }

    /// Returns the configured starting balance.
    pub fn starting_balance(&self) -> Result<Balance, ConfigError> {
        let raw = self
            .arbitrage
            .starting_balance
            .as_deref()
            .unwrap_or(DEFAULT_STARTING_BALANCE);
        let value = parse_decimal("arbitrage.starting_balance", raw)?;
        value.to_f64().and_then(Balance::new).ok_or_else(|| {
            ConfigError::Validation(format!(
                "arbitrage.starting_balance must be positive, got {}",
                raw
            ))
        })
    }

    /// Returns the longest cycle to evaluate.
    pub fn max_cycle_length(&self) -> usize {
        self.arbitrage
            .max_cycle_length
            .unwrap_or(DEFAULT_MAX_CYCLE_LENGTH)
    }

    /// Returns the delay between passes.
    pub fn pass_interval(&self) -> Duration {
        if self.arbitrage.pass_interval.is_zero() {
            DEFAULT_PASS_INTERVAL
        } else {
            self.arbitrage.pass_interval
        }
    }

    /// Returns true if the driver should stop after one pass.
    pub fn single_pass(&self) -> bool {
        self.arbitrage
            .single_pass
            .unwrap_or(self.market.source == MarketSource::Fixture)
    }

    /// Returns the currency universe.
    pub fn universe(&self) -> Vec<Currency> {
        self.currencies
            .iter()
            .map(|s| Currency::new(s.trim().to_uppercase()))
            .collect()
    }

    /// Returns the fixture markets as `(base, quote, raw rate)`.
    pub fn fixture_rates(&self) -> Result<Vec<(Currency, Currency, Decimal)>, ConfigError> {
        self.market
            .rates
            .iter()
            .map(|r| {
                let field = format!("market.rates[{}/{}]", r.base, r.quote);
                let rate = parse_decimal(&field, &r.rate)?;
                if rate <= Decimal::ZERO {
                    return Err(ConfigError::Validation(format!(
                        "{}: rate must be positive",
                        field
                    )));
                }
                Ok((
                    Currency::new(r.base.trim().to_uppercase()),
                    Currency::new(r.quote.trim().to_uppercase()),
                    rate,
                ))
            })
            .collect()
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.app.name.is_empty() {
            return Err(ConfigError::Validation("app.name is required".into()));
        }

        if self.currencies.is_empty() {
            return Err(ConfigError::Validation(
                "at least one currency is required".into(),
            ));
        }

        if self.currencies.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "currencies must not contain empty symbols".into(),
            ));
        }

        self.fee()?;
        self.starting_balance()?;

        let max_cycle_length = self.max_cycle_length();
        if max_cycle_length < 2 {
            return Err(ConfigError::Validation(format!(
                "arbitrage.max_cycle_length must be at least 2, got {}",
                max_cycle_length
            )));
        }

        if self.market.source == MarketSource::Fixture {
            if self.market.rates.is_empty() {
                return Err(ConfigError::Validation(
                    "market.rates is required for the fixture source".into(),
                ));
            }
            self.fixture_rates()?;
        }

        if let Some(limit) = self.market.rate_limit {
            if limit <= 0 {
                return Err(ConfigError::Validation(
                    "market.rate_limit must be positive".into(),
                ));
            }
        }

        Ok(())
    }
}

fn parse_decimal(field: &str, raw: &str) -> Result<Decimal, ConfigError> {
    Decimal::from_str(raw.trim()).map_err(|source| ConfigError::Decimal {
        field: field.to_string(),
        source,
    })
}
