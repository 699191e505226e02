//! Bot error types.

use crate::arbitrage::ArbitrageError;
use crate::config::ConfigError;
use crate::exchanges::ExchangeError;

/// Bot error type.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("bot is already running")]
    AlreadyRunning,
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("market data error: {0}")]
    Market(#[from] ExchangeError),
    #[error("arbitrage error: {0}")]
    Arbitrage(#[from] ArbitrageError),
}
