//! Market data providers that turn exchange prices into rate graphs.

pub mod binance;
mod fixture;
mod manager;
mod utils;

use async_trait::async_trait;
use thiserror::Error;

use crate::arbitrage::RateGraph;

pub use fixture::FixtureMarket;
pub use manager::create_market;
pub use utils::split_symbol;

/// Market data errors.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Connection error.
    #[error("connection error: {0}")]
    Connection(String),

    /// API error from the exchange.
    #[error("API error: {0}")]
    Api(String),

    /// Provider could not be built from configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Result type for market data operations.
pub type Result<T> = std::result::Result<T, ExchangeError>;

/// MarketData supplies one fully materialized rate graph per pass.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// FetchGraph returns base -> quote -> effective rate for the configured
    /// currency universe, with fees already applied.
    /// Pairs without market data are simply absent.
    async fn fetch_graph(&self) -> Result<RateGraph>;

    /// Name returns the unique identifier of this provider (e.g., "binance").
    fn name(&self) -> &str;
}
