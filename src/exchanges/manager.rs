//! Factory for the configured market data provider.

use std::sync::Arc;

use tracing::info;

use super::binance::BinanceMarket;
use super::{FixtureMarket, MarketData, Result};
use crate::config::{Config, MarketSource};

/// Creates the market data provider selected by `market.source`.
pub fn create_market(config: &Config) -> Result<Arc<dyn MarketData>> {
    let market: Arc<dyn MarketData> = match config.market.source {
        MarketSource::Binance => Arc::new(BinanceMarket::from_config(config)?),
        MarketSource::Fixture => Arc::new(FixtureMarket::from_config(config)?),
    };

    info!(
        market = %market.name(),
        currencies = config.currencies.len(),
        "Market data provider created"
    );

    Ok(market)
}
