//! Offline market data provider backed by static rates.

use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use tracing::{info, warn};

use super::{ExchangeError, MarketData, Result};
use crate::arbitrage::RateGraph;
use crate::config::Config;
use crate::domain::{Currency, Fee};

const EXCHANGE_NAME: &str = "fixture";

/// FixtureMarket serves the same quoted markets on every pass.
///
/// Useful for dry runs and for reproducing a known price set without network
/// access.
pub struct FixtureMarket {
    markets: Vec<(Currency, Currency, f64)>,
    fee: Fee,
    universe: Vec<Currency>,
}

impl FixtureMarket {
    /// Creates a provider from `(base, quote, raw rate)` markets.
    pub fn new(
        markets: Vec<(Currency, Currency, f64)>,
        fee: Fee,
        universe: Vec<Currency>,
    ) -> Self {
        Self {
            markets,
            fee,
            universe,
        }
    }

    /// Creates a provider from the `market.rates` section of the config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fee = config
            .fee()
            .map_err(|e| ExchangeError::Config(e.to_string()))?;

        let markets = config
            .fixture_rates()
            .map_err(|e| ExchangeError::Config(e.to_string()))?
            .into_iter()
            .map(|(base, quote, rate)| {
                let raw = rate.to_f64().ok_or_else(|| {
                    ExchangeError::Config(format!(
                        "rate {} for {}/{} is out of range",
                        rate, base, quote
                    ))
                })?;
                Ok((base, quote, raw))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(markets, fee, config.universe()))
    }

    fn in_universe(&self, currency: &Currency) -> bool {
        self.universe.contains(currency)
    }
}

#[async_trait]
impl MarketData for FixtureMarket {
    async fn fetch_graph(&self) -> Result<RateGraph> {
        let mut graph = RateGraph::new();

        for (base, quote, rate) in &self.markets {
            if !self.in_universe(base) || !self.in_universe(quote) {
                warn!(base = %base, quote = %quote, "market outside currency universe, skipping");
                continue;
            }
            if let Err(e) = graph.add_edge(base, quote, *rate, self.fee) {
                warn!(base = %base, quote = %quote, error = %e, "skipping market");
            }
        }

        info!(
            currencies = graph.len(),
            edges = graph.edge_count(),
            "built rate graph from fixture"
        );

        Ok(graph)
    }

    fn name(&self) -> &str {
        EXCHANGE_NAME
    }
}
