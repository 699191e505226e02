//! Rate graphs built from Binance book tickers.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::Client;
use crate::arbitrage::RateGraph;
use crate::config::Config;
use crate::domain::{Currency, Fee};
use crate::exchanges::{ExchangeError, MarketData, Result, split_symbol};

const EXCHANGE_NAME: &str = "binance";

/// Best bid/ask for every symbol.
const BOOK_TICKER_ENDPOINT: &str = "/api/v3/ticker/bookTicker";

/// BookTicker is one entry of the book ticker response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookTicker {
    pub symbol: String,
    pub bid_price: Option<Decimal>,
    pub ask_price: Option<Decimal>,
}

/// Binance market data provider.
///
/// The best bid of every `BASE/QUOTE` market inside the currency universe
/// becomes the raw rate of the pair in both directions.
pub struct BinanceMarket {
    client: Client,
    fee: Fee,
    universe: Vec<Currency>,
}

impl BinanceMarket {
    /// Creates a new BinanceMarket.
    pub fn new(client: Client, fee: Fee, universe: Vec<Currency>) -> Self {
        Self {
            client,
            fee,
            universe,
        }
    }

    /// Creates a new BinanceMarket from the application config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::from_config(&config.market)
            .map_err(|e| ExchangeError::Config(format!("build binance client: {}", e)))?;
        let fee = config
            .fee()
            .map_err(|e| ExchangeError::Config(e.to_string()))?;

        Ok(Self::new(client, fee, config.universe()))
    }

    /// Fetches the book ticker for every symbol.
    pub async fn fetch_tickers(&self) -> Result<Vec<BookTicker>> {
        let body = self
            .client
            .get(BOOK_TICKER_ENDPOINT)
            .await
            .map_err(|e| ExchangeError::Api(format!("get book tickers: {}", e)))?;

        serde_json::from_slice(&body)
            .map_err(|e| ExchangeError::Api(format!("parse book tickers: {}", e)))
    }

    /// Builds a rate graph from tickers, keeping only markets whose base and
    /// quote are both in the universe and that have a positive bid.
    pub fn build_graph(&self, tickers: &[BookTicker]) -> RateGraph {
        let mut graph = RateGraph::new();
        let mut skipped = 0;

        for ticker in tickers {
            let Some((base, quote)) = split_symbol(&ticker.symbol, &self.universe) else {
                continue;
            };

            let Some(bid) = ticker
                .bid_price
                .filter(|bid| *bid > Decimal::ZERO)
                .and_then(|bid| bid.to_f64())
            else {
                debug!(symbol = %ticker.symbol, "no bid, skipping market");
                skipped += 1;
                continue;
            };

            if let Err(e) = graph.add_edge(&base, &quote, bid, self.fee) {
                warn!(symbol = %ticker.symbol, error = %e, "skipping market");
                skipped += 1;
            }
        }

        info!(
            currencies = graph.len(),
            edges = graph.edge_count(),
            skipped = skipped,
            "built rate graph from binance tickers"
        );

        graph
    }
}

#[async_trait]
impl MarketData for BinanceMarket {
    async fn fetch_graph(&self) -> Result<RateGraph> {
        let tickers = self.fetch_tickers().await?;
        debug!(
            tickers = tickers.len(),
            requests = self.client.request_count(),
            rate_limit = self.client.rate_limit(),
            "fetched tickers"
        );
        Ok(self.build_graph(&tickers))
    }

    fn name(&self) -> &str {
        EXCHANGE_NAME
    }
}
