//! Binance market data integration.

mod client;
mod market;

pub use client::Client;
pub use market::BinanceMarket;
