//! Common utilities for market data providers.

use crate::domain::Currency;

/// Splits a concatenated exchange symbol ("ETHBTC") into base and quote,
/// using the currency universe to find the boundary.
///
/// Returns None unless both halves belong to the universe.
pub fn split_symbol(symbol: &str, universe: &[Currency]) -> Option<(Currency, Currency)> {
    let symbol = symbol.trim().to_uppercase().replace(['/', '_', '-'], "");

    universe.iter().find_map(|base| {
        let quote = symbol.strip_prefix(base.as_str())?;
        universe
            .iter()
            .find(|c| c.as_str() == quote && *c != base)
            .map(|quote| (base.clone(), quote.clone()))
    })
}
