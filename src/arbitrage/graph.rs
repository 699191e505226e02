//! Directed graph of fee-adjusted conversion rates.

use indexmap::IndexMap;

use super::{ArbitrageError, Result};
use crate::domain::{Currency, Fee};

/// RateGraph maps every currency to the currencies it converts into directly.
///
/// Stored rates already include the trading fee. Currencies iterate in
/// insertion order, so a graph built from the same market data always yields
/// the same enumeration order.
#[derive(Debug, Clone, Default)]
pub struct RateGraph {
    edges: IndexMap<Currency, IndexMap<Currency, f64>>,
}

impl RateGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from already fee-adjusted directed rates.
    pub fn from_effective_rates<I>(rates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Currency, Currency, f64)>,
    {
        let mut graph = Self::new();
        for (from, to, rate) in rates {
            graph.insert_rate(&from, &to, rate)?;
        }
        Ok(graph)
    }

    /// Inserts a market quoted as `base/quote` at `raw_rate`.
    ///
    /// Adds `base -> quote` at `raw_rate * (1 - fee)` and `quote -> base` at
    /// `(1 / raw_rate) * (1 - fee)`, replacing any previous rates for both
    /// ordered pairs.
    pub fn add_edge(
        &mut self,
        base: &Currency,
        quote: &Currency,
        raw_rate: f64,
        fee: Fee,
    ) -> Result<()> {
        if !raw_rate.is_finite() || raw_rate <= 0.0 {
            return Err(ArbitrageError::InvalidRate {
                from: base.clone(),
                to: quote.clone(),
                rate: raw_rate,
            });
        }

        self.insert_rate(base, quote, fee.forward(raw_rate))?;
        self.insert_rate(quote, base, fee.reverse(raw_rate))
    }

    /// Inserts a single directed rate that already includes fees.
    ///
    /// The target currency becomes a node of the graph even if it has no
    /// outgoing rates yet.
    pub fn insert_rate(&mut self, from: &Currency, to: &Currency, rate: f64) -> Result<()> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ArbitrageError::InvalidRate {
                from: from.clone(),
                to: to.clone(),
                rate,
            });
        }

        self.edges
            .entry(from.clone())
            .or_default()
            .insert(to.clone(), rate);
        self.edges.entry(to.clone()).or_default();
        Ok(())
    }

    /// Returns the effective rate for converting `from` into `to`.
    pub fn rate(&self, from: &Currency, to: &Currency) -> Result<f64> {
        self.edges
            .get(from)
            .and_then(|targets| targets.get(to))
            .copied()
            .ok_or_else(|| ArbitrageError::EdgeNotFound {
                from: from.clone(),
                to: to.clone(),
            })
    }

    /// Returns the currencies directly reachable from `from`.
    pub fn neighbors<'a>(&'a self, from: &Currency) -> impl Iterator<Item = &'a Currency> + 'a {
        self.edges
            .get(from)
            .into_iter()
            .flat_map(|targets| targets.keys())
    }

    /// Returns every known currency in insertion order.
    pub fn currencies(&self) -> impl ExactSizeIterator<Item = &Currency> + '_ {
        self.edges.keys()
    }

    /// Returns true if the currency is a node of the graph.
    pub fn contains(&self, currency: &Currency) -> bool {
        self.edges.contains_key(currency)
    }

    /// Number of currencies.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph has no currencies.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of directed rates.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(IndexMap::len).sum()
    }
}
