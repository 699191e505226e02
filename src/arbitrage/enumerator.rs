//! Candidate cycle generation.

use itertools::Itertools;

use super::RateGraph;
use crate::domain::{Currency, Cycle};

/// CycleEnumerator yields every simple cycle of 2..=max_len hops over a fixed
/// snapshot of currencies.
///
/// For each start currency and each length `L`, every ordered selection of
/// `L - 1` other currencies becomes `[start, ..selection, start]`. Rotations of
/// the same loop are produced once per start currency.
#[derive(Debug, Clone)]
pub struct CycleEnumerator {
    currencies: Vec<Currency>,
    max_len: usize,
}

impl CycleEnumerator {
    /// Creates an enumerator over the given currency snapshot.
    pub fn new(currencies: Vec<Currency>, max_len: usize) -> Self {
        Self { currencies, max_len }
    }

    /// Snapshots the graph's currencies in iteration order.
    pub fn from_graph(graph: &RateGraph, max_len: usize) -> Self {
        Self::new(graph.currencies().cloned().collect(), max_len)
    }

    /// Returns the currency snapshot.
    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    /// Returns every cycle starting at `start`, shortest first.
    ///
    /// The iterator owns its copy of the snapshot and does not borrow the
    /// enumerator.
    pub fn cycles_from(&self, start: &Currency) -> impl Iterator<Item = Cycle> + use<> {
        let start = start.clone();
        let others: Vec<Currency> = self
            .currencies
            .iter()
            .filter(|c| **c != start)
            .cloned()
            .collect();

        (2..=self.max_len).flat_map(move |len| {
            let start = start.clone();
            others
                .clone()
                .into_iter()
                .permutations(len - 1)
                .map(move |selection| Cycle::closing(start.clone(), selection))
        })
    }

    /// Total number of cycles over every start currency.
    pub fn candidate_count(&self) -> usize {
        let n = self.currencies.len();
        let per_start: usize = (2..=self.max_len).map(|len| cycles_per_start(n, len)).sum();
        n * per_start
    }
}

/// Number of cycles of `len` hops starting at one node of an `n`-node graph:
/// `(n-1)! / (n-len)!`.
pub fn cycles_per_start(n: usize, len: usize) -> usize {
    if n == 0 || len < 2 || len > n {
        return 0;
    }
    ((n - len + 1)..n).product()
}

/// Lazily enumerates the cycles of `graph` that start at `start`.
pub fn enumerate(
    graph: &RateGraph,
    start: &Currency,
    max_len: usize,
) -> impl Iterator<Item = Cycle> + use<> {
    CycleEnumerator::from_graph(graph, max_len).cycles_from(start)
}
