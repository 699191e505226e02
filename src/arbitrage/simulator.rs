//! Compounding a balance along a cycle.

use super::{ArbitrageError, RateGraph, Result};
use crate::domain::Cycle;

/// PathSimulator follows a cycle hop by hop through a rate graph.
pub struct PathSimulator<'a> {
    graph: &'a RateGraph,
}

impl<'a> PathSimulator<'a> {
    /// Creates a simulator over the given graph.
    pub fn new(graph: &'a RateGraph) -> Self {
        Self { graph }
    }

    /// Returns the value obtained by converting `starting_balance` along every
    /// hop of `cycle`.
    ///
    /// Fails with `PathUnreachable` on the first missing hop; no partial
    /// result is returned.
    pub fn simulate(&self, cycle: &Cycle, starting_balance: f64) -> Result<f64> {
        cycle
            .hops()
            .enumerate()
            .try_fold(starting_balance, |value, (hop, (from, to))| {
                let rate = self.graph.rate(from, to).map_err(|_| {
                    ArbitrageError::PathUnreachable {
                        hop,
                        from: from.clone(),
                        to: to.clone(),
                    }
                })?;
                Ok(value * rate)
            })
    }
}

/// Simulates `cycle` on `graph` starting from `starting_balance`.
pub fn simulate(graph: &RateGraph, cycle: &Cycle, starting_balance: f64) -> Result<f64> {
    PathSimulator::new(graph).simulate(cycle, starting_balance)
}
