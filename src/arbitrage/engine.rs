//! One evaluation pass over a rate graph snapshot.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::{ArbitrageError, CycleEnumerator, RateGraph, Result, enumerate, simulate};
use crate::domain::{Balance, TradeRecord};

/// Default upper bound on cycle length.
pub const DEFAULT_MAX_CYCLE_LENGTH: usize = 4;

/// PassStatus distinguishes a normal pass from one that had nothing to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassStatus {
    /// Every candidate cycle was considered.
    Completed,
    /// The graph had no currencies.
    EmptyGraph,
}

/// PassReport is the outcome of one pass.
#[derive(Debug, Clone)]
pub struct PassReport {
    /// Whether the pass ran over a non-empty graph.
    pub status: PassStatus,
    /// Every reachable cycle in evaluation order.
    pub records: Vec<TradeRecord>,
    /// Profitable cycles in discovery order.
    pub profitable: Vec<TradeRecord>,
    /// Balance the pass started from.
    pub starting_balance: Balance,
    /// Balance after every profitable cycle was committed.
    pub balance: Balance,
    /// Cycles skipped because a hop had no rate.
    pub unreachable: usize,
    /// When the pass started.
    pub started_at: DateTime<Utc>,
}

impl PassReport {
    fn empty(balance: Balance, started_at: DateTime<Utc>) -> Self {
        Self {
            status: PassStatus::EmptyGraph,
            records: Vec::new(),
            profitable: Vec::new(),
            starting_balance: balance,
            balance,
            unreachable: 0,
            started_at,
        }
    }

    /// Returns the best change percent seen in the pass, if any cycle was evaluated.
    pub fn best_change_pct(&self) -> Option<f64> {
        self.records.iter().map(|r| r.change_pct).reduce(f64::max)
    }
}

/// ArbitrageEngine evaluates every candidate cycle of a graph and commits the
/// balance after each profitable one.
///
/// Cycles are evaluated strictly one after another. Each simulation uses the
/// balance as it stands at that moment, so a profitable cycle raises the
/// starting amount of every cycle evaluated after it in the same pass.
#[derive(Debug, Clone)]
pub struct ArbitrageEngine {
    max_cycle_length: usize,
}

impl ArbitrageEngine {
    /// Creates an engine. `max_cycle_length` must be at least 2.
    pub fn new(max_cycle_length: usize) -> Result<Self> {
        if max_cycle_length < 2 {
            return Err(ArbitrageError::InvalidConfiguration(format!(
                "max cycle length must be at least 2, got {}",
                max_cycle_length
            )));
        }
        Ok(Self { max_cycle_length })
    }

    /// Returns the configured maximum cycle length.
    pub fn max_cycle_length(&self) -> usize {
        self.max_cycle_length
    }

    /// Runs one pass over `graph` starting from `balance`.
    pub fn run_pass(&self, graph: &RateGraph, mut balance: Balance) -> PassReport {
        let started_at = Utc::now();
        let starting_balance = balance;

        // Currency order is fixed for the whole pass.
        let enumerator = CycleEnumerator::from_graph(graph, self.max_cycle_length);
        if enumerator.currencies().is_empty() {
            info!("Rate graph is empty, skipping pass");
            return PassReport::empty(balance, started_at);
        }

        debug!(
            currencies = enumerator.currencies().len(),
            edges = graph.edge_count(),
            candidates = enumerator.candidate_count(),
            max_cycle_length = self.max_cycle_length,
            "Starting pass"
        );

        let mut records = Vec::new();
        let mut profitable = Vec::new();
        let mut unreachable = 0;

        let max_len = self.max_cycle_length;
        let cycles = enumerator
            .currencies()
            .iter()
            .flat_map(|start| enumerate(graph, start, max_len));

        for cycle in cycles {
            let before = balance.amount();
            let after = match simulate(graph, &cycle, before) {
                Ok(after) if after.is_finite() => after,
                Ok(after) => {
                    warn!(cycle = %cycle, result = after, "Skipping cycle with non-finite result");
                    unreachable += 1;
                    continue;
                }
                Err(e) => {
                    debug!(cycle = %cycle, error = %e, "Skipping unreachable cycle");
                    unreachable += 1;
                    continue;
                }
            };

            let record = TradeRecord::new(cycle, before, after);
            if record.is_profitable() {
                balance.commit(after);
                info!(
                    cycle = %record.cycle,
                    change_pct = record.change_pct,
                    before = before,
                    after = after,
                    "Profitable cycle committed"
                );
                profitable.push(record.clone());
            } else {
                debug!(cycle = %record.cycle, change_pct = record.change_pct, "Cycle not profitable");
            }
            records.push(record);
        }

        info!(
            evaluated = records.len(),
            profitable = profitable.len(),
            unreachable = unreachable,
            balance = %balance,
            "Pass completed"
        );

        PassReport {
            status: PassStatus::Completed,
            records,
            profitable,
            starting_balance,
            balance,
            unreachable,
            started_at,
        }
    }
}

impl Default for ArbitrageEngine {
    fn default() -> Self {
        Self {
            max_cycle_length: DEFAULT_MAX_CYCLE_LENGTH,
        }
    }
}
