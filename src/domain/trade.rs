//! Outcome of evaluating a single cycle.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Cycle;

/// TradeOutcome tags a record as profitable or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeOutcome {
    /// The cycle returned more than it started with; the balance was committed.
    Profit,
    /// The cycle returned the same or less; the balance was left untouched.
    Loss,
}

impl fmt::Display for TradeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeOutcome::Profit => write!(f, "profit"),
            TradeOutcome::Loss => write!(f, "loss"),
        }
    }
}

/// TradeRecord is one evaluated cycle in a pass report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// The evaluated cycle.
    pub cycle: Cycle,
    /// Percentage change relative to the balance at evaluation time.
    pub change_pct: f64,
    /// Balance the cycle was simulated against.
    pub balance_before: f64,
    /// Compounded result of following the cycle.
    pub balance_after: f64,
    /// Whether the cycle was profitable.
    pub outcome: TradeOutcome,
}

impl TradeRecord {
    /// Builds a record from a simulated cycle and classifies it.
    pub fn new(cycle: Cycle, balance_before: f64, balance_after: f64) -> Self {
        let change_pct = (balance_after - balance_before) / balance_before * 100.0;
        let outcome = if change_pct > 0.0 {
            TradeOutcome::Profit
        } else {
            TradeOutcome::Loss
        };

        Self {
            cycle,
            change_pct,
            balance_before,
            balance_after,
            outcome,
        }
    }

    /// Returns true if the cycle was profitable.
    pub fn is_profitable(&self) -> bool {
        self.outcome == TradeOutcome::Profit
    }
}
