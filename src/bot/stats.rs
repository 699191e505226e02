//! Runtime statistics for the bot.

use crate::arbitrage::{PassReport, PassStatus};

/// Runtime statistics accumulated over all passes.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub passes: u64,
    pub empty_passes: u64,
    pub failed_passes: u64,
    pub cycles_evaluated: u64,
    pub profitable_cycles: u64,
    pub unreachable_cycles: u64,
    pub best_change_pct: Option<f64>,
}

impl Stats {
    /// Folds a finished pass into the totals.
    pub fn record(&mut self, report: &PassReport) {
        self.passes += 1;
        if report.status == PassStatus::EmptyGraph {
            self.empty_passes += 1;
        }
        self.cycles_evaluated += report.records.len() as u64;
        self.profitable_cycles += report.profitable.len() as u64;
        self.unreachable_cycles += report.unreachable as u64;

        if let Some(best) = report.best_change_pct() {
            self.best_change_pct = Some(match self.best_change_pct {
                Some(current) => current.max(best),
                None => best,
            });
        }
    }
}
