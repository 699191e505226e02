//! Console rendering of pass reports.

use crate::arbitrage::{PassReport, PassStatus};
use crate::domain::{TradeOutcome, TradeRecord};

const PATHS_HEADER: &str = "=== Paths This Pass ===";
const PROFITABLE_HEADER: &str = "=== Profitable Trades This Pass ===";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Formats one evaluated cycle.
pub fn format_record(record: &TradeRecord) -> String {
    match record.outcome {
        TradeOutcome::Profit => format!(
            "TRADE: {} | PROFIT {} | Money before: {:.6} -> after: {:.6}",
            record.cycle,
            format_pct(record.change_pct),
            record.balance_before,
            record.balance_after
        ),
        TradeOutcome::Loss => format!(
            "Path: {} | LOSS {}",
            record.cycle,
            format_pct(record.change_pct)
        ),
    }
}

/// Formats a percentage with an explicit sign and four decimals.
pub fn format_pct(pct: f64) -> String {
    format!("{:+.4}%", pct)
}

/// Formats the line that opens a pass: when it started and what it started with.
pub fn format_pass_start(report: &PassReport) -> String {
    format!(
        "Pass started at {} | Starting Balance: {}",
        report.started_at.format(TIMESTAMP_FORMAT),
        report.starting_balance
    )
}

/// Renders a pass: the start line, every path, then the profitable trades,
/// then the balance.
pub fn render_pass(report: &PassReport) -> String {
    let mut lines = vec![
        String::new(),
        format_pass_start(report),
        String::new(),
        PATHS_HEADER.to_string(),
    ];

    if report.status == PassStatus::EmptyGraph {
        lines.push("(no market data)".to_string());
    }
    lines.extend(report.records.iter().map(format_record));

    if !report.profitable.is_empty() {
        lines.push(String::new());
        lines.push(PROFITABLE_HEADER.to_string());
        lines.extend(report.profitable.iter().map(format_record));
    }

    lines.push(String::new());
    lines.push(format!("Current Balance: {}", report.balance));

    lines.join("\n")
}
