//! Arbitrage engine error types.

use thiserror::Error;

use crate::domain::Currency;

/// Errors produced by the rate graph, simulator and engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArbitrageError {
    /// There is no direct market between the two currencies.
    #[error("no rate from {from} to {to}")]
    EdgeNotFound { from: Currency, to: Currency },

    /// A cycle could not be simulated because one of its hops is missing.
    #[error("path unreachable at hop {hop}: no rate from {from} to {to}")]
    PathUnreachable {
        hop: usize,
        from: Currency,
        to: Currency,
    },

    /// A rate was rejected on insertion.
    #[error("invalid rate {rate} for {from} -> {to}")]
    InvalidRate {
        from: Currency,
        to: Currency,
        rate: f64,
    },

    /// Engine settings that make a pass meaningless.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for arbitrage operations.
pub type Result<T> = std::result::Result<T, ArbitrageError>;
