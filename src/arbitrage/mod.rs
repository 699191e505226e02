//! Cycle enumeration and profit simulation over a graph of exchange rates.
//!
//! A pass snapshots the graph's currencies, enumerates every simple cycle of
//! bounded length from every start currency, compounds the running balance
//! along each one and commits the result whenever it grows.

mod engine;
mod enumerator;
mod error;
mod graph;
mod simulator;

pub use engine::{ArbitrageEngine, DEFAULT_MAX_CYCLE_LENGTH, PassReport, PassStatus};
pub use enumerator::{CycleEnumerator, enumerate};
pub use error::{ArbitrageError, Result};
pub use graph::RateGraph;
pub use simulator::simulate;

#[cfg(test)]
mod tests;
