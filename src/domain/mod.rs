//! Domain models for cycle arbitrage.

mod balance;
mod currency;
mod cycle;
mod fees;
mod trade;

pub use balance::Balance;
pub use currency::Currency;
pub use cycle::Cycle;
pub use fees::Fee;
pub use trade::{TradeOutcome, TradeRecord};
