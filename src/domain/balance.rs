//! Running balance carried between cycles and passes.

use std::fmt;

/// Balance is the capital currently held.
///
/// It is owned by the driver, handed to each pass and handed back with the
/// pass result. The amount is always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Balance(f64);

impl Balance {
    /// Creates a balance. Returns None for non-positive or non-finite amounts.
    pub fn new(amount: f64) -> Option<Self> {
        if amount.is_finite() && amount > 0.0 {
            Some(Self(amount))
        } else {
            None
        }
    }

    /// Returns the current amount.
    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Overwrites the amount with the result of a profitable cycle.
    ///
    /// Callers only commit values above the current amount, so the balance
    /// stays positive.
    pub(crate) fn commit(&mut self, amount: f64) {
        debug_assert!(amount.is_finite() && amount > 0.0);
        self.0 = amount;
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}
