//! Closed trading path that starts and ends at the same currency.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Currency;

/// Errors raised when a path does not form a simple cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error("cycle must have at least 2 hops, got {0}")]
    TooShort(usize),
    #[error("cycle must start and end at the same currency ({start} != {end})")]
    NotClosed { start: Currency, end: Currency },
    #[error("cycle visits {0} more than once")]
    RepeatedCurrency(Currency),
}

/// Cycle is a simple closed path: `[start, c1, .., ck, start]`.
///
/// Intermediate currencies are pairwise distinct and distinct from the start.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Currency>", into = "Vec<Currency>")]
pub struct Cycle {
    path: Vec<Currency>,
}

impl Cycle {
    /// Builds the cycle `[start] + intermediates + [start]`.
    pub fn new(start: Currency, intermediates: Vec<Currency>) -> Result<Self, CycleError> {
        let mut path = Vec::with_capacity(intermediates.len() + 2);
        path.push(start.clone());
        path.extend(intermediates);
        path.push(start);
        Self::from_path(path)
    }

    /// Builds `[start] + intermediates + [start]` from a selection already
    /// known to be distinct and free of `start`.
    pub(crate) fn closing(start: Currency, intermediates: Vec<Currency>) -> Self {
        debug_assert!(!intermediates.is_empty());
        debug_assert!(!intermediates.contains(&start));

        let mut path = Vec::with_capacity(intermediates.len() + 2);
        path.push(start.clone());
        path.extend(intermediates);
        path.push(start);
        Self { path }
    }

    /// Validates a full path whose first and last elements must match.
    pub fn from_path(path: Vec<Currency>) -> Result<Self, CycleError> {
        let hops = path.len().saturating_sub(1);
        if hops < 2 {
            return Err(CycleError::TooShort(hops));
        }

        let (start, end) = (&path[0], &path[hops]);
        if start != end {
            return Err(CycleError::NotClosed {
                start: start.clone(),
                end: end.clone(),
            });
        }

        let mut seen = HashSet::with_capacity(hops);
        for currency in &path[..hops] {
            if !seen.insert(currency) {
                return Err(CycleError::RepeatedCurrency(currency.clone()));
            }
        }

        Ok(Self { path })
    }

    /// Returns the currency the cycle starts and ends at.
    pub fn start(&self) -> &Currency {
        &self.path[0]
    }

    /// Returns the number of conversions in the cycle.
    pub fn hop_count(&self) -> usize {
        self.path.len() - 1
    }

    /// Returns the full path including the closing currency.
    pub fn path(&self) -> &[Currency] {
        &self.path
    }

    /// Returns consecutive `(from, to)` pairs in trading order.
    pub fn hops(&self) -> impl Iterator<Item = (&Currency, &Currency)> + '_ {
        self.path.windows(2).map(|pair| (&pair[0], &pair[1]))
    }
}

impl TryFrom<Vec<Currency>> for Cycle {
    type Error = CycleError;

    fn try_from(path: Vec<Currency>) -> Result<Self, Self::Error> {
        Self::from_path(path)
    }
}

impl From<Cycle> for Vec<Currency> {
    fn from(cycle: Cycle) -> Self {
        cycle.path
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, currency) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", currency)?;
        }
        Ok(())
    }
}
