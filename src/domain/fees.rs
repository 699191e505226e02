//! Trading fee structures.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Fee is the proportional trading fee charged on every conversion.
/// Expressed as a fraction (e.g., 0.001 for 0.1%).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Fee(f64);

impl Fee {
    /// A fee of zero.
    pub const ZERO: Fee = Fee(0.0);

    /// Creates a new Fee. Returns None unless the rate lies in [0, 1).
    pub fn new(rate: f64) -> Option<Self> {
        if rate.is_finite() && (0.0..1.0).contains(&rate) {
            Some(Self(rate))
        } else {
            None
        }
    }

    /// Creates a Fee from a decimal value as found in config files.
    pub fn from_decimal(rate: Decimal) -> Option<Self> {
        rate.to_f64().and_then(Self::new)
    }

    /// Returns the fee as a fraction.
    pub fn rate(&self) -> f64 {
        self.0
    }

    /// Effective rate for the base -> quote direction: `raw * (1 - fee)`.
    pub fn forward(&self, raw_rate: f64) -> f64 {
        raw_rate * (1.0 - self.0)
    }

    /// Effective rate for the quote -> base direction: `(1 / raw) * (1 - fee)`.
    pub fn reverse(&self, raw_rate: f64) -> f64 {
        (1.0 / raw_rate) * (1.0 - self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_fee_range() {
        assert!(Fee::new(0.0).is_some());
        assert!(Fee::new(0.999).is_some());
        assert!(Fee::new(1.0).is_none());
        assert!(Fee::new(-0.1).is_none());
        assert!(Fee::new(f64::NAN).is_none());
    }

    #[test]
    fn test_fee_from_decimal() {
        let fee = Fee::from_decimal(Decimal::from_str("0.001").unwrap()).unwrap();
        assert!((fee.rate() - 0.001).abs() < 1e-12);
    }

    #[test]
    fn test_forward_and_reverse() {
        let fee = Fee::new(0.5).unwrap();
        assert!((fee.forward(4.0) - 2.0).abs() < 1e-12);
        assert!((fee.reverse(4.0) - 0.125).abs() < 1e-12);
    }
}
