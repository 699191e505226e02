//! Serde helper for duration strings such as "500ms", "5s" or "1m".
//!
//! A missing or empty value deserializes to `Duration::ZERO`; callers treat
//! zero as "use the default".

use serde::{Deserialize, Deserializer};
use std::time::Duration;

const UNITS: &[(&str, f64)] = &[
    ("ns", 1e-9),
    ("us", 1e-6),
    ("µs", 1e-6),
    ("ms", 1e-3),
    ("s", 1.0),
    ("m", 60.0),
    ("h", 3600.0),
];

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| parse_duration(&s).map_err(serde::de::Error::custom))
        .unwrap_or(Ok(Duration::ZERO))
}

pub(crate) fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Duration::ZERO);
    }

    let split = input
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(input.len());
    let (number, unit) = input.split_at(split);
    let unit = unit.trim();

    let value: f64 = number
        .parse()
        .map_err(|_| format!("invalid duration number: {}", number))?;

    let seconds = if unit.is_empty() {
        1.0
    } else {
        UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, seconds)| *seconds)
            .ok_or_else(|| format!("unknown duration unit: {}", unit))?
    };

    Duration::try_from_secs_f64(value * seconds)
        .map_err(|e| format!("duration out of range: {}: {}", input, e))
}
