use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

/// Periods must be strictly greater than this.
pub const MIN_PERIOD_NS: f64 = 5_000.0;
/// Periods may be at most one second.
pub const MAX_PERIOD_NS: f64 = 1_000_000_000.0;

static PERIOD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+\-]?[0-9.]+)(s|ms|μs|us|ns)?$").expect("period pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PeriodError {
    #[error("period '{0}' is not in the right format")]
    Format(String),
    #[error("period '{0}' is not a valid number")]
    Number(String),
    #[error("period {0}ns is not within the allowed limit of larger than 5000ns and at most 1s")]
    OutOfRange(f64),
}

/// A thread period in whole nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodNs(pub u64);

impl fmt::Display for PeriodNs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ns", self.0)
    }
}

impl FromStr for PeriodNs {
    type Err = PeriodError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_period(raw)
    }
}

/// Parses `<number>[s|ms|us|μs|ns]`; a bare number is nanoseconds.
pub fn parse_period(raw: &str) -> Result<PeriodNs, PeriodError> {
    let captures = PERIOD_PATTERN
        .captures(raw)
        .ok_or_else(|| PeriodError::Format(raw.to_string()))?;
    let number: f64 = captures[1]
        .parse()
        .map_err(|_| PeriodError::Number(raw.to_string()))?;

    let scale = match captures.get(2).map(|unit| unit.as_str()) {
        Some("s") => 1_000_000_000.0,
        Some("ms") => 1_000_000.0,
        Some("us") | Some("μs") => 1_000.0,
        _ => 1.0,
    };
    let nanos = number * scale;

    if nanos <= MIN_PERIOD_NS || nanos > MAX_PERIOD_NS {
        return Err(PeriodError::OutOfRange(nanos));
    }
    Ok(PeriodNs(nanos.round() as u64))
}
