//! Time periods written as `200ms`, `3s`, `1.5min` or `01:30:00`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

const MICROS_PER_MILLI: u64 = 1_000;
const MICROS_PER_SECOND: u64 = 1_000_000;

/// Units accepted after the number, with their length in microseconds.
const UNITS: &[(&str, u64)] = &[
    ("us", 1),
    ("microseconds", 1),
    ("ms", MICROS_PER_MILLI),
    ("millisecond", MICROS_PER_MILLI),
    ("milliseconds", MICROS_PER_MILLI),
    ("s", MICROS_PER_SECOND),
    ("sec", MICROS_PER_SECOND),
    ("secs", MICROS_PER_SECOND),
    ("second", MICROS_PER_SECOND),
    ("seconds", MICROS_PER_SECOND),
    ("min", 60 * MICROS_PER_SECOND),
    ("mins", 60 * MICROS_PER_SECOND),
    ("minute", 60 * MICROS_PER_SECOND),
    ("minutes", 60 * MICROS_PER_SECOND),
    ("h", 3_600 * MICROS_PER_SECOND),
    ("hour", 3_600 * MICROS_PER_SECOND),
    ("hours", 3_600 * MICROS_PER_SECOND),
    ("d", 86_400 * MICROS_PER_SECOND),
    ("day", 86_400 * MICROS_PER_SECOND),
    ("days", 86_400 * MICROS_PER_SECOND),
];

/// Failure to read a time period.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimePeriodError {
    #[error("don't know what '{0}' means as it has no time *unit*! Did you mean '{0}s'?")]
    MissingUnit(String),

    #[error("expected time period with unit, got '{0}'")]
    Malformed(String),

    #[error("unknown time unit '{unit}' in '{value}'")]
    UnknownUnit { value: String, unit: String },

    #[error("time period must not be negative, got '{0}'")]
    Negative(String),

    #[error("maximum precision is {0}")]
    Precision(Precision),

    #[error("time period '{0}' is too large")]
    Overflow(String),
}

/// Smallest unit a field can carry; finer values are rejected rather than rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    Milliseconds,
    Seconds,
}

impl Precision {
    fn micros(self) -> u64 {
        match self {
            Self::Milliseconds => MICROS_PER_MILLI,
            Self::Seconds => MICROS_PER_SECOND,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Milliseconds => f.write_str("milliseconds"),
            Self::Seconds => f.write_str("seconds"),
        }
    }
}

/// A non-negative span of time with microsecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimePeriod {
    micros: u64,
}

impl TimePeriod {
    #[must_use]
    pub const fn from_micros(micros: u64) -> Self {
        Self { micros }
    }

    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self::from_micros(millis * MICROS_PER_MILLI)
    }

    /// # Panics
    ///
    /// Panics in debug builds when `secs` does not fit in microseconds, so it
    /// is meant for constants. Parsed input goes through
    /// [`TimePeriod::checked_from_secs`] instead.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self::from_micros(secs * MICROS_PER_SECOND)
    }

    /// `None` when `secs` does not fit in microseconds.
    #[must_use]
    pub const fn checked_from_secs(secs: u64) -> Option<Self> {
        match secs.checked_mul(MICROS_PER_SECOND) {
            Some(micros) => Some(Self::from_micros(micros)),
            None => None,
        }
    }

    /// Whole milliseconds, truncating any sub-millisecond remainder.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.micros / MICROS_PER_MILLI
    }

    /// Whole seconds, truncating any sub-second remainder.
    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.micros / MICROS_PER_SECOND
    }

    /// Reject values that are not a whole multiple of `precision`.
    ///
    /// # Errors
    ///
    /// Returns [`TimePeriodError::Precision`] when a remainder is left over.
    pub fn check_precision(self, precision: Precision) -> Result<Self, TimePeriodError> {
        if self.micros % precision.micros() == 0 {
            Ok(self)
        } else {
            Err(TimePeriodError::Precision(precision))
        }
    }

    fn parse_clock(value: &str) -> Result<Self, TimePeriodError> {
        let parts: Vec<&str> = value.split(':').collect();
        let malformed = || TimePeriodError::Malformed(value.to_string());
        let numbers = parts
            .iter()
            .map(|part| part.trim().parse::<u64>().map_err(|_| malformed()))
            .collect::<Result<Vec<_>, _>>()?;
        let (hours, minutes, seconds) = match numbers.as_slice() {
            [h, m] => (*h, *m, 0),
            [h, m, s] => (*h, *m, *s),
            _ => return Err(malformed()),
        };
        hours
            .checked_mul(3_600)
            .and_then(|secs| secs.checked_add(minutes.checked_mul(60)?))
            .and_then(|secs| secs.checked_add(seconds))
            .and_then(Self::checked_from_secs)
            .ok_or_else(|| TimePeriodError::Overflow(value.to_string()))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn parse_with_unit(value: &str) -> Result<Self, TimePeriodError> {
        let split = value
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
            .unwrap_or(value.len());
        let (number, unit) = value.split_at(split);
        let unit = unit.trim();

        let amount: f64 = number
            .parse()
            .map_err(|_| TimePeriodError::Malformed(value.to_string()))?;
        if unit.is_empty() {
            return Err(TimePeriodError::MissingUnit(number.to_string()));
        }
        let factor = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, factor)| *factor)
            .ok_or_else(|| TimePeriodError::UnknownUnit {
                value: value.to_string(),
                unit: unit.to_string(),
            })?;
        if amount < 0.0 {
            return Err(TimePeriodError::Negative(value.to_string()));
        }
        if !amount.is_finite() {
            return Err(TimePeriodError::Malformed(value.to_string()));
        }
        let micros = (amount * factor as f64).round();
        if micros >= u64::MAX as f64 {
            return Err(TimePeriodError::Overflow(value.to_string()));
        }
        Ok(Self::from_micros(micros as u64))
    }
}

impl FromStr for TimePeriod {
    type Err = TimePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.contains(':') {
            Self::parse_clock(value)
        } else {
            Self::parse_with_unit(value)
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.micros % MICROS_PER_SECOND == 0 {
            write!(f, "{}s", self.as_secs())
        } else if self.micros % MICROS_PER_MILLI == 0 {
            write!(f, "{}ms", self.as_millis())
        } else {
            write!(f, "{}us", self.micros)
        }
    }
}
