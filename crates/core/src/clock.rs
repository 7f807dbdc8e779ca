//! Clock and local-timezone capabilities.
//!
//! Nothing in this crate reads the wall clock or the process timezone
//! directly; both are handed in so checks are deterministic under test.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::ValidatorError;
use crate::types::Timestamp;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Reads `Utc::now()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// The application's local timezone.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LocalZone {
    #[default]
    Utc,
    Fixed(FixedOffset),
    /// Whatever the host process is configured with.
    System,
}

impl LocalZone {
    /// Parse `UTC`, `local`, or an offset of the form `+HH:MM` / `-HH:MM`.
    pub fn parse(s: &str) -> Result<Self, ValidatorError> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("utc") || s == "Z" {
            return Ok(Self::Utc);
        }
        if s.eq_ignore_ascii_case("local") {
            return Ok(Self::System);
        }
        parse_offset(s)
            .map(Self::Fixed)
            .ok_or_else(|| ValidatorError::Config(format!("unrecognised time zone {s:?}")))
    }

    /// Wall-clock time of `at` in this zone.
    pub fn to_local<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> NaiveDateTime {
        match self {
            Self::Utc => at.naive_utc(),
            Self::Fixed(offset) => at.with_timezone(offset).naive_local(),
            Self::System => at.with_timezone(&chrono::Local).naive_local(),
        }
    }

    /// Calendar date of the clock's current instant in this zone.
    pub fn today(&self, clock: &dyn Clock) -> NaiveDate {
        self.to_local(&clock.now()).date()
    }
}

impl std::fmt::Display for LocalZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utc => f.write_str("UTC"),
            Self::Fixed(offset) => write!(f, "{offset}"),
            Self::System => f.write_str("local"),
        }
    }
}

fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 && rest.is_ascii() => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
