//! Calendar and clock value types shared by availability and sessions.
//!
//! The backend exchanges dates as `YYYY-MM-DD`, clock times as `HH:MM`, a
//! scheduled window as `HH:MM-HH:MM`, and creation stamps as ISO-8601 with
//! or without an offset.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validation errors for clock values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeValidationError {
    /// Clock time was not `HH:MM` within a day.
    #[error("time must be HH:MM between 00:00 and 23:59, got {raw:?}")]
    InvalidClockTime {
        /// Input as received.
        raw: String,
    },
    /// Time range was not `HH:MM-HH:MM`.
    #[error("time range must look like HH:MM-HH:MM, got {raw:?}")]
    InvalidTimeRange {
        /// Input as received.
        raw: String,
    },
    /// Timestamp could not be read as ISO-8601.
    #[error("timestamp must be ISO-8601, got {raw:?}")]
    InvalidTimestamp {
        /// Input as received.
        raw: String,
    },
}

/// Wall-clock time with minute precision.
///
/// # Examples
/// ```
/// use studierbridge_client::domain::ClockTime;
///
/// let time: ClockTime = "9:05".parse().unwrap();
/// assert_eq!(time.to_string(), "09:05");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Construct from components, rejecting out-of-day values.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Hour of day.
    pub fn hour(self) -> u8 {
        self.hour
    }

    /// Minute of hour.
    pub fn minute(self) -> u8 {
        self.minute
    }
}

impl FromStr for ClockTime {
    type Err = TimeValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimeValidationError::InvalidClockTime { raw: s.to_owned() };
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        if minute.len() != 2 {
            return Err(invalid());
        }
        let hour = hour.parse::<u8>().map_err(|_| invalid())?;
        let minute = minute.parse::<u8>().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A start–end window within one day, rendered `HH:MM-HH:MM`.
///
/// No ordering between `start` and `end` is enforced; mentors may enter
/// whatever the editor allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeRange {
    /// Window start.
    pub start: ClockTime,
    /// Window end.
    pub end: ClockTime,
}

impl TimeRange {
    /// Pair two clock times.
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }
}

impl FromStr for TimeRange {
    type Err = TimeValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimeValidationError::InvalidTimeRange { raw: s.to_owned() };
        let (start, end) = s.trim().split_once('-').ok_or_else(invalid)?;
        let start = start.trim().parse().map_err(|_| invalid())?;
        let end = end.trim().parse().map_err(|_| invalid())?;
        Ok(Self { start, end })
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl From<TimeRange> for String {
    fn from(value: TimeRange) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for TimeRange {
    type Error = TimeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Server-assigned creation instant.
///
/// Accepts RFC 3339 strings and offset-less ISO-8601 strings; the latter are
/// read as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Wrap a UTC instant.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Underlying UTC instant.
    pub fn instant(self) -> DateTime<Utc> {
        self.0
    }

    /// Short calendar date, e.g. `6/1/2025`.
    pub fn short_date(self) -> String {
        self.0.format("%-m/%-d/%Y").to_string()
    }
}

impl FromStr for Timestamp {
    type Err = TimeValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self(parsed.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Self(naive.and_utc()))
            .map_err(|_| TimeValidationError::InvalidTimestamp { raw: s.to_owned() })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TimeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Compact date label used in date pickers, e.g. `Sun, Jun 1, 2025`.
pub fn short_date_label(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// Long date label used in session cards, e.g. `Sunday, June 1, 2025`.
pub fn long_date_label(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
