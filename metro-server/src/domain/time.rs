//! Wall-clock time handling.
//!
//! Schedule configuration and responses use "HH:MM" strings. This module
//! provides a date-less time-of-day type for them; anchoring a `WallClock`
//! onto a calendar day is the schedule layer's job.

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime, Timelike};

/// Error returned when parsing an invalid wall-clock string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid wall-clock time: {reason}")]
pub struct ParseWallClockError {
    reason: &'static str,
}

impl ParseWallClockError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A naive time of day with no date or zone attached.
///
/// Parsing is strict: exactly `"HH:MM"`, zero-padded, 24-hour. Out-of-range
/// or non-numeric input is a parse error, never silently clamped.
///
/// # Examples
///
/// ```
/// use metro_server::domain::WallClock;
///
/// let t = WallClock::parse("05:30").unwrap();
/// assert_eq!(t.hour(), 5);
/// assert_eq!(t.minute(), 30);
/// assert_eq!(t.to_string(), "05:30");
///
/// // Unpadded and out-of-range inputs are rejected
/// assert!(WallClock::parse("5:30").is_err());
/// assert!(WallClock::parse("24:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WallClock {
    hour: u32,
    minute: u32,
}

impl WallClock {
    /// Create a wall-clock time from hour and minute components.
    ///
    /// Returns `None` if either component is out of range.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    /// Parse a strict zero-padded `"HH:MM"` string.
    pub fn parse(s: &str) -> Result<Self, ParseWallClockError> {
        let (hh, mm) = s
            .split_once(':')
            .ok_or_else(|| ParseWallClockError::new("expected HH:MM format"))?;

        if hh.len() != 2 || mm.len() != 2 {
            return Err(ParseWallClockError::new("hour and minute must be two digits"));
        }
        if !hh.bytes().all(|b| b.is_ascii_digit()) || !mm.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseWallClockError::new("hour and minute must be numeric"));
        }

        // Two ascii digits always parse; range is the only remaining check.
        let hour: u32 = hh.parse().expect("two digits");
        let minute: u32 = mm.parse().expect("two digits");

        if hour > 23 {
            return Err(ParseWallClockError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(ParseWallClockError::new("minute must be 0-59"));
        }

        Ok(Self { hour, minute })
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Converts to a `chrono::NaiveTime` at second zero.
    pub fn to_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).expect("validated at construction")
    }
}

/// Reduce an instant to its wall-clock reading, discarding the calendar
/// date and seconds.
impl From<NaiveDateTime> for WallClock {
    fn from(dt: NaiveDateTime) -> Self {
        Self {
            hour: dt.hour(),
            minute: dt.minute(),
        }
    }
}

impl fmt::Debug for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WallClock({:02}:{:02})", self.hour, self.minute)
    }
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
