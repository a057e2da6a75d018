//! Schedule configuration.
//!
//! All schedule parameters live in one immutable struct, constructed once
//! at startup and passed by reference into the window calculator and the
//! predictor. Malformed values abort startup; they are never patched up
//! per call.

use crate::domain::{ParseWallClockError, WallClock};

/// Error returned when the environment holds an unusable schedule value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A wall-clock variable is present but does not parse as "HH:MM"
    #[error("invalid {var}: {source}")]
    InvalidTime {
        var: &'static str,
        #[source]
        source: ParseWallClockError,
    },

    /// The headway variable is present but not a positive integer
    #[error("invalid {var}: must be a positive integer number of minutes")]
    InvalidHeadway { var: &'static str },
}

/// Configuration parameters for the service schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Wall-clock time the service day begins.
    pub service_start: WallClock,

    /// Wall-clock time the last-call window begins (past midnight,
    /// belonging to the service day that started the previous afternoon).
    pub last_window_start: WallClock,

    /// Wall-clock time the service day ends (also past midnight).
    pub service_end: WallClock,

    /// Minutes between departures.
    pub headway_min: i64,

    /// Line identifier attached to responses.
    pub line: String,

    /// Timezone label attached to responses. Display only; all
    /// computation uses naive local wall-clock values.
    pub tz: String,
}

impl ScheduleConfig {
    /// Read the configuration from process environment variables.
    ///
    /// Absent variables take the documented defaults; present-but-invalid
    /// values are errors so that a misconfigured deployment fails at
    /// startup rather than serving wrong predictions.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let service_start = parse_time_var(&get, "SERVICE_START", defaults.service_start)?;
        let last_window_start =
            parse_time_var(&get, "LAST_WINDOW_START", defaults.last_window_start)?;
        let service_end = parse_time_var(&get, "SERVICE_END", defaults.service_end)?;

        let headway_min = match get("HEADWAY_MIN") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|h| *h > 0)
                .ok_or(ConfigError::InvalidHeadway { var: "HEADWAY_MIN" })?,
            None => defaults.headway_min,
        };

        Ok(Self {
            service_start,
            last_window_start,
            service_end,
            headway_min,
            ..defaults
        })
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            service_start: WallClock::new(5, 30).expect("in range"),
            last_window_start: WallClock::new(0, 45).expect("in range"),
            service_end: WallClock::new(1, 15).expect("in range"),
            headway_min: 3,
            line: "M1".to_string(),
            tz: "Europe/Paris".to_string(),
        }
    }
}

fn parse_time_var<F>(get: &F, var: &'static str, default: WallClock) -> Result<WallClock, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match get(var) {
        Some(raw) => WallClock::parse(raw.trim())
            .map_err(|source| ConfigError::InvalidTime { var, source }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |var| map.get(var).map(|v| (*v).to_string())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = ScheduleConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ScheduleConfig::default());
        assert_eq!(config.service_start.to_string(), "05:30");
        assert_eq!(config.last_window_start.to_string(), "00:45");
        assert_eq!(config.service_end.to_string(), "01:15");
        assert_eq!(config.headway_min, 3);
        assert_eq!(config.line, "M1");
        assert_eq!(config.tz, "Europe/Paris");
    }

    #[test]
    fn overrides_are_applied() {
        let vars = [
            ("HEADWAY_MIN", "7"),
            ("LAST_WINDOW_START", "23:50"),
            ("SERVICE_END", "00:30"),
            ("SERVICE_START", "06:00"),
        ];
        let config = ScheduleConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.headway_min, 7);
        assert_eq!(config.last_window_start.to_string(), "23:50");
        assert_eq!(config.service_end.to_string(), "00:30");
        assert_eq!(config.service_start.to_string(), "06:00");
    }

    #[test]
    fn malformed_time_is_a_startup_error() {
        let vars = [("SERVICE_END", "25:99")];
        let err = ScheduleConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTime { var: "SERVICE_END", .. }));
    }

    #[test]
    fn non_numeric_time_is_a_startup_error() {
        let vars = [("LAST_WINDOW_START", "tonight")];
        assert!(ScheduleConfig::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn zero_or_negative_headway_rejected() {
        for bad in ["0", "-2"] {
            let vars = [("HEADWAY_MIN", bad)];
            let err = ScheduleConfig::from_lookup(lookup(&vars)).unwrap_err();
            assert_eq!(err, ConfigError::InvalidHeadway { var: "HEADWAY_MIN" });
        }
    }

    #[test]
    fn non_numeric_headway_rejected() {
        let vars = [("HEADWAY_MIN", "fast")];
        assert!(ScheduleConfig::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let vars = [("HEADWAY_MIN", " 5 "), ("SERVICE_END", " 01:30 ")];
        let config = ScheduleConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.headway_min, 5);
        assert_eq!(config.service_end.to_string(), "01:30");
    }
}
