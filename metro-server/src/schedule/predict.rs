//! Next-arrival prediction.

use chrono::{Duration, NaiveDateTime};

use crate::domain::WallClock;

use super::config::ScheduleConfig;
use super::window::resolve_service_window;

/// Upper bound on the number of arrivals a sequence request may expand to.
pub const MAX_ARRIVALS: usize = 5;

/// The next predicted departure within an open service window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextArrival {
    /// Departure time, reduced to hour and minute.
    pub time: WallClock,

    /// Whether the reference instant falls inside the last-call window.
    pub is_last: bool,

    /// The headway the prediction was computed with.
    pub headway_min: i64,
}

/// Outcome of a prediction request.
///
/// `InvalidHeadway` is deliberately distinct from `Closed`: a
/// non-positive headway is a caller error, not a statement about the
/// service window, and it never falls back to the configured default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    /// The service is not running at the reference instant.
    Closed,

    /// The requested headway was not a positive number of minutes.
    InvalidHeadway,

    /// The service is open and a departure is expected.
    Open(NextArrival),
}

/// An entry in a multi-arrival expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingArrival {
    pub time: WallClock,
    pub is_last: bool,
}

/// Predict the next departure after `now`.
///
/// The closed check runs first: outside the service window the headway is
/// irrelevant and the result is `Closed` even for a non-positive headway.
/// The last-call flag is evaluated against `now`, not against the shifted
/// arrival instant.
pub fn predict(now: NaiveDateTime, headway_min: i64, config: &ScheduleConfig) -> Prediction {
    let Some(window) = resolve_service_window(now, config) else {
        return Prediction::Closed;
    };

    if headway_min <= 0 {
        return Prediction::InvalidHeadway;
    }

    let arrival = now + Duration::minutes(headway_min);
    Prediction::Open(NextArrival {
        time: WallClock::from(arrival),
        is_last: window.in_last_call(now),
        headway_min,
    })
}

/// Expand the prediction into up to `count` upcoming departures.
///
/// `count` is clamped to `[1, MAX_ARRIVALS]` regardless of the requested
/// value. Steps the reference instant forward by one headway per entry
/// and stops, without padding, at the first step where the service is no
/// longer open.
pub fn predict_sequence(
    now: NaiveDateTime,
    headway_min: i64,
    count: usize,
    config: &ScheduleConfig,
) -> Vec<UpcomingArrival> {
    let count = count.clamp(1, MAX_ARRIVALS);
    let mut arrivals = Vec::with_capacity(count);

    let mut t = now;
    for _ in 0..count {
        match predict(t, headway_min, config) {
            Prediction::Open(next) => {
                arrivals.push(UpcomingArrival {
                    time: next.time,
                    is_last: next.is_last,
                });
                t = t + Duration::minutes(headway_min);
            }
            Prediction::Closed | Prediction::InvalidHeadway => break,
        }
    }

    arrivals
}
