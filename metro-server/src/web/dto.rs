//! Data transfer objects for web requests and responses.
//!
//! Field names are part of the wire contract and are kept exactly as the
//! clients expect them (`nextArrival`, `isLast`, `headwayMin`, …).

use serde::{Deserialize, Serialize};

use crate::schedule::UpcomingArrival;

/// Query parameters for `/next-metro`.
///
/// `n` is carried as a raw string: a non-numeric value falls back to a
/// single arrival instead of failing extraction.
#[derive(Debug, Deserialize)]
pub struct NextMetroQuery {
    /// Station name to predict for
    pub station: Option<String>,

    /// Requested number of upcoming arrivals
    pub n: Option<String>,
}

/// Query parameters for `/last-metro`.
#[derive(Debug, Deserialize)]
pub struct LastMetroQuery {
    /// Station name to look up
    pub station: Option<String>,
}

/// Successful health probe.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health probe with an unreachable store.
#[derive(Debug, Serialize)]
pub struct DegradedResponse {
    pub status: &'static str,
    pub error: &'static str,
}

/// Service closed; no arrival fields apply.
#[derive(Debug, Serialize)]
pub struct ClosedResponse {
    pub service: &'static str,
    pub tz: String,
}

/// Single next-arrival prediction.
///
/// `nextArrival` is `null` when the configured headway was invalid; the
/// `isLast` flag is omitted in that case because there is no arrival to
/// qualify.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextMetroResponse {
    pub station: String,
    pub line: String,
    pub headway_min: i64,
    pub tz: String,
    pub next_arrival: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_last: Option<bool>,
}

/// Multi-arrival prediction (`n` in 2..5).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalsResponse {
    pub station: String,
    pub line: String,
    pub headway_min: i64,
    pub tz: String,
    pub arrivals: Vec<ArrivalDto>,
}

/// One entry of a multi-arrival response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalDto {
    pub time: String,
    pub is_last: bool,
}

impl From<UpcomingArrival> for ArrivalDto {
    fn from(arrival: UpcomingArrival) -> Self {
        Self {
            time: arrival.time.to_string(),
            is_last: arrival.is_last,
        }
    }
}

/// Last-metro lookup result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastMetroResponse {
    pub station: String,
    pub last_metro: String,
    pub line: String,
    pub tz: String,
}

/// Generic error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

/// Unknown station, with the full directory as suggestions.
#[derive(Debug, Serialize)]
pub struct UnknownStationResponse {
    pub error: &'static str,
    pub station: String,
    pub suggestions: Vec<String>,
}

/// Station-specific error body (e.g. no last-metro entry).
#[derive(Debug, Serialize)]
pub struct StationErrorResponse {
    pub error: &'static str,
    pub station: String,
}
