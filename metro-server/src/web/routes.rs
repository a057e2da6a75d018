//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Local;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, error, warn};

use crate::schedule::{MAX_ARRIVALS, Prediction, predict, predict_sequence};
use crate::store::{StoreError, ping};

use super::cors::cors;
use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations))
        .route("/next-metro", get(next_metro))
        .route("/last-metro", get(last_metro))
        .fallback(route_not_found)
        .layer(middleware::from_fn(cors))
        .layer(TraceLayer::new_for_http().on_response(DefaultOnResponse::new().level(Level::INFO)))
        .with_state(state)
}

/// Health check endpoint. Reports degraded when the store is unreachable.
async fn health(State(state): State<AppState>) -> Response {
    match ping(&state.pool).await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response(),
        Err(err) => {
            error!(error = %err, "health probe failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DegradedResponse {
                    status: "degraded",
                    error: "db_unreachable",
                }),
            )
                .into_response()
        }
    }
}

/// All known station names, sorted.
async fn list_stations(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let names = state.stations.list_all().await?;
    Ok(Json(names))
}

/// Next-arrival prediction for one station.
async fn next_metro(
    State(state): State<AppState>,
    Query(query): Query<NextMetroQuery>,
) -> Result<Response, ApiError> {
    let raw = query.station.ok_or(ApiError::MissingStation)?;
    let station = raw.trim().to_string();
    if station.is_empty() {
        return Err(ApiError::MissingStation);
    }

    if !state.stations.exists(&station).await? {
        let suggestions = state.stations.list_all().await?;
        return Err(ApiError::UnknownStation {
            station,
            suggestions,
        });
    }

    let (line, tz) = line_defaults(&state).await;
    let now = Local::now().naive_local();
    let headway = state.schedule.headway_min;

    match predict(now, headway, &state.schedule) {
        Prediction::Closed => Ok(Json(ClosedResponse {
            service: "closed",
            tz,
        })
        .into_response()),
        Prediction::InvalidHeadway => Ok(Json(NextMetroResponse {
            station: raw,
            line,
            headway_min: headway,
            tz,
            next_arrival: None,
            is_last: None,
        })
        .into_response()),
        Prediction::Open(next) => {
            let n = parse_count(query.n.as_deref());
            if n > 1 {
                let arrivals = predict_sequence(now, headway, n, &state.schedule)
                    .into_iter()
                    .map(ArrivalDto::from)
                    .collect();
                Ok(Json(ArrivalsResponse {
                    station: raw,
                    line,
                    headway_min: headway,
                    tz,
                    arrivals,
                })
                .into_response())
            } else {
                Ok(Json(NextMetroResponse {
                    station: raw,
                    line,
                    headway_min: next.headway_min,
                    tz,
                    next_arrival: Some(next.time.to_string()),
                    is_last: Some(next.is_last),
                })
                .into_response())
            }
        }
    }
}

/// Last-metro time for one station, from the config store.
async fn last_metro(
    State(state): State<AppState>,
    Query(query): Query<LastMetroQuery>,
) -> Result<Response, ApiError> {
    let raw = query.station.ok_or(ApiError::MissingStation)?;
    let station = raw.trim().to_string();
    if station.is_empty() {
        return Err(ApiError::MissingStation);
    }

    if !state.stations.exists(&station).await? {
        let suggestions = state.stations.list_all().await?;
        return Err(ApiError::UnknownStation {
            station,
            suggestions,
        });
    }

    let last_metro = state
        .settings
        .last_metro(&station)
        .await?
        .ok_or_else(|| ApiError::NoLastMetro {
            station: station.clone(),
        })?;

    let (line, tz) = line_defaults(&state).await;
    Ok(Json(LastMetroResponse {
        station,
        last_metro,
        line,
        tz,
    })
    .into_response())
}

/// Fallback for unmatched routes.
async fn route_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Route not found",
        }),
    )
        .into_response()
}

/// Line metadata for responses, from the config store when seeded.
///
/// Prediction does not need the store, so a failed lookup degrades to the
/// built-in defaults instead of failing the request.
async fn line_defaults(state: &AppState) -> (String, String) {
    match state.settings.defaults().await {
        Ok(Some(defaults)) => (defaults.line, defaults.tz),
        Ok(None) => (state.schedule.line.clone(), state.schedule.tz.clone()),
        Err(err) => {
            warn!(error = %err, "config defaults unavailable, using built-ins");
            (state.schedule.line.clone(), state.schedule.tz.clone())
        }
    }
}

/// Parse the requested arrival count.
///
/// Missing or non-numeric values fall back to a single arrival; numeric
/// values are clamped to `[1, MAX_ARRIVALS]`.
fn parse_count(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map(|n| n.clamp(1, MAX_ARRIVALS as i64) as usize)
        .unwrap_or(1)
}

/// Application error type.
#[derive(Debug)]
pub enum ApiError {
    MissingStation,
    UnknownStation {
        station: String,
        suggestions: Vec<String>,
    },
    NoLastMetro {
        station: String,
    },
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingStation => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "missing station",
                }),
            )
                .into_response(),
            ApiError::UnknownStation {
                station,
                suggestions,
            } => (
                StatusCode::NOT_FOUND,
                Json(UnknownStationResponse {
                    error: "unknown station",
                    station,
                    suggestions,
                }),
            )
                .into_response(),
            ApiError::NoLastMetro { station } => (
                StatusCode::NOT_FOUND,
                Json(StationErrorResponse {
                    error: "no last metro data",
                    station,
                }),
            )
                .into_response(),
            ApiError::Store(err) => {
                // Detail stays in the server log; the client gets a
                // generic code.
                error!(error = %err, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { error: "db_error" }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_count_defaults_to_one() {
        assert_eq!(parse_count(None), 1);
        assert_eq!(parse_count(Some("abc")), 1);
        assert_eq!(parse_count(Some("")), 1);
        assert_eq!(parse_count(Some("2.5")), 1);
    }

    #[test]
    fn parse_count_clamps_to_bounds() {
        assert_eq!(parse_count(Some("0")), 1);
        assert_eq!(parse_count(Some("-4")), 1);
        assert_eq!(parse_count(Some("5")), 5);
        assert_eq!(parse_count(Some("99")), 5);
    }

    #[test]
    fn parse_count_accepts_plain_integers() {
        assert_eq!(parse_count(Some("1")), 1);
        assert_eq!(parse_count(Some("3")), 3);
        assert_eq!(parse_count(Some(" 4 ")), 4);
    }
}
