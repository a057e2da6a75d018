//! Store bootstrap: connection, readiness probing, schema and seed data.
//!
//! The binary runs [`ping_with_retry`] and [`init_schema_and_seed`] to
//! completion before binding the listener, so no request is served while
//! the store check is still in flight.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use super::error::StoreError;

/// Stations seeded into an empty directory.
pub const SEED_STATIONS: [&str; 5] = [
    "Chatelet",
    "La Defense",
    "Bastille",
    "Gare de Lyon",
    "Nation",
];

/// Last-metro time seeded for every known station.
const SEED_LAST_METRO: &str = "01:15";

const DEFAULTS_KEY: &str = "metro.defaults";
const LAST_METRO_KEY: &str = "metro.last";

/// Create a lazily-connecting pool for the given connection string.
///
/// No connection is attempted here; [`ping_with_retry`] establishes the
/// first one.
pub fn connect(url: &str) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new().max_connections(5).connect_lazy(url)?;
    Ok(pool)
}

/// One-shot connectivity check.
pub async fn ping(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Probe the store until it answers, with bounded attempts and a fixed
/// backoff between them. Returns the last error once the attempts are
/// exhausted.
pub async fn ping_with_retry(
    pool: &PgPool,
    max_attempts: u32,
    backoff: Duration,
) -> Result<(), StoreError> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match ping(pool).await {
            Ok(()) => {
                info!("database connected");
                return Ok(());
            }
            Err(err) => {
                warn!(attempt, max_attempts, error = %err, "database connection failed");
                if attempt >= max_attempts {
                    return Err(err);
                }
                tokio::time::sleep(backoff).await;
            }
        }
    }
}

/// Create the `stations` and `config` tables if needed and seed them.
///
/// Seeding is idempotent: stations are only inserted into an empty
/// directory, and each config row only when its key is absent.
pub async fn init_schema_and_seed(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS stations (
            id SERIAL PRIMARY KEY,
            name TEXT UNIQUE NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stations")
        .fetch_one(pool)
        .await?;
    if count == 0 {
        for name in SEED_STATIONS {
            sqlx::query("INSERT INTO stations(name) VALUES($1) ON CONFLICT(name) DO NOTHING")
                .bind(name)
                .execute(pool)
                .await?;
        }
        info!("seeded stations table");
    }

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS config (
            key TEXT PRIMARY KEY,
            value JSONB NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    seed_config_row(
        pool,
        DEFAULTS_KEY,
        serde_json::json!({ "line": "M1", "tz": "Europe/Paris" }),
    )
    .await?;

    let last_metro: serde_json::Map<String, serde_json::Value> = SEED_STATIONS
        .iter()
        .map(|name| ((*name).to_string(), serde_json::json!(SEED_LAST_METRO)))
        .collect();
    seed_config_row(pool, LAST_METRO_KEY, serde_json::Value::Object(last_metro)).await?;

    Ok(())
}

/// Insert a config row unless the key already exists.
async fn seed_config_row(
    pool: &PgPool,
    key: &str,
    value: serde_json::Value,
) -> Result<(), StoreError> {
    let exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM config WHERE key = $1")
        .bind(key)
        .fetch_optional(pool)
        .await?
        .is_some();

    if !exists {
        sqlx::query("INSERT INTO config(key, value) VALUES($1, $2)")
            .bind(key)
            .bind(value)
            .execute(pool)
            .await?;
        info!(key, "seeded config row");
    }

    Ok(())
}
