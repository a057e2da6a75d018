//! Key/value configuration store.
//!
//! Two keys are consumed: `metro.defaults` holds the line metadata
//! attached to responses, and `metro.last` maps station names to their
//! last-metro "HH:MM" string, looked up case-insensitively.

use serde::Deserialize;
use serde_json::Value;
use sqlx::PgPool;

use super::error::StoreError;

const DEFAULTS_KEY: &str = "metro.defaults";
const LAST_METRO_KEY: &str = "metro.last";

/// Line metadata stored under `metro.defaults`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LineDefaults {
    pub line: String,
    pub tz: String,
}

/// JSONB key/value lookup over the `config` table.
#[derive(Clone)]
pub struct ConfigStore {
    pool: PgPool,
}

impl ConfigStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the raw JSON value stored under `key`, if any.
    pub async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let value = sqlx::query_scalar::<_, Value>("SELECT value FROM config WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    /// The line metadata record, if seeded.
    pub async fn defaults(&self) -> Result<Option<LineDefaults>, StoreError> {
        match self.get(DEFAULTS_KEY).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|_| StoreError::MalformedConfig { key: DEFAULTS_KEY }),
            None => Ok(None),
        }
    }

    /// The last-metro time for a station, matched ignoring case.
    pub async fn last_metro(&self, station: &str) -> Result<Option<String>, StoreError> {
        let Some(value) = self.get(LAST_METRO_KEY).await? else {
            return Ok(None);
        };
        Ok(lookup_case_insensitive(&value, station))
    }
}

/// Find a string entry in a JSON object by case-insensitive key.
fn lookup_case_insensitive(value: &Value, station: &str) -> Option<String> {
    let map = value.as_object()?;
    map.iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(station))
        .and_then(|(_, entry)| entry.as_str().map(str::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_matches_exact_key() {
        let map = json!({ "Chatelet": "01:15", "Nation": "01:10" });
        assert_eq!(
            lookup_case_insensitive(&map, "Chatelet"),
            Some("01:15".to_string())
        );
    }

    #[test]
    fn lookup_ignores_case() {
        let map = json!({ "Chatelet": "01:15" });
        assert_eq!(
            lookup_case_insensitive(&map, "chatelet"),
            Some("01:15".to_string())
        );
        assert_eq!(
            lookup_case_insensitive(&map, "CHATELET"),
            Some("01:15".to_string())
        );
    }

    #[test]
    fn lookup_misses_unknown_station() {
        let map = json!({ "Chatelet": "01:15" });
        assert_eq!(lookup_case_insensitive(&map, "Bastille"), None);
    }

    #[test]
    fn lookup_skips_non_string_entries() {
        let map = json!({ "Chatelet": 115 });
        assert_eq!(lookup_case_insensitive(&map, "Chatelet"), None);
    }

    #[test]
    fn lookup_rejects_non_object_values() {
        assert_eq!(lookup_case_insensitive(&json!(["01:15"]), "Chatelet"), None);
        assert_eq!(lookup_case_insensitive(&json!("01:15"), "Chatelet"), None);
    }

    #[test]
    fn defaults_record_deserializes() {
        let value = json!({ "line": "M1", "tz": "Europe/Paris" });
        let defaults: LineDefaults = serde_json::from_value(value).unwrap();
        assert_eq!(defaults.line, "M1");
        assert_eq!(defaults.tz, "Europe/Paris");
    }
}
