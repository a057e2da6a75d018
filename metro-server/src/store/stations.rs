//! Station directory lookups.

use sqlx::PgPool;

use super::error::StoreError;

/// Case-insensitive lookup over the `stations` table.
#[derive(Clone)]
pub struct StationDirectory {
    pool: PgPool,
}

impl StationDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether a station with this name exists, ignoring case.
    ///
    /// Callers are expected to trim surrounding whitespace first.
    pub async fn exists(&self, name: &str) -> Result<bool, StoreError> {
        let row =
            sqlx::query_scalar::<_, i32>("SELECT 1 FROM stations WHERE LOWER(name) = LOWER($1) LIMIT 1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.is_some())
    }

    /// All known station names in lexicographic order.
    pub async fn list_all(&self) -> Result<Vec<String>, StoreError> {
        let names = sqlx::query_scalar::<_, String>("SELECT name FROM stations ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }
}
