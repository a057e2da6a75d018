//! Store error types.

/// Errors that can occur when talking to the backing store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Query or connection failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A config row exists but does not have the expected shape
    #[error("malformed config value for key {key}")]
    MalformedConfig { key: &'static str },
}
