//! Application state for the web layer.

use std::sync::Arc;

use sqlx::PgPool;

use crate::schedule::ScheduleConfig;
use crate::store::{ConfigStore, StationDirectory};

/// Shared application state.
///
/// Contains the store handles and the immutable schedule configuration
/// needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Station name directory
    pub stations: StationDirectory,

    /// Key/value configuration store
    pub settings: ConfigStore,

    /// Schedule configuration, fixed at startup
    pub schedule: Arc<ScheduleConfig>,

    /// Raw pool, used by the health probe
    pub pool: PgPool,
}

impl AppState {
    /// Create a new app state over one connection pool.
    pub fn new(pool: PgPool, schedule: ScheduleConfig) -> Self {
        Self {
            stations: StationDirectory::new(pool.clone()),
            settings: ConfigStore::new(pool.clone()),
            schedule: Arc::new(schedule),
            pool,
        }
    }
}
