//! PostgreSQL-backed station directory and key/value configuration.
//!
//! The schedule core never touches this module; handlers use it for
//! station validation, suggestion lists, and per-station last-metro
//! overrides.

mod bootstrap;
mod config;
mod error;
mod stations;

pub use bootstrap::{SEED_STATIONS, connect, init_schema_and_seed, ping, ping_with_retry};
pub use config::{ConfigStore, LineDefaults};
pub use error::StoreError;
pub use stations::StationDirectory;
