//! Web layer for the metro arrival service.
//!
//! Translates HTTP query parameters into schedule and store calls and
//! serializes the results to JSON. All business logic lives in
//! [`crate::schedule`]; handlers only validate input and shape output.

mod cors;
mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
