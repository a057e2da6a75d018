//! Service schedule core.
//!
//! Pure, I/O-free logic answering "is the metro running right now, and
//! when is the next one?". The service day starts at a fixed wall-clock
//! time and ends after midnight on the following calendar day, so every
//! computation goes through [`resolve_service_window`] to get a
//! self-consistent window regardless of which side of midnight the
//! reference instant falls on.

mod config;
mod predict;
mod window;

pub use config::{ConfigError, ScheduleConfig};
pub use predict::{MAX_ARRIVALS, NextArrival, Prediction, UpcomingArrival, predict, predict_sequence};
pub use window::{ServiceWindow, resolve_service_window};
