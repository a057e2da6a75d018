//! Metro arrival prediction server.
//!
//! A small web service that answers: "when does the next metro leave
//! this station, and is it the last one tonight?"

pub mod domain;
pub mod schedule;
pub mod store;
pub mod web;
