//! Shared types for the presence aggregator.
//!
//! Holds the error type, the output document models, the gap-tolerant
//! call-event detection and the command-line settings.

pub mod error;
pub mod events;
pub mod models;
pub mod settings;
