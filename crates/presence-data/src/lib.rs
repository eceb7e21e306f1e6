//! Data layer for the presence aggregator.
//!
//! Responsible for discovering and reading presence CSV files, folding their
//! rows into per-day minute buckets, aggregating those into daily call
//! statistics and writing the resulting JSON summaries.

pub mod aggregator;
pub mod pipeline;
pub mod reader;
pub mod writer;

pub use presence_core as core;
