//! # Tri Compare
//!
//! Triathlon results comparison: rank two athletes' race times against
//! their fields and against each other.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (result rows, segments, selections)
//! - **table**: In-memory result table for one race-year
//! - **catalog**: Every loaded table keyed by race and year
//! - **resolve**: Selection resolution and dropdown choices
//! - **calculate**: Rank, percentile and head-to-head comparison
//! - **present**: Chart-ready views and display strings
//! - **format**: Race time and ordinal formatting
//! - **storage**: CSV loading at startup
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod present;
pub mod resolve;
pub mod storage;
pub mod table;

#[cfg(test)]
mod test_support;

pub use calculate::compare;
pub use catalog::RaceCatalog;
pub use error::AnalyticsError;
pub use format::{format_duration, format_ordinal};
pub use models::*;
pub use resolve::resolve;
pub use table::ResultTable;
