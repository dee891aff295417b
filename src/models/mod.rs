//! Data models for the snowcast pipeline
//!
//! This module contains the value objects passed between pipeline stages:
//! - Location: Geographic coordinates and metadata from geocoding
//! - DateRange: Validated inclusive calendar date range
//! - Series: Daily and hourly forecast series as returned by the service
//! - Row: Per-day projection handed to the presentation layer

pub mod date_range;
pub mod location;
pub mod row;
pub mod series;

// Re-export all public types for convenient access
pub use date_range::DateRange;
pub use location::Location;
pub use row::ForecastRow;
pub use series::{DailySeries, ForecastPayload, HourlySeries};
