//! `snowcast` - Daily weather and snow depth forecasts for a city
//!
//! Resolves a city name to coordinates, fetches the daily forecast and
//! hourly snow depth for a date range and reduces them to one row per day.

pub mod aggregator;
pub mod api;
pub mod config;
pub mod error;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod snow_depth;
pub mod table;
pub mod weather;

// Re-export core types for public API
pub use aggregator::{AggregationStage, ForecastAggregator};
pub use config::SnowcastConfig;
pub use error::SnowcastError;
pub use location_resolver::{GeocodeResolver, OpenMeteoGeocoder};
pub use models::{DailySeries, DateRange, ForecastPayload, ForecastRow, HourlySeries, Location};
pub use snow_depth::{DailySnowDepthMax, SnowDepthReducer};
pub use weather::{ForecastFetcher, OpenMeteoForecastClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SnowcastError>;
