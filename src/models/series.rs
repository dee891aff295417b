//! Daily and hourly forecast series
//!
//! Both series are column-oriented: parallel vectors indexed by the same
//! position. A missing value at an index is `None`, never zero.

use serde::Serialize;

/// Per-day aggregates, all vectors indexed by position in `time`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailySeries {
    /// Calendar days, "YYYY-MM-DD", ascending
    pub time: Vec<String>,
    /// Maximum 2 m temperature in °C
    pub temperature_max: Vec<Option<f64>>,
    /// Minimum 2 m temperature in °C
    pub temperature_min: Vec<Option<f64>>,
    /// Precipitation sum in mm
    pub precipitation_sum: Vec<Option<f64>>,
    /// Snowfall sum in cm
    pub snowfall_sum: Vec<Option<f64>>,
}

impl DailySeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Value at `index`, `None` when the column is short or the slot is empty
    #[must_use]
    pub fn value_at(column: &[Option<f64>], index: usize) -> Option<f64> {
        column.get(index).copied().flatten()
    }
}

/// Hourly snow depth samples
///
/// Either column may be absent when the service omits it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HourlySeries {
    /// Sample timestamps, "YYYY-MM-DDTHH:MM", `None` where unusable
    pub time: Option<Vec<Option<String>>>,
    /// Snow depth in meters
    pub snow_depth: Option<Vec<Option<f64>>>,
}

impl HourlySeries {
    /// Build a series from (timestamp, depth in meters) samples
    #[must_use]
    pub fn from_samples<S: Into<String>>(samples: impl IntoIterator<Item = (S, Option<f64>)>) -> Self {
        let (time, snow_depth): (Vec<Option<String>>, Vec<Option<f64>>) = samples
            .into_iter()
            .map(|(time, depth)| (Some(time.into()), depth))
            .unzip();
        Self {
            time: Some(time),
            snow_depth: Some(snow_depth),
        }
    }
}

/// What the forecast fetcher hands back
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPayload {
    pub daily: DailySeries,
    pub hourly: Option<HourlySeries>,
}
