//! `OpenMeteo` API response structures and conversion utilities
//!
//! Numeric columns and timestamps are read as raw JSON values and narrowed
//! here, so `null`, strings and other junk never reach the pipeline as numbers
//! and a bad hourly entry only drops that one sample.

use crate::models::{DailySeries, HourlySeries, Location};
use crate::{Result, SnowcastError};
use serde::Deserialize;
use serde_json::Value;

/// Geocoding response from `OpenMeteo`
#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingResult {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country: Option<String>,
    pub admin1: Option<String>,
}

impl GeocodingResult {
    /// Convert to a [`Location`], falling back to the queried name
    ///
    /// A candidate without both coordinates is incomplete.
    pub fn into_location(self, query: &str) -> Result<Location> {
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err(SnowcastError::incomplete_data(format!(
                "geocoding result for '{query}' has no coordinates"
            )));
        };

        Ok(Location {
            name: self.name.unwrap_or_else(|| query.to_string()),
            latitude,
            longitude,
            country: self.country,
            admin1: self.admin1,
        })
    }
}

/// Forecast response from `OpenMeteo`
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    pub daily: Option<DailyData>,
    pub hourly: Option<HourlyData>,
}

/// Daily aggregates from `OpenMeteo`
#[derive(Debug, Deserialize)]
pub struct DailyData {
    pub time: Option<Vec<Value>>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Option<Vec<Value>>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Option<Vec<Value>>,
    pub precipitation_sum: Option<Vec<Value>>,
    pub snowfall_sum: Option<Vec<Value>>,
}

/// Hourly samples from `OpenMeteo`
#[derive(Debug, Deserialize)]
pub struct HourlyData {
    pub time: Option<Vec<Value>>,
    pub snow_depth: Option<Vec<Value>>,
}

/// Narrow a raw JSON value to a finite number
///
/// Numbers pass through, numeric strings are parsed, anything else is `None`.
#[must_use]
pub fn numeric_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Narrow a raw JSON value to a non-empty timestamp string
#[must_use]
pub fn timestamp_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn numeric_column(column: Option<Vec<Value>>) -> Vec<Option<f64>> {
    column
        .unwrap_or_default()
        .iter()
        .map(numeric_value)
        .collect()
}

impl TryFrom<DailyData> for DailySeries {
    type Error = SnowcastError;

    fn try_from(daily: DailyData) -> Result<Self> {
        let time = daily
            .time
            .ok_or_else(|| SnowcastError::incomplete_data("daily series has no time axis"))?
            .iter()
            .enumerate()
            .map(|(i, day)| {
                timestamp_value(day).ok_or_else(|| {
                    SnowcastError::incomplete_data(format!("daily time entry {i} is not a date"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            time,
            temperature_max: numeric_column(daily.temperature_max),
            temperature_min: numeric_column(daily.temperature_min),
            precipitation_sum: numeric_column(daily.precipitation_sum),
            snowfall_sum: numeric_column(daily.snowfall_sum),
        })
    }
}

impl From<HourlyData> for HourlySeries {
    fn from(hourly: HourlyData) -> Self {
        Self {
            time: hourly
                .time
                .map(|times| times.iter().map(timestamp_value).collect()),
            snow_depth: hourly
                .snow_depth
                .map(|depths| depths.iter().map(numeric_value).collect()),
        }
    }
}
