//! Per-day forecast row handed to the presentation layer

use serde::Serialize;

/// One projected day of the forecast table
///
/// Every numeric field is `None` when the source had no value for the day,
/// so a recorded zero stays distinguishable from missing data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    /// Calendar day, "YYYY-MM-DD"
    pub date: String,
    /// Maximum temperature in °C
    pub temperature_max: Option<f64>,
    /// Minimum temperature in °C
    pub temperature_min: Option<f64>,
    /// Precipitation sum in mm
    pub precipitation_sum: Option<f64>,
    /// Snowfall sum in cm
    pub snowfall_sum: Option<f64>,
    /// Deepest snow cover observed during the day in cm
    pub snow_depth_max_cm: Option<f64>,
}
