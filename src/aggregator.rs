//! Forecast aggregation pipeline
//!
//! Resolves a city, fetches its forecast for a date range, reduces the hourly
//! snow depth to daily maxima and projects everything into [`ForecastRow`]s.
//! Stages run strictly in sequence and any failure ends the call without
//! partial rows.

use crate::api::ApiClient;
use crate::config::ApiConfig;
use crate::location_resolver::{GeocodeResolver, OpenMeteoGeocoder};
use crate::models::{DailySeries, DateRange, ForecastRow};
use crate::snow_depth::{DailySnowDepthMax, SnowDepthReducer};
use crate::weather::{ForecastFetcher, OpenMeteoForecastClient};
use crate::{Result, SnowcastError};
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// Pipeline stage, carried in logs so a failure names where it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationStage {
    Resolving,
    Fetching,
    Reducing,
    Projecting,
    Done,
}

impl fmt::Display for AggregationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AggregationStage::Resolving => "resolving",
            AggregationStage::Fetching => "fetching",
            AggregationStage::Reducing => "reducing",
            AggregationStage::Projecting => "projecting",
            AggregationStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Orchestrates geocoding, forecast retrieval and snow depth reduction
#[derive(Debug, Clone)]
pub struct ForecastAggregator<G, F> {
    resolver: G,
    fetcher: F,
}

impl ForecastAggregator<OpenMeteoGeocoder, OpenMeteoForecastClient> {
    /// Aggregator backed by the Open-Meteo geocoding and forecast APIs
    pub fn open_meteo(config: &ApiConfig) -> Result<Self> {
        let api = ApiClient::new(config)?;
        Ok(Self::new(
            OpenMeteoGeocoder::new(api.clone(), config),
            OpenMeteoForecastClient::new(api, config),
        ))
    }
}

impl<G: GeocodeResolver, F: ForecastFetcher> ForecastAggregator<G, F> {
    pub fn new(resolver: G, fetcher: F) -> Self {
        Self { resolver, fetcher }
    }

    /// Entry point for callers holding raw form values
    ///
    /// Trims and checks the city, parses both "YYYY-MM-DD" dates and rejects
    /// an inverted range before anything goes over the network.
    pub async fn aggregate_raw(&self, city_name: &str, from: &str, to: &str) -> Result<Vec<ForecastRow>> {
        let range = DateRange::parse(from, to)?;
        self.aggregate(city_name, &range).await
    }

    /// Run the pipeline for one city and date range
    #[instrument(skip(self, range), fields(range = %range))]
    pub async fn aggregate(&self, city_name: &str, range: &DateRange) -> Result<Vec<ForecastRow>> {
        let city_name = city_name.trim();
        if city_name.is_empty() {
            return Err(SnowcastError::validation("city name must not be empty"));
        }

        let mut stage = AggregationStage::Resolving;
        debug!("Stage: {}", stage);
        let location = self
            .resolver
            .resolve(city_name)
            .await
            .inspect_err(|e| warn!("Aggregation failed while {}: {}", stage, e))?;

        stage = AggregationStage::Fetching;
        debug!("Stage: {}", stage);
        let payload = self
            .fetcher
            .fetch(&location, range)
            .await
            .inspect_err(|e| warn!("Aggregation failed while {}: {}", stage, e))?;

        stage = AggregationStage::Reducing;
        debug!("Stage: {}", stage);
        let snow_depth = SnowDepthReducer::reduce_to_daily(payload.hourly.as_ref());

        stage = AggregationStage::Projecting;
        debug!("Stage: {}", stage);
        let rows = project_rows(&payload.daily, &snow_depth);

        stage = AggregationStage::Done;
        info!(
            "Aggregation {} for {}: {} rows, {} days with snow depth",
            stage,
            location.display_name(),
            rows.len(),
            snow_depth.len()
        );
        Ok(rows)
    }
}

/// Zip the daily series with the snow depth maxima, keeping the daily order
#[must_use]
pub fn project_rows(daily: &DailySeries, snow_depth: &DailySnowDepthMax) -> Vec<ForecastRow> {
    daily
        .time
        .iter()
        .enumerate()
        .map(|(i, day)| ForecastRow {
            date: day.clone(),
            temperature_max: DailySeries::value_at(&daily.temperature_max, i),
            temperature_min: DailySeries::value_at(&daily.temperature_min, i),
            precipitation_sum: DailySeries::value_at(&daily.precipitation_sum, i),
            snowfall_sum: DailySeries::value_at(&daily.snowfall_sum, i),
            snow_depth_max_cm: snow_depth.get(day),
        })
        .collect()
}
