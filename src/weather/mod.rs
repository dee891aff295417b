//! Forecast retrieval from the Open-Meteo forecast API

use crate::api::ApiClient;
use crate::config::ApiConfig;
use crate::models::{DailySeries, DateRange, ForecastPayload, HourlySeries, Location};
use crate::{Result, SnowcastError};
use tracing::{debug, info, instrument, warn};

pub mod open_meteo;

/// Daily metrics requested from the forecast service
pub const DAILY_METRICS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,snowfall_sum";

/// Hourly metrics requested from the forecast service
pub const HOURLY_METRICS: &str = "snow_depth";

/// Source of daily and hourly forecast series for a location
pub trait ForecastFetcher {
    fn fetch(
        &self,
        location: &Location,
        range: &DateRange,
    ) -> impl Future<Output = Result<ForecastPayload>> + Send;
}

/// Open-Meteo `/forecast` client
#[derive(Debug, Clone)]
pub struct OpenMeteoForecastClient {
    api: ApiClient,
    base_url: String,
    timezone: String,
}

impl OpenMeteoForecastClient {
    pub fn new(api: ApiClient, config: &ApiConfig) -> Self {
        Self {
            api,
            base_url: config.forecast_base_url.trim_end_matches('/').to_string(),
            timezone: config.timezone.clone(),
        }
    }

    fn forecast_url(&self, location: &Location, range: &DateRange) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&daily={}&hourly={}&timezone={}&start_date={}&end_date={}",
            self.base_url,
            location.latitude,
            location.longitude,
            DAILY_METRICS,
            HOURLY_METRICS,
            urlencoding::encode(&self.timezone),
            range.start_param(),
            range.end_param()
        )
    }
}

impl ForecastFetcher for OpenMeteoForecastClient {
    #[instrument(skip(self, location, range), fields(lat = location.latitude, lon = location.longitude, range = %range))]
    async fn fetch(&self, location: &Location, range: &DateRange) -> Result<ForecastPayload> {
        info!(
            "Fetching forecast for {} ({}) over {}",
            location.name,
            location.format_coordinates(),
            range
        );

        let url = self.forecast_url(location, range);
        let response: open_meteo::ForecastResponse = self.api.get_json("Forecast", &url).await?;

        debug!(
            "Forecast grid point ({:?}, {:?}) in timezone {:?}",
            response.latitude, response.longitude, response.timezone
        );

        let daily = response.daily.ok_or_else(|| {
            warn!("Forecast response for {} has no daily series", range);
            SnowcastError::incomplete_data(format!(
                "no daily forecast returned for {} over {}",
                location.name, range
            ))
        })?;
        let daily = DailySeries::try_from(daily)?;
        let hourly = response.hourly.map(HourlySeries::from);

        if hourly.is_none() {
            debug!("Forecast response carries no hourly series");
        }

        info!("Received {} daily entries", daily.len());
        Ok(ForecastPayload { daily, hourly })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> OpenMeteoForecastClient {
        let config = ApiConfig {
            forecast_base_url: server.uri(),
            ..ApiConfig::default()
        };
        OpenMeteoForecastClient::new(ApiClient::new(&config).unwrap(), &config)
    }

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        )
        .unwrap()
    }

    fn sapporo() -> Location {
        Location::new("札幌市", 43.06417, 141.34694)
    }

    #[tokio::test]
    async fn test_fetch_sends_expected_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("latitude", "43.06417"))
            .and(query_param("longitude", "141.34694"))
            .and(query_param("daily", DAILY_METRICS))
            .and(query_param("hourly", "snow_depth"))
            .and(query_param("timezone", "Asia/Tokyo"))
            .and(query_param("start_date", "2024-01-01"))
            .and(query_param("end_date", "2024-01-02"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "latitude": 43.06,
                "longitude": 141.35,
                "timezone": "Asia/Tokyo",
                "daily": {
                    "time": ["2024-01-01", "2024-01-02"],
                    "temperature_2m_max": [-1.0, 0.5],
                    "temperature_2m_min": [-6.2, -5.0],
                    "precipitation_sum": [2.4, 0.0],
                    "snowfall_sum": [1.68, 0.0]
                },
                "hourly": {
                    "time": ["2024-01-01T00:00", "2024-01-01T01:00"],
                    "snow_depth": [0.31, 0.32]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let payload = client(&server).fetch(&sapporo(), &range()).await.unwrap();
        assert_eq!(payload.daily.time, vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(payload.daily.snowfall_sum, vec![Some(1.68), Some(0.0)]);
        let hourly = payload.hourly.unwrap();
        assert_eq!(hourly.snow_depth, Some(vec![Some(0.31), Some(0.32)]));
    }

    #[tokio::test]
    async fn test_missing_hourly_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "daily": { "time": ["2024-01-01"], "temperature_2m_max": [2.0] }
            })))
            .mount(&server)
            .await;

        let payload = client(&server).fetch(&sapporo(), &range()).await.unwrap();
        assert_eq!(payload.daily.len(), 1);
        assert!(payload.hourly.is_none());
    }

    #[tokio::test]
    async fn test_missing_daily_is_incomplete_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hourly": { "time": ["2024-01-01T00:00"], "snow_depth": [0.1] }
            })))
            .mount(&server)
            .await;

        let err = client(&server).fetch(&sapporo(), &range()).await.unwrap_err();
        assert!(matches!(err, SnowcastError::IncompleteData { .. }));
    }

    #[tokio::test]
    async fn test_error_status_is_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": true,
                "reason": "Parameter 'start_date' is out of allowed range"
            })))
            .mount(&server)
            .await;

        let err = client(&server).fetch(&sapporo(), &range()).await.unwrap_err();
        assert!(matches!(err, SnowcastError::Service { .. }));
    }
}
