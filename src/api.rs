//! HTTP client shared by the Open-Meteo geocoding and forecast integrations
//!
//! Wraps a `reqwest` client with the configured timeout and user agent, maps
//! transport failures and non-success statuses onto [`SnowcastError::Service`]
//! and decodes JSON bodies. Requests are never retried.

use crate::config::ApiConfig;
use crate::{Result, SnowcastError};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Responses slower than this are logged as a warning
const SLOW_RESPONSE: Duration = Duration::from_secs(5);

/// Thin JSON-over-HTTP client
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    /// Create a new client from the API configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| SnowcastError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Issue a GET and decode the JSON body into `T`
    #[instrument(skip(self, url))]
    pub async fn get_json<T: DeserializeOwned>(&self, service: &str, url: &str) -> Result<T> {
        debug!("{} request URL: {}", service, url);
        let start_time = Instant::now();

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("{} request failed after {:.3}s: {}", service, start_time.elapsed().as_secs_f64(), e);
            SnowcastError::service(format!("{service} request failed: {e}"))
        })?;

        let status = response.status();
        debug!(
            "{} responded {} in {:.3}s",
            service,
            status,
            start_time.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            error!("{} returned HTTP {}", service, status.as_u16());
            return Err(SnowcastError::service(format!(
                "{service} returned status {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let parse_start = Instant::now();
        let body: T = response.json().await.map_err(|e| {
            error!("Failed to parse {} response: {}", service, e);
            SnowcastError::service(format!("Invalid {service} response: {e}"))
        })?;

        let total_duration = start_time.elapsed();
        info!(
            "{} request completed in {:.3}s (parse: {:.3}s)",
            service,
            total_duration.as_secs_f64(),
            parse_start.elapsed().as_secs_f64()
        );

        if total_duration > SLOW_RESPONSE {
            warn!(
                "Slow {} response detected: {:.3}s",
                service,
                total_duration.as_secs_f64()
            );
        }

        Ok(body)
    }
}
