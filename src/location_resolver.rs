//! Location Resolution Module
//!
//! Resolves a free-text city name to coordinates through the Open-Meteo
//! geocoding API. The first candidate the service returns is used as is.

use crate::api::ApiClient;
use crate::config::ApiConfig;
use crate::models::Location;
use crate::weather::open_meteo::GeocodingResponse;
use crate::{Result, SnowcastError};
use tracing::{debug, info, instrument, warn};

/// Turns a place name into a [`Location`]
///
/// Returned futures are `Send` so an aggregation can run on a spawned task.
pub trait GeocodeResolver {
    fn resolve(&self, city_name: &str) -> impl Future<Output = Result<Location>> + Send;
}

/// Open-Meteo `/search` client asking for a single localized candidate
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    api: ApiClient,
    base_url: String,
    language: String,
}

impl OpenMeteoGeocoder {
    pub fn new(api: ApiClient, config: &ApiConfig) -> Self {
        Self {
            api,
            base_url: config.geocoding_base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
        }
    }

    fn search_url(&self, city_name: &str) -> String {
        format!(
            "{}/search?name={}&count=1&language={}&format=json",
            self.base_url,
            urlencoding::encode(city_name),
            urlencoding::encode(&self.language)
        )
    }
}

impl GeocodeResolver for OpenMeteoGeocoder {
    #[instrument(skip(self))]
    async fn resolve(&self, city_name: &str) -> Result<Location> {
        info!("Geocoding location: '{}'", city_name);

        let url = self.search_url(city_name);
        let response: GeocodingResponse = self.api.get_json("Geocoding", &url).await?;

        let Some(first) = response.results.and_then(|results| results.into_iter().next()) else {
            warn!("No results found for location '{}'", city_name);
            return Err(SnowcastError::not_found(format!("City not found: {city_name}")));
        };

        let location = first.into_location(city_name).inspect_err(|e| warn!("{}", e))?;
        debug!(
            "Found location: {} ({})",
            location.display_name(),
            location.format_coordinates()
        );

        Ok(location)
    }
}
