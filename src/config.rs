//! Configuration management for `snowcast`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::SnowcastError;
use anyhow::{Context, Result};
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnowcastConfig {
    /// Geocoding and forecast service settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Values the CLI falls back to when arguments are omitted
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Open-Meteo service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the geocoding API (the `/search` path is appended)
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,
    /// Base URL of the forecast API (the `/forecast` path is appended)
    #[serde(default = "default_forecast_base_url")]
    pub forecast_base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Language tag for geocoding results
    #[serde(default = "default_language")]
    pub language: String,
    /// IANA timezone the forecast is reported in
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// City looked up when none is given
    #[serde(default = "default_city")]
    pub city: String,
}

// Default value functions
fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_language() -> String {
    "ja".to_string()
}

fn default_timezone() -> String {
    "Asia/Tokyo".to_string()
}

fn default_user_agent() -> String {
    format!("snowcast/{}", env!("CARGO_PKG_VERSION"))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_city() -> String {
    "東京".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            geocoding_base_url: default_geocoding_base_url(),
            forecast_base_url: default_forecast_base_url(),
            timeout_seconds: default_timeout(),
            language: default_language(),
            timezone: default_timezone(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
        }
    }
}

impl SnowcastConfig {
    /// Load configuration from the default file location and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // SNOWCAST_API__TIMEOUT_SECONDS=10 overrides api.timeout_seconds
        builder = builder.add_source(
            Environment::with_prefix("SNOWCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SnowcastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("snowcast").join("config.toml"))
    }

    /// Apply default values to fields left empty
    pub fn apply_defaults(&mut self) {
        if self.api.geocoding_base_url.is_empty() {
            self.api.geocoding_base_url = default_geocoding_base_url();
        }
        if self.api.forecast_base_url.is_empty() {
            self.api.forecast_base_url = default_forecast_base_url();
        }
        if self.api.timeout_seconds == 0 {
            self.api.timeout_seconds = default_timeout();
        }
        if self.api.language.is_empty() {
            self.api.language = default_language();
        }
        if self.api.timezone.is_empty() {
            self.api.timezone = default_timezone();
        }
        if self.api.user_agent.is_empty() {
            self.api.user_agent = default_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.city.trim().is_empty() {
            self.defaults.city = default_city();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// The configured reporting timezone
    pub fn timezone(&self) -> Result<Tz> {
        self.api.timezone.parse::<Tz>().map_err(|_| {
            SnowcastError::config(format!(
                "Unknown timezone '{}'. Use an IANA name such as Asia/Tokyo",
                self.api.timezone
            ))
            .into()
        })
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.api.timeout_seconds > 300 {
            return Err(SnowcastError::config("API timeout cannot exceed 300 seconds").into());
        }
        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SnowcastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SnowcastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (label, url) in [
            ("Geocoding", &self.api.geocoding_base_url),
            ("Forecast", &self.api.forecast_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(SnowcastError::config(format!(
                    "{label} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if self.api.language.trim().is_empty() {
            return Err(SnowcastError::config("Geocoding language must not be empty").into());
        }

        self.timezone()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SnowcastConfig::default();
        assert_eq!(config.api.forecast_base_url, "https://api.open-meteo.com/v1");
        assert_eq!(
            config.api.geocoding_base_url,
            "https://geocoding-api.open-meteo.com/v1"
        );
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.api.language, "ja");
        assert_eq!(config.api.timezone, "Asia/Tokyo");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.city, "東京");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = SnowcastConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = SnowcastConfig::default();
        config.api.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_unknown_timezone() {
        let mut config = SnowcastConfig::default();
        config.api.timezone = "Mars/Olympus".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown timezone"));
    }

    #[test]
    fn test_config_validation_bad_url() {
        let mut config = SnowcastConfig::default();
        config.api.forecast_base_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Forecast API base URL"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_fields() {
        let mut config = SnowcastConfig::default();
        config.api.timezone = String::new();
        config.api.timeout_seconds = 0;
        config.defaults.city = "   ".to_string();
        config.apply_defaults();
        assert_eq!(config.api.timezone, "Asia/Tokyo");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.defaults.city, "東京");
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\ntimezone = \"Europe/Zurich\"\ntimeout_seconds = 5\n\n[defaults]\ncity = \"Sapporo\""
        )
        .unwrap();

        let config = SnowcastConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.api.timezone, "Europe/Zurich");
        assert_eq!(config.api.timeout_seconds, 5);
        assert_eq!(config.defaults.city, "Sapporo");
        // untouched sections keep their defaults
        assert_eq!(config.api.language, "ja");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = SnowcastConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("snowcast"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
