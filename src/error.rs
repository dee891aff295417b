//! Error types and handling for the `snowcast` pipeline

use thiserror::Error;

/// Main error type for the `snowcast` application
#[derive(Error, Debug)]
pub enum SnowcastError {
    /// Caller-supplied input is malformed (empty city, bad or inverted dates)
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Geocoding produced no candidate for the requested name
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// An external service answered with a non-success status or the transport failed
    #[error("Service error: {message}")]
    Service { message: String },

    /// The forecast answered successfully but lacked the daily series
    #[error("Incomplete data: {message}")]
    IncompleteData { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl SnowcastError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn service<S: Into<String>>(message: S) -> Self {
        Self::Service {
            message: message.into(),
        }
    }

    pub fn incomplete_data<S: Into<String>>(message: S) -> Self {
        Self::IncompleteData {
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SnowcastError::Validation { message } => format!("Invalid input: {message}"),
            SnowcastError::NotFound { message } => format!("{message}. Please check the city name."),
            SnowcastError::Service { .. } => {
                "Unable to reach the weather services. Please check your internet connection."
                    .to_string()
            }
            SnowcastError::IncompleteData { .. } => {
                "No daily forecast was returned. Please check the date range and city.".to_string()
            }
            SnowcastError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            SnowcastError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SnowcastError::validation("empty city");
        assert!(matches!(err, SnowcastError::Validation { .. }));

        let err = SnowcastError::not_found("Atlantis");
        assert!(matches!(err, SnowcastError::NotFound { .. }));

        let err = SnowcastError::service("HTTP 503");
        assert!(matches!(err, SnowcastError::Service { .. }));

        let err = SnowcastError::incomplete_data("no daily");
        assert!(matches!(err, SnowcastError::IncompleteData { .. }));
    }

    #[test]
    fn test_display_carries_message() {
        let err = SnowcastError::service("HTTP 503 Service Unavailable");
        assert_eq!(err.to_string(), "Service error: HTTP 503 Service Unavailable");
    }

    #[test]
    fn test_user_messages() {
        let err = SnowcastError::validation("start date must not be after end date");
        assert!(err.user_message().contains("start date"));

        let err = SnowcastError::not_found("City not found: Atlantis");
        assert!(err.user_message().contains("Atlantis"));

        let err = SnowcastError::service("boom");
        assert!(err.user_message().contains("Unable to reach"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SnowcastError = io_err.into();
        assert!(matches!(err, SnowcastError::Io { .. }));
    }
}
