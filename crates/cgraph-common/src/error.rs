//! Error types and utilities for cgraph

use thiserror::Error;

/// Result type alias for cgraph operations
pub type Result<T> = std::result::Result<T, CgraphError>;

/// Boxed error source carried by the struct variants
type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for cgraph operations
#[derive(Error, Debug)]
pub enum CgraphError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport level failures (connect, timeout, body read)
    #[error("Network error: {message}")]
    Network {
        /// Human readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<BoxedSource>,
    },

    /// GitHub API answered with a non-success status
    #[error("GitHub API error: {message}")]
    GitHub {
        /// Human readable description, including the response body
        message: String,
        /// HTTP status code returned by the API
        status_code: Option<u16>,
        /// Underlying cause, if any
        #[source]
        source: Option<BoxedSource>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        /// Human readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<BoxedSource>,
    },

    /// Validation errors for configuration values or input data
    #[error("Validation error: {message}")]
    Validation {
        /// Human readable description
        message: String,
        /// Offending field, if known
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        /// Human readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<BoxedSource>,
    },
}

impl CgraphError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new GitHub API error with status code
    pub fn github_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::GitHub {
            message: msg.into(),
            status_code: Some(status),
            source: None,
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// HTTP status attached to a GitHub error, if any
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::GitHub { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

// Error conversion implementations for external types

/// Convert from reqwest::Error to CgraphError
impl From<reqwest::Error> for CgraphError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err)
        } else if err.is_decode() {
            Self::network_with_source("Failed to decode response body", err)
        } else if let Some(status) = err.status() {
            let code = status.as_u16();
            Self::GitHub {
                message: format!("HTTP error: {code}"),
                status_code: Some(code),
                source: Some(Box::new(err)),
            }
        } else {
            Self::network_with_source("Network request failed", err)
        }
    }
}

/// Convert from toml::de::Error to CgraphError
impl From<toml::de::Error> for CgraphError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML parsing error", err)
    }
}

/// Convert from serde_yaml::Error to CgraphError
impl From<serde_yaml::Error> for CgraphError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config_with_source("YAML parsing error", err)
    }
}

/// Convert from plotters drawing errors to CgraphError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for CgraphError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let error = CgraphError::new("test message");
        assert!(error.to_string().contains("test message"));

        let config_error = CgraphError::config("config issue");
        assert!(config_error.to_string().contains("Configuration error"));
        assert!(config_error.to_string().contains("config issue"));

        let github_error = CgraphError::github_with_status("Server error", 502);
        assert!(github_error.to_string().contains("GitHub API error"));
        assert!(github_error.to_string().contains("Server error"));
        assert_eq!(github_error.status_code(), Some(502));

        let validation_error = CgraphError::validation_field("Invalid input", "page_size");
        assert!(validation_error.to_string().contains("Validation error"));
        assert!(validation_error.to_string().contains("Invalid input"));
        assert_eq!(validation_error.status_code(), None);
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let wrapped_error = CgraphError::with_source("Failed to read file", io_error);

        assert!(wrapped_error.to_string().contains("Failed to read file"));
        assert!(wrapped_error.source().is_some());

        let config_source_error = CgraphError::config_with_source(
            "Config loading failed",
            io::Error::new(io::ErrorKind::PermissionDenied, "Access denied"),
        );

        assert!(config_source_error.to_string().contains("Configuration error"));
        assert!(config_source_error.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: CgraphError = io_error.into();

        assert!(error.to_string().contains("I/O error"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_error =
            serde_json::from_str::<serde_json::Value>(r#"{"invalid": json}"#).unwrap_err();
        let error: CgraphError = serde_error.into();

        assert!(error.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_yaml_and_toml_errors_map_to_config() {
        let yaml_error = serde_yaml::from_str::<Vec<u32>>("{ not: [a list").unwrap_err();
        let error: CgraphError = yaml_error.into();
        assert!(matches!(error, CgraphError::Config { .. }));

        let toml_error = toml::from_str::<toml::Value>("key = ").unwrap_err();
        let error: CgraphError = toml_error.into();
        assert!(matches!(error, CgraphError::Config { .. }));
    }

    #[test]
    fn test_error_display_formatting() {
        assert_eq!(CgraphError::new("test error").to_string(), "test error");
        assert_eq!(
            CgraphError::config("missing field").to_string(),
            "Configuration error: missing field"
        );
        assert_eq!(
            CgraphError::github_with_status("rate limited", 403).to_string(),
            "GitHub API error: rate limited"
        );
    }

    #[test]
    fn test_error_chain_preservation() {
        let root_error = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let middle_error = CgraphError::config_with_source("Middle layer", root_error);
        let top_error = CgraphError::with_source("Top layer", middle_error);

        let mut current_error: &dyn std::error::Error = &top_error;
        let mut depth = 0;
        while let Some(source) = current_error.source() {
            current_error = source;
            depth += 1;
        }

        assert_eq!(depth, 2);
    }
}
