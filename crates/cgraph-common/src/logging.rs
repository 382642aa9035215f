//! Structured logging infrastructure for cgraph

use crate::error::{CgraphError, Result};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::Mutex};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "cgraph=debug"); `RUST_LOG` takes precedence
    pub level: String,
    /// Emit one JSON object per event instead of human readable lines
    pub json_format: bool,
    /// Whether to include target module information
    pub include_targets: bool,
    /// Optional file path for log output, appended to
    pub file_path: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_targets: true,
            file_path: None,
        }
    }
}

impl LoggingConfig {
    /// Resolve the effective filter: `RUST_LOG` first, then the configured level
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize the tracing subscriber with the given configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    let file = match &config.file_path {
        Some(path) => Some(Mutex::new(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?,
        )),
        None => None,
    };

    let installed = match (config.json_format, file) {
        (true, Some(file)) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(config.include_targets)
                    .with_writer(file),
            )
            .try_init(),
        (true, None) => registry
            .with(fmt::layer().json().with_target(config.include_targets))
            .try_init(),
        (false, Some(file)) => registry
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(config.include_targets)
                    .with_writer(file),
            )
            .try_init(),
        (false, None) => registry
            .with(fmt::layer().with_target(config.include_targets))
            .try_init(),
    };

    installed.map_err(|e| CgraphError::with_source("Failed to install tracing subscriber", e))
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> Result<()> {
    init_logging(&LoggingConfig::default())
}
