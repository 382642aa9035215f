//! Configuration schema definitions using serde.

use cgraph_common::{LoggingConfig, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use validator::Validate;

/// Main configuration structure for cgraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// GitHub API configuration.
    #[validate]
    pub github: GitHubConfig,
    /// Commit window configuration.
    #[validate]
    pub window: WindowConfig,
    /// Request pacing configuration.
    #[validate]
    pub pacing: PacingConfig,
    /// Chart output configuration.
    #[validate]
    pub output: OutputConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// GitHub API configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API base URL.
    #[validate(url(message = "API URL must be a valid URL"))]
    #[validate(custom(
        function = "crate::validator::validate_http_scheme",
        message = "API URL must use http or https"
    ))]
    pub api_url: String,
    /// Access token sent as `Authorization: token <value>`.
    #[validate(length(min = 1, message = "GitHub token cannot be empty (set GITHUB_TOKEN)"))]
    #[validate(custom(
        function = "crate::validator::validate_not_blank",
        message = "GitHub token cannot be blank"
    ))]
    pub token: String,
    /// Organization whose public repositories are counted.
    #[validate(length(min = 1, message = "Organization cannot be empty"))]
    #[validate(custom(
        function = "crate::validator::validate_not_blank",
        message = "Organization cannot be blank"
    ))]
    pub organization: String,
    /// Per-request timeout in seconds.
    #[validate(range(min = 1, message = "Request timeout must be greater than 0"))]
    pub timeout_secs: u64,
}

impl fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("GitHubConfig")
            .field("api_url", &self.api_url)
            .field("token", &token)
            .field("organization", &self.organization)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GitHubConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Commit window configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct WindowConfig {
    /// Length of the rolling window in days, ending tomorrow.
    #[validate(range(min = 1, message = "Window must span at least one day"))]
    pub window_days: u32,
    /// Records requested per page (GitHub caps this at 100).
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub page_size: u32,
}

/// Request pacing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PacingConfig {
    /// Fixed pause after every commit page request, in milliseconds.
    pub page_delay_ms: u64,
    /// When set, pace with a token bucket of this many requests per second
    /// instead of the fixed pause.
    #[validate(range(min = 1, message = "Rate limit must be greater than 0"))]
    pub rate_limit_per_sec: Option<u32>,
}

impl PacingConfig {
    /// Fixed pause as a [`Duration`].
    #[must_use]
    pub const fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

/// Chart output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct OutputConfig {
    /// Where the PNG is written; overwritten on every run.
    #[validate(custom(
        function = "crate::validator::validate_output_path",
        message = "Output path cannot be empty"
    ))]
    pub path: PathBuf,
    /// Image width in pixels.
    #[validate(range(min = 1, message = "Chart width must be non-zero"))]
    pub width: u32,
    /// Image height in pixels.
    #[validate(range(min = 1, message = "Chart height must be non-zero"))]
    pub height: u32,
    /// Chart caption.
    pub title: String,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        crate::validator::ConfigValidator::validate(self)
    }
}
