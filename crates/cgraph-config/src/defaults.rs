//! Default values for every configuration section.

use crate::schema::*;
use cgraph_common::LoggingConfig;
use std::path::PathBuf;

/// GitHub REST API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Organization queried when none is configured.
pub const DEFAULT_ORGANIZATION: &str = "crib-project";

/// Rolling window length in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 180;

/// Records per page; the API maximum.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Pause after each commit page request.
pub const DEFAULT_PAGE_DELAY_MS: u64 = 1000;

/// Chart destination, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = ".github/scripts/commit_graph.png";

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GitHubConfig::default(),
            window: WindowConfig::default(),
            pacing: PacingConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: String::new(),
            organization: DEFAULT_ORGANIZATION.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
            rate_limit_per_sec: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        // golden-ratio figure at 100 dpi
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            width: 647,
            height: 400,
            title: "Total Commits per Week".to_string(),
        }
    }
}
