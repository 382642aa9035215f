//! Test utilities and shared test helpers for cgraph.
//!
//! Fixtures here are shared by the unit and integration tests of every crate
//! in the workspace; enable the `testing` feature to use them outside this crate.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Test fixture for creating a mock timestamp.
pub fn mock_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// GitHub REST payloads shaped like the real API responses.
pub mod github_fixtures {
    use super::*;
    use crate::utils::format_timestamp;

    /// A `/orgs/{org}/repos` page body from `(name, private)` pairs.
    pub fn repositories_json(repos: &[(&str, bool)]) -> String {
        let entries: Vec<serde_json::Value> = repos
            .iter()
            .map(|(name, private)| {
                serde_json::json!({
                    "id": 1,
                    "name": name,
                    "full_name": format!("crib-project/{name}"),
                    "private": private,
                    "fork": false,
                })
            })
            .collect();
        serde_json::Value::Array(entries).to_string()
    }

    /// A `/repos/{org}/{repo}/commits` page body with one commit per timestamp.
    pub fn commits_json(timestamps: &[DateTime<Utc>]) -> String {
        let entries: Vec<serde_json::Value> = timestamps
            .iter()
            .enumerate()
            .map(|(i, ts)| {
                serde_json::json!({
                    "sha": format!("{i:040x}"),
                    "commit": {
                        "author": { "name": "dev", "date": format_timestamp(*ts) },
                        "committer": { "name": "dev", "date": format_timestamp(*ts) },
                        "message": format!("commit {i}"),
                    },
                })
            })
            .collect();
        serde_json::Value::Array(entries).to_string()
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// A minimal valid configuration as YAML.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
github:
  token: "test_token"
  organization: "crib-project"
"#
    }

    /// A full configuration as YAML.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "github:\n",
            "  api_url: \"https://github.example.com/api/v3\"\n",
            "  token: \"test_token_full\"\n",
            "  organization: \"example-org\"\n",
            "  timeout_secs: 10\n",
            "\n",
            "window:\n",
            "  window_days: 90\n",
            "  page_size: 50\n",
            "\n",
            "pacing:\n",
            "  page_delay_ms: 250\n",
            "  rate_limit_per_sec: 5\n",
            "\n",
            "output:\n",
            "  path: \"out/graph.png\"\n",
            "  width: 800\n",
            "  height: 500\n",
            "  title: \"Weekly Commits\"\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  json_format: true\n",
        )
    }
}
