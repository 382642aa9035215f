//! One generation run, wired from configuration.

use crate::error::{AppError, AppResult};
use cgraph_config::{Config, ConfigLoader};
use cgraph_graphs::{CommitGraphManager, GraphOutcome};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Main application structure.
#[derive(Debug, Clone)]
pub struct App {
    config: Config,
}

impl App {
    /// Creates an application from an already validated configuration.
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Loads configuration from the config file and environment.
    pub fn from_env() -> AppResult<Self> {
        ConfigLoader::load().map(Self::new).map_err(AppError::Config)
    }

    /// The configuration in use.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Aggregates and renders the chart for the window ending tomorrow.
    pub async fn run(&self) -> AppResult<GraphOutcome> {
        self.run_at(Utc::now()).await
    }

    /// Aggregates and renders the chart for the window ending one day after `now`.
    pub async fn run_at(&self, now: DateTime<Utc>) -> AppResult<GraphOutcome> {
        let manager = CommitGraphManager::from_config(&self.config).map_err(AppError::Config)?;

        info!(
            "Counting commits for '{}' over {} days",
            self.config.github.organization, self.config.window.window_days
        );
        let outcome = manager.generate_at(now).await?;
        report(&outcome);
        Ok(outcome)
    }
}

fn report(outcome: &GraphOutcome) {
    for failure in &outcome.report.failures {
        warn!(
            "Partial counts for '{}': stopped at page {} ({})",
            failure.repository, failure.page, failure.reason
        );
    }

    info!(
        "Wrote {} ({} commits across {} weeks, {} repositories)",
        outcome.path.display(),
        outcome.report.counts.total(),
        outcome.report.counts.len(),
        outcome.report.repositories.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgraph_common::test_utils::{create_temp_dir, mock_timestamp};

    fn config(api_url: &str, output: std::path::PathBuf) -> Config {
        let mut config = Config::default();
        config.github.token = "ghp_test".to_string();
        config.github.api_url = api_url.to_string();
        config.github.timeout_secs = 5;
        config.output.path = output;
        config
    }

    #[tokio::test]
    async fn test_invalid_api_url_is_a_config_error() {
        let dir = create_temp_dir();
        let app = App::new(config("not a url", dir.path().join("graph.png")));

        let err = app.run_at(mock_timestamp(2024, 6, 1, 0, 0, 0)).await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn test_unreachable_api_writes_no_chart() {
        let dir = create_temp_dir();
        let output = dir.path().join("graph.png");
        let app = App::new(config("http://127.0.0.1:1", output.clone()));

        let err = app.run_at(mock_timestamp(2024, 6, 1, 0, 0, 0)).await.unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
        assert!(!output.exists());
    }
}
