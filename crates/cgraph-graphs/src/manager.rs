//! Orchestrates one graph generation run: aggregate, then render.

use crate::aggregator::{AggregationConfig, AggregationReport, WeeklyAggregator, WeeklyCommitCounts};
use crate::chart::{ChartConfig, WeeklyCommitChart};
use crate::github::GitHubClient;
use crate::pacing::pacer_from_config;
use crate::source::CommitSource;
use crate::traits::GraphRenderer;
use cgraph_common::Result;
use cgraph_config::Config;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::{info, instrument};

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct GraphOutcome {
    /// Where the chart was written.
    pub path: PathBuf,
    /// The aggregation behind the chart.
    pub report: AggregationReport,
}

/// Runs aggregation and hands the weekly counts to a renderer.
pub struct CommitGraphManager<S, R> {
    aggregator: WeeklyAggregator<S>,
    renderer: R,
    chart: ChartConfig,
}

impl CommitGraphManager<GitHubClient, WeeklyCommitChart> {
    /// Wires the GitHub client, pacer and chart renderer from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = GitHubClient::new(&config.github)?;
        let pacer = pacer_from_config(&config.pacing)?;
        let aggregator = WeeklyAggregator::new(client, pacer, AggregationConfig::from_config(config));

        Ok(Self::new(
            aggregator,
            WeeklyCommitChart::new(),
            ChartConfig::from(&config.output),
        ))
    }
}

impl<S, R> CommitGraphManager<S, R>
where
    S: CommitSource,
    R: GraphRenderer<Data = WeeklyCommitCounts>,
{
    /// Creates a manager from its parts.
    pub const fn new(aggregator: WeeklyAggregator<S>, renderer: R, chart: ChartConfig) -> Self {
        Self {
            aggregator,
            renderer,
            chart,
        }
    }

    /// Chart settings used for rendering.
    pub const fn chart_config(&self) -> &ChartConfig {
        &self.chart
    }

    /// Generates the chart for the window ending tomorrow.
    pub async fn generate(&self) -> Result<GraphOutcome> {
        self.generate_at(Utc::now()).await
    }

    /// Generates the chart for the window ending one day after `now`.
    ///
    /// Nothing is written when the repository listing fails.
    #[instrument(skip(self), fields(renderer = self.renderer.name()))]
    pub async fn generate_at(&self, now: DateTime<Utc>) -> Result<GraphOutcome> {
        let report = self.aggregator.run_at(now).await?;
        info!(
            "Aggregated {} commits across {} repositories",
            report.counts.total(),
            report.repositories.len()
        );

        self.renderer.render_to_file(&report.counts, &self.chart).await?;

        Ok(GraphOutcome {
            path: self.chart.path.clone(),
            report,
        })
    }
}
