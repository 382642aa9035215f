//! Weekly commit aggregation across an organization's public repositories.

use crate::pacing::Pacer;
use crate::source::{CommitQuery, CommitSource};
use crate::window::WeekWindow;
use cgraph_common::{Result, WeekStart};
use cgraph_config::Config;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, error, info, instrument, warn};

/// What to aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationConfig {
    /// Organization whose public repositories are counted.
    pub organization: String,
    /// Rolling window length in days.
    pub window_days: u32,
    /// Records requested per page.
    pub page_size: u32,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl AggregationConfig {
    /// Extracts the aggregation settings from the application configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            organization: config.github.organization.clone(),
            window_days: config.window.window_days,
            page_size: config.window.page_size,
        }
    }
}

/// Commit totals per week, holding exactly the weeks of one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyCommitCounts {
    counts: BTreeMap<WeekStart, u64>,
}

impl WeeklyCommitCounts {
    /// Every week of `window` with a count of zero.
    pub fn zeroed(window: &WeekWindow) -> Self {
        Self {
            counts: window.weeks().iter().map(|week| (*week, 0)).collect(),
        }
    }

    /// Adds one commit to `week`. Returns false, changing nothing, when the
    /// week is not part of the window.
    pub fn increment(&mut self, week: WeekStart) -> bool {
        match self.counts.get_mut(&week) {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    /// Adds `other`'s counts week by week. Weeks unknown to `self` are ignored.
    pub fn merge(&mut self, other: &Self) {
        for (week, count) in &other.counts {
            if let Some(total) = self.counts.get_mut(week) {
                *total += count;
            }
        }
    }

    /// Count for `week`, if it belongs to the window.
    pub fn get(&self, week: WeekStart) -> Option<u64> {
        self.counts.get(&week).copied()
    }

    /// `(week, count)` pairs in week order.
    pub fn iter(&self) -> impl Iterator<Item = (WeekStart, u64)> + '_ {
        self.counts.iter().map(|(week, count)| (*week, *count))
    }

    /// Weeks in order.
    pub fn weeks(&self) -> impl Iterator<Item = WeekStart> + '_ {
        self.counts.keys().copied()
    }

    /// Counts aligned with [`Self::weeks`].
    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.counts.values().copied()
    }

    /// Sum over all weeks.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Largest weekly count, zero when empty.
    pub fn max_count(&self) -> u64 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// Number of weeks.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when the window had no weeks.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// A repository whose commit listing stopped early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryFailure {
    /// Repository name.
    pub repository: String,
    /// Page that failed; earlier pages were counted.
    pub page: u32,
    /// Error text.
    pub reason: String,
}

/// Commit counts collected for a single repository.
#[derive(Debug, Clone)]
pub struct RepositoryCommits {
    /// Per-week counts over the window.
    pub counts: WeeklyCommitCounts,
    /// Commit page requests issued.
    pub pages_requested: u32,
    /// Commits whose week fell outside the window.
    pub skipped: u64,
    /// Set when pagination stopped on an error.
    pub failure: Option<RepositoryFailure>,
}

/// Result of a full aggregation run.
#[derive(Debug, Clone, Serialize)]
pub struct AggregationReport {
    /// Window the counts cover.
    pub window: WeekWindow,
    /// Totals across all repositories.
    pub counts: WeeklyCommitCounts,
    /// Public repositories that were processed.
    pub repositories: Vec<String>,
    /// Repositories counted only partially.
    pub failures: Vec<RepositoryFailure>,
}

impl AggregationReport {
    /// True when every repository was paged to the end.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Collects commits from a [`CommitSource`] and sums them per week.
pub struct WeeklyAggregator<S> {
    source: S,
    pacer: Box<dyn Pacer>,
    config: AggregationConfig,
}

impl<S: CommitSource> WeeklyAggregator<S> {
    /// Creates an aggregator over `source`, pausing with `pacer` between pages.
    pub fn new(source: S, pacer: Box<dyn Pacer>, config: AggregationConfig) -> Self {
        Self {
            source,
            pacer,
            config,
        }
    }

    /// The aggregation settings.
    pub const fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Names of the organization's public repositories, across all pages.
    /// Any page failure is returned as an error.
    #[instrument(skip(self), fields(organization = %self.config.organization))]
    pub async fn list_public_repositories(&self) -> Result<Vec<String>> {
        let per_page = self.config.page_size;
        let mut names = Vec::new();
        let mut page = 1;

        loop {
            let repositories = self
                .source
                .list_repositories(&self.config.organization, page, per_page)
                .await
                .map_err(|e| {
                    error!("Error fetching repositories (page {}): {}", page, e);
                    e
                })?;

            let fetched = repositories.len();
            names.extend(
                repositories
                    .into_iter()
                    .filter(|repo| !repo.private)
                    .map(|repo| repo.name),
            );

            if fetched == 0 || fetched < per_page as usize {
                break;
            }
            page += 1;
        }

        info!("Found {} public repositories", names.len());
        Ok(names)
    }

    /// Pages through `repository`'s commits inside `window` until an empty
    /// page. A failing page ends pagination and is reported in the result;
    /// counts from earlier pages are kept.
    #[instrument(skip(self, window))]
    pub async fn count_repository(&self, window: &WeekWindow, repository: &str) -> RepositoryCommits {
        let mut counts = WeeklyCommitCounts::zeroed(window);
        let mut query = CommitQuery::first_page(window, self.config.page_size);
        let mut pages_requested = 0;
        let mut skipped = 0;
        let mut failure = None;

        loop {
            pages_requested += 1;
            let commits = match self
                .source
                .list_commits(&self.config.organization, repository, &query)
                .await
            {
                Ok(commits) => commits,
                Err(e) => {
                    warn!(
                        "Error fetching commits for repo '{}' (page {}): {}",
                        repository, query.page, e
                    );
                    failure = Some(RepositoryFailure {
                        repository: repository.to_string(),
                        page: query.page,
                        reason: e.to_string(),
                    });
                    break;
                }
            };

            if commits.is_empty() {
                break;
            }

            debug!("Page {} returned {} commits", query.page, commits.len());
            for commit in &commits {
                let counted = window
                    .bucket(commit.timestamp())
                    .is_some_and(|week| counts.increment(week));
                if !counted {
                    debug!("Skipping commit at {} outside the window", commit.timestamp());
                    skipped += 1;
                }
            }

            query = query.next_page();
            self.pacer.pause().await;
        }

        RepositoryCommits {
            counts,
            pages_requested,
            skipped,
            failure,
        }
    }

    /// Sums the weekly counts of every repository in `repositories`.
    pub async fn aggregate(
        &self,
        window: &WeekWindow,
        repositories: &[String],
    ) -> (WeeklyCommitCounts, Vec<RepositoryFailure>) {
        let mut totals = WeeklyCommitCounts::zeroed(window);
        let mut failures = Vec::new();

        for repository in repositories {
            let result = self.count_repository(window, repository).await;
            info!(
                "Counted {} commits in '{}' over {} page(s)",
                result.counts.total(),
                repository,
                result.pages_requested
            );
            totals.merge(&result.counts);
            failures.extend(result.failure);
        }

        (totals, failures)
    }

    /// Runs a full aggregation for the window ending tomorrow.
    pub async fn run(&self) -> Result<AggregationReport> {
        self.run_at(Utc::now()).await
    }

    /// Runs a full aggregation for the window ending one day after `now`.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<AggregationReport> {
        let window = WeekWindow::ending_at(now, self.config.window_days);
        info!(
            "Aggregating {} weeks from {} to {}",
            window.len(),
            window.since(),
            window.until()
        );

        let repositories = self.list_public_repositories().await?;
        let (counts, failures) = self.aggregate(&window, &repositories).await;

        if !failures.is_empty() {
            warn!(
                "{} of {} repositories were counted partially",
                failures.len(),
                repositories.len()
            );
        }

        Ok(AggregationReport {
            window,
            counts,
            repositories,
            failures,
        })
    }
}
