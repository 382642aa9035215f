//! Rolling window of Monday-aligned week buckets.

use cgraph_common::WeekStart;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// The weeks covered by one run, plus the instants used to query commits.
///
/// Weeks run from the Monday containing `since` through the Monday
/// containing `until`, inclusive. Bucketing uses the same
/// [`WeekStart::of_instant`] rule, so every bucketed commit lands on a week
/// that is part of the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    since: DateTime<Utc>,
    until: DateTime<Utc>,
    weeks: Vec<WeekStart>,
}

impl WeekWindow {
    /// Window of `window_days` ending tomorrow, measured from the wall clock.
    pub fn ending_now(window_days: u32) -> Self {
        Self::ending_at(Utc::now(), window_days)
    }

    /// Window of `window_days` ending one day after `now`, so today's commits
    /// are always included.
    pub fn ending_at(now: DateTime<Utc>, window_days: u32) -> Self {
        let until = now + Duration::days(1);
        let since = until - Duration::days(i64::from(window_days));
        Self::between(since, until)
    }

    /// Window covering the weeks of `since` through `until`.
    pub fn between(since: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        let last = WeekStart::of_instant(until);
        let mut weeks = Vec::new();
        let mut current = WeekStart::of_instant(since);
        while current <= last {
            weeks.push(current);
            current = current.next();
        }

        Self {
            since,
            until,
            weeks,
        }
    }

    /// Lower bound for the commit query.
    pub const fn since(&self) -> DateTime<Utc> {
        self.since
    }

    /// Upper bound for the commit query.
    pub const fn until(&self) -> DateTime<Utc> {
        self.until
    }

    /// Week buckets in ascending order.
    pub fn weeks(&self) -> &[WeekStart] {
        &self.weeks
    }

    /// Number of week buckets.
    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    /// True when `since` is after `until`.
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    /// The bucket a commit timestamp belongs to, if that week is in the window.
    pub fn bucket(&self, timestamp: DateTime<Utc>) -> Option<WeekStart> {
        let week = WeekStart::of_instant(timestamp);
        let first = *self.weeks.first()?;
        let last = *self.weeks.last()?;
        (first..=last).contains(&week).then_some(week)
    }
}
