//! Commit source abstraction and the GitHub payload models it returns.

use crate::window::WeekWindow;
use async_trait::async_trait;
use cgraph_common::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository entry from `/orgs/{org}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name, without the owner.
    pub name: String,
    /// Visibility flag. Entries without it are treated as private.
    #[serde(default = "default_private")]
    pub private: bool,
}

const fn default_private() -> bool {
    true
}

/// A commit entry from `/repos/{org}/{repo}/commits`, reduced to what is counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Git commit metadata.
    pub commit: CommitDetail,
}

/// Git-level commit metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetail {
    /// Who applied the commit, and when.
    pub committer: Signature,
}

/// Name/date pair attached to a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Commit time in UTC.
    pub date: DateTime<Utc>,
}

impl CommitRecord {
    /// Builds a record committed at `date`.
    pub const fn committed_at(date: DateTime<Utc>) -> Self {
        Self {
            commit: CommitDetail {
                committer: Signature { date },
            },
        }
    }

    /// Committer timestamp used for bucketing.
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.commit.committer.date
    }
}

/// Parameters of one commit page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitQuery {
    /// Only commits after this instant.
    pub since: DateTime<Utc>,
    /// Only commits before this instant.
    pub until: DateTime<Utc>,
    /// 1-based page number.
    pub page: u32,
    /// Records per page.
    pub per_page: u32,
}

impl CommitQuery {
    /// The first page of commits inside `window`.
    pub const fn first_page(window: &WeekWindow, per_page: u32) -> Self {
        Self {
            since: window.since(),
            until: window.until(),
            page: 1,
            per_page,
        }
    }

    /// The same query, one page further.
    #[must_use]
    pub const fn next_page(self) -> Self {
        Self {
            page: self.page + 1,
            ..self
        }
    }
}

/// Where repositories and commits come from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// One page of the organization's repositories.
    async fn list_repositories(
        &self,
        organization: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>>;

    /// One page of a repository's commits.
    async fn list_commits(
        &self,
        organization: &str,
        repository: &str,
        query: &CommitQuery,
    ) -> Result<Vec<CommitRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgraph_common::test_utils::{github_fixtures, mock_timestamp};

    #[test]
    fn test_repository_visibility_defaults_to_private() {
        let repos: Vec<Repository> =
            serde_json::from_str(r#"[{"name": "a", "private": false}, {"name": "b"}]"#).unwrap();
        assert!(!repos[0].private);
        assert!(repos[1].private);
    }

    #[test]
    fn test_commit_record_from_api_payload() {
        let ts = mock_timestamp(2024, 1, 7, 23, 59, 59);
        let body = github_fixtures::commits_json(&[ts]);
        let records: Vec<CommitRecord> = serde_json::from_str(&body).unwrap();
        assert_eq!(records, vec![CommitRecord::committed_at(ts)]);
        assert_eq!(records[0].timestamp(), ts);
    }

    #[test]
    fn test_commit_without_committer_is_rejected() {
        let result = serde_json::from_str::<Vec<CommitRecord>>(r#"[{"commit": {"author": {}}}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_query_paging() {
        let window = WeekWindow::between(
            mock_timestamp(2024, 1, 1, 0, 0, 0),
            mock_timestamp(2024, 1, 8, 0, 0, 0),
        );
        let first = CommitQuery::first_page(&window, 100);
        assert_eq!(first.page, 1);
        assert_eq!(first.since, window.since());

        let second = first.next_page();
        assert_eq!(second.page, 2);
        assert_eq!(second.per_page, 100);
        assert_eq!(second.until, window.until());
    }
}
