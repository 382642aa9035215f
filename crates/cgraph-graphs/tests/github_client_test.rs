//! GitHub client tests against a local HTTP server serving canned responses.

use cgraph_common::test_utils::{github_fixtures, init_test_logging, mock_timestamp};
use cgraph_common::{CgraphError, WeekStart};
use cgraph_config::GitHubConfig;
use cgraph_graphs::{
    AggregationConfig, CommitQuery, CommitSource, GitHubClient, NoPacing, WeekWindow,
    WeeklyAggregator,
};
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

type Route = dyn Fn(&str) -> (u16, String) + Send + Sync;

/// Serves one response per connection and records each request head.
struct FakeGitHub {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeGitHub {
    async fn start(route: impl Fn(&str) -> (u16, String) + Send + Sync + 'static) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let route: Arc<Route> = Arc::new(route);

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }

                let head = String::from_utf8_lossy(&head).to_string();
                let target = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                recorded.lock().unwrap().push(head);

                let (status, body) = route(&target);
                let reason = if status == 200 { "OK" } else { "Error" };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    fn client(&self) -> GitHubClient {
        GitHubClient::new(&GitHubConfig {
            api_url: self.base_url.clone(),
            token: "ghp_test".to_string(),
            ..GitHubConfig::default()
        })
        .unwrap()
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn window() -> WeekWindow {
    WeekWindow::between(
        mock_timestamp(2024, 1, 1, 0, 0, 0),
        mock_timestamp(2024, 1, 8, 12, 0, 0),
    )
}

#[tokio::test]
async fn test_repository_request_carries_auth_and_paging() {
    init_test_logging();
    let server = FakeGitHub::start(|_| {
        (200, github_fixtures::repositories_json(&[("alpha", false), ("beta", true)]))
    })
    .await;

    let repos = server
        .client()
        .list_repositories("crib-project", 2, 100)
        .await
        .unwrap();
    assert_eq!(repos.len(), 2);
    assert!(!repos[0].private);
    assert!(repos[1].private);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let head = requests[0].to_lowercase();
    assert!(head.starts_with("get /orgs/crib-project/repos?page=2&per_page=100 "));
    assert!(head.contains("authorization: token ghp_test"));
    assert!(head.contains("accept: application/vnd.github+json"));
    assert!(head.contains("user-agent: cgraph/"));
}

#[tokio::test]
async fn test_commit_request_carries_window_bounds() {
    let server = FakeGitHub::start(|_| (200, github_fixtures::commits_json(&[]))).await;

    let query = CommitQuery::first_page(&window(), 50).next_page();
    let commits = server
        .client()
        .list_commits("crib-project", "alpha", &query)
        .await
        .unwrap();
    assert!(commits.is_empty());

    let requests = server.requests();
    let target = requests[0].split_whitespace().nth(1).unwrap();
    assert!(target.starts_with("/repos/crib-project/alpha/commits?"));
    assert!(target.contains("since=2024-01-01T00%3A00%3A00Z"));
    assert!(target.contains("until=2024-01-08T12%3A00%3A00Z"));
    assert!(target.contains("page=2"));
    assert!(target.contains("per_page=50"));
}

#[tokio::test]
async fn test_error_status_is_reported_with_body() {
    let server =
        FakeGitHub::start(|_| (404, r#"{"message": "Not Found"}"#.to_string())).await;

    let err = server
        .client()
        .list_repositories("missing-org", 1, 100)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    let message = err.to_string();
    assert!(message.contains("/orgs/missing-org/repos"));
    assert!(message.contains("Not Found"));
}

#[tokio::test]
async fn test_malformed_body_is_a_serialization_error() {
    let server = FakeGitHub::start(|_| (200, r#"{"not": "a list"}"#.to_string())).await;

    let err = server
        .client()
        .list_commits("crib-project", "alpha", &CommitQuery::first_page(&window(), 100))
        .await
        .unwrap_err();
    assert!(matches!(err, CgraphError::Serialization(_)));
}

#[tokio::test]
async fn test_aggregation_over_http() {
    init_test_logging();
    let server = FakeGitHub::start(|target| {
        let body = if target.starts_with("/orgs/") {
            if target.contains("page=1&") {
                github_fixtures::repositories_json(&[("alpha", false), ("secret", true)])
            } else {
                github_fixtures::repositories_json(&[])
            }
        } else if target.starts_with("/repos/crib-project/alpha/") && target.contains("&page=1&") {
            github_fixtures::commits_json(&[
                mock_timestamp(2024, 1, 1, 0, 0, 0),
                mock_timestamp(2024, 1, 7, 23, 59, 59),
                mock_timestamp(2024, 1, 8, 0, 0, 0),
            ])
        } else {
            github_fixtures::commits_json(&[])
        };
        (200, body)
    })
    .await;

    let aggregator = WeeklyAggregator::new(
        server.client(),
        Box::new(NoPacing),
        AggregationConfig {
            organization: "crib-project".to_string(),
            window_days: 180,
            page_size: 2,
        },
    );

    let window = window();
    let repositories = aggregator.list_public_repositories().await.unwrap();
    assert_eq!(repositories, vec!["alpha".to_string()]);

    let (counts, failures) = aggregator.aggregate(&window, &repositories).await;
    assert!(failures.is_empty());

    let week = |d| WeekStart::containing(NaiveDate::from_ymd_opt(2024, 1, d).unwrap());
    assert_eq!(counts.get(week(1)), Some(2));
    assert_eq!(counts.get(week(8)), Some(1));

    // Two repository pages, then two commit pages for the only public repository
    let commit_requests = server
        .requests()
        .iter()
        .filter(|head| head.contains("/commits?"))
        .count();
    assert_eq!(commit_requests, 2);
}
