//! GitHub REST client implementing [`CommitSource`].

use crate::source::{CommitQuery, CommitRecord, CommitSource, Repository};
use async_trait::async_trait;
use cgraph_common::{format_timestamp, truncate_string, CgraphError, Result};
use cgraph_config::GitHubConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

/// GitHub rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("cgraph/", env!("CARGO_PKG_VERSION"));

/// Longest slice of an error body kept in error messages.
const MAX_ERROR_BODY: usize = 200;

/// Authenticated GitHub API client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    /// Create a new client from the GitHub section of the configuration.
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let base_url = Url::parse(&config.api_url).map_err(|e| {
            CgraphError::config_with_source(format!("Invalid API URL '{}'", config.api_url), e)
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CgraphError::config(format!(
                "API URL '{}' cannot be used as a base",
                config.api_url
            )));
        }

        let mut auth = HeaderValue::from_str(&format!("token {}", config.token)).map_err(|e| {
            CgraphError::config_with_source("GitHub token contains invalid header characters", e)
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()
            .map_err(|e| CgraphError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self { client, base_url })
    }

    /// Base URL with `segments` appended, each percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CgraphError::config("API URL cannot be used as a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `url` with `query`, decoding a JSON body on success.
    #[instrument(skip(self, query), fields(path = %url.path()))]
    async fn get_json<T>(&self, url: Url, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.client.get(url.clone()).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("GitHub returned {} for {}", status, url.path());
            return Err(CgraphError::github_with_status(
                format!(
                    "{} returned {}: {}",
                    url.path(),
                    status,
                    truncate_string(body.trim(), MAX_ERROR_BODY)
                ),
                status.as_u16(),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| CgraphError::network_with_source("Failed to read response body", e))?;
        debug!("Received {} bytes from {}", text.len(), url.path());

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl CommitSource for GitHubClient {
    async fn list_repositories(
        &self,
        organization: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>> {
        let url = self.endpoint(&["orgs", organization, "repos"])?;
        let query = [("page", page.to_string()), ("per_page", per_page.to_string())];
        self.get_json(url, &query).await
    }

    async fn list_commits(
        &self,
        organization: &str,
        repository: &str,
        query: &CommitQuery,
    ) -> Result<Vec<CommitRecord>> {
        let url = self.endpoint(&["repos", organization, repository, "commits"])?;
        let params = [
            ("since", format_timestamp(query.since)),
            ("until", format_timestamp(query.until)),
            ("page", query.page.to_string()),
            ("per_page", query.per_page.to_string()),
        ];
        self.get_json(url, &params).await
    }
}
