//! GitHub REST adapter
//!
//! Endpoints used:
//! - `GET  /repos/{repo}/releases/latest`
//! - `GET  /repos/{repo}/git/refs/tags/{tag}` (bounded retry; tag refs can
//!   lag behind release publication)
//! - `GET  /repos/{repo}/pulls?state=closed&base={base}`
//! - `POST /repos/{repo}/pulls`
//! - `GET  /repos/{repo}/pulls/{number}`

use crate::domain::ChangeRecord;
use crate::error::HostingError;
use crate::hosting::{HostingClient, ReleaseInfo};
use crate::registry::HttpClient;
use crate::retry::RetryPolicy;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

/// Default GitHub API base URL
const GITHUB_API_URL: &str = "https://api.github.com";

/// GitHub REST client
pub struct GitHubClient {
    client: HttpClient,
    base_url: String,
    token: Option<String>,
    retry: RetryPolicy,
}

#[derive(Debug, Deserialize)]
struct ReleaseResponse {
    tag_name: String,
    published_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct TagRefResponse {
    object: TagRefObject,
}

#[derive(Debug, Deserialize)]
struct TagRefObject {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct PullResponse {
    number: u64,
    title: String,
    user: PullUser,
    #[serde(default)]
    labels: Vec<PullLabel>,
    closed_at: Option<DateTime<Utc>>,
    merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct PullUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct PullLabel {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CreatedPullResponse {
    number: u64,
}

#[derive(Debug, Deserialize)]
struct PullStateResponse {
    state: String,
}

impl GitHubClient {
    /// Create a client against the public GitHub API
    pub fn new(client: HttpClient, token: Option<String>) -> Self {
        Self::with_base_url(client, GITHUB_API_URL, token)
    }

    /// Create a client against a custom API base URL (for tests)
    pub fn with_base_url(
        client: HttpClient,
        base_url: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token,
            retry: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy (for deterministic tests)
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn repos_url(&self, repo: &str, rest: &str) -> String {
        format!("{}/repos/{}/{}", self.base_url, repo, rest)
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .inner()
            .request(method, url)
            .header("Accept", "application/vnd.github.v3+json");
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("token {}", token));
        }
        builder
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        repo: &str,
        url: &str,
        resource: &str,
    ) -> Result<T, HostingError> {
        let response = self
            .request(reqwest::Method::GET, url)
            .send()
            .await
            .map_err(|e| HostingError::network_error(repo, e.to_string()))?;

        match response.status() {
            reqwest::StatusCode::NOT_FOUND => Err(HostingError::not_found(repo, resource)),
            status if !status.is_success() => {
                Err(HostingError::unexpected_status(repo, status.as_u16()))
            }
            _ => response
                .json::<T>()
                .await
                .map_err(|e| HostingError::invalid_response(repo, e.to_string())),
        }
    }
}

#[async_trait]
impl HostingClient for GitHubClient {
    async fn latest_release(&self, repo: &str) -> Result<ReleaseInfo, HostingError> {
        let url = self.repos_url(repo, "releases/latest");
        let release: ReleaseResponse = self.get_json(repo, &url, "latest release").await?;
        Ok(ReleaseInfo {
            tag: release.tag_name,
            published_at: release.published_at,
        })
    }

    async fn commit_sha_for_tag(&self, repo: &str, tag: &str) -> Result<String, HostingError> {
        let url = self.repos_url(repo, &format!("git/refs/tags/{}", tag));

        let tag_ref: TagRefResponse = self
            .retry
            .run(
                || self.get_json(repo, &url, "tag ref"),
                // A missing tag is worth retrying (refs lag); auth failures
                // and malformed bodies are permanent.
                |e: &HostingError| {
                    matches!(
                        e,
                        HostingError::NotFound { .. }
                            | HostingError::NetworkError { .. }
                            | HostingError::UnexpectedStatus { .. }
                    )
                },
            )
            .await?;

        if tag_ref.object.sha.is_empty() {
            return Err(HostingError::invalid_response(repo, "sha is empty"));
        }
        Ok(tag_ref.object.sha)
    }

    async fn merged_changes_since(
        &self,
        repo: &str,
        base: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<ChangeRecord>, HostingError> {
        let url = self.repos_url(repo, &format!("pulls?state=closed&base={}", base));
        let pulls: Vec<PullResponse> = self.get_json(repo, &url, "closed pull requests").await?;

        let mut changes = Vec::new();
        for pull in pulls {
            let closed_after = pull.closed_at.map(|t| t > since).unwrap_or(false);
            if !closed_after {
                continue;
            }
            // Closed-but-unmerged pull requests never count toward a release
            let Some(merged_at) = pull.merged_at else {
                continue;
            };
            changes.push(ChangeRecord::merged(
                pull.number,
                pull.title,
                pull.user.login,
                pull.labels.into_iter().map(|l| l.name).collect(),
                merged_at,
            ));
        }

        Ok(changes)
    }

    async fn create_pull_request(
        &self,
        repo: &str,
        branch: &str,
        base: &str,
    ) -> Result<u64, HostingError> {
        if self.token.is_none() {
            return Err(HostingError::AuthenticationError {
                repo: repo.to_string(),
                message: "no token configured".to_string(),
            });
        }

        let url = self.repos_url(repo, "pulls");
        let body = json!({
            "title": "Update dependencies",
            "head": branch,
            "base": base,
            "body": "This PR updates dependencies to the latest versions.",
        });

        let response = self
            .request(reqwest::Method::POST, &url)
            .json(&body)
            .send()
            .await
            .map_err(|e| HostingError::network_error(repo, e.to_string()))?;

        if !response.status().is_success() {
            return Err(HostingError::unexpected_status(
                repo,
                response.status().as_u16(),
            ));
        }

        let created: CreatedPullResponse = response
            .json()
            .await
            .map_err(|e| HostingError::invalid_response(repo, e.to_string()))?;
        Ok(created.number)
    }

    async fn pull_request_status(&self, repo: &str, number: u64) -> Result<String, HostingError> {
        let url = self.repos_url(repo, &format!("pulls/{}", number));
        let pull: PullStateResponse = self.get_json(repo, &url, "pull request").await?;
        Ok(pull.state)
    }

    async fn reachable(&self) -> bool {
        let url = format!("{}/rate_limit", self.base_url);
        match self.request(reqwest::Method::GET, &url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
