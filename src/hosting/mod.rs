//! Hosting service adapters
//!
//! This module provides:
//! - `ReleaseInfo`: tag and publication time of the latest release
//! - `HostingClient` trait for release, change-list and pull-request
//!   operations
//! - GitHub REST implementation

mod github;

pub use github::GitHubClient;

use crate::domain::ChangeRecord;
use crate::error::HostingError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Latest release of a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    /// Release tag, e.g. "v1.2.3"
    pub tag: String,
    /// When the release was published
    pub published_at: DateTime<Utc>,
}

/// Trait for the pull-request hosting service
#[async_trait]
pub trait HostingClient: Send + Sync {
    /// Latest published release of the repository
    async fn latest_release(&self, repo: &str) -> Result<ReleaseInfo, HostingError>;

    /// Commit SHA the given tag points at
    async fn commit_sha_for_tag(&self, repo: &str, tag: &str) -> Result<String, HostingError>;

    /// Changes merged into `base` and closed after `since`
    async fn merged_changes_since(
        &self,
        repo: &str,
        base: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<ChangeRecord>, HostingError>;

    /// Open a pull request and return its number
    async fn create_pull_request(
        &self,
        repo: &str,
        branch: &str,
        base: &str,
    ) -> Result<u64, HostingError>;

    /// Current state of a pull request, e.g. "open"
    async fn pull_request_status(&self, repo: &str, number: u64) -> Result<String, HostingError>;

    /// Cheap reachability probe used by preflight checks
    async fn reachable(&self) -> bool;
}
