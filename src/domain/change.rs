//! Merged change records from the hosting service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One externally merged change (pull request) since the last release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Pull request number
    pub number: u64,
    /// Pull request title
    pub title: String,
    /// Login of the author
    pub author: String,
    /// Labels in the order the hosting service returned them
    pub labels: Vec<String>,
    /// When the change was merged; absent means closed without merging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<DateTime<Utc>>,
}

impl ChangeRecord {
    /// Creates a merged change record
    pub fn merged(
        number: u64,
        title: impl Into<String>,
        author: impl Into<String>,
        labels: Vec<String>,
        merged_at: DateTime<Utc>,
    ) -> Self {
        Self {
            number,
            title: title.into(),
            author: author.into(),
            labels,
            merged_at: Some(merged_at),
        }
    }

    /// Creates a record for a change that was closed without merging
    pub fn unmerged(number: u64, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            author: author.into(),
            labels: Vec::new(),
            merged_at: None,
        }
    }

    /// Returns true if this change counts toward a release
    pub fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }

    /// Returns true if the title or any label names a feature
    ///
    /// The match is against the literal, case-sensitive substrings
    /// "new feature" and "feature request".
    pub fn mentions_feature(&self) -> bool {
        const MARKERS: [&str; 2] = ["new feature", "feature request"];
        MARKERS.iter().any(|m| {
            self.title.contains(m) || self.labels.iter().any(|label| label.contains(m))
        })
    }

    /// Comma-joined labels, empty string when there are none
    pub fn joined_labels(&self) -> String {
        self.labels.join(", ")
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let merged = self
            .merged_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "not merged".to_string());
        write!(
            f,
            "PR #{}, {}, {}, {}, {}",
            self.number,
            self.title,
            self.author,
            self.joined_labels(),
            merged
        )
    }
}
