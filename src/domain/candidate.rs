//! Per-dependency update decision types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a dependency after plan building
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    /// Declared version is at or ahead of the registry version
    UpToDate,
    /// A newer version is available in the registry
    UpdateAvailable,
    /// Registry lookup failed; the row stays in the report
    Unresolved(String),
    /// Outside the allow policy; present but never proposed
    NotTracked,
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateStatus::UpToDate => write!(f, "up to date"),
            CandidateStatus::UpdateAvailable => write!(f, "update available"),
            CandidateStatus::Unresolved(msg) => write!(f, "error: {}", msg),
            CandidateStatus::NotTracked => write!(f, "not tracked"),
        }
    }
}

/// One dependency's update decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCandidate {
    /// Module identifier
    pub name: String,
    /// Version declared in the manifest
    pub current: String,
    /// Latest registry version, when the lookup succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<String>,
    /// Decision status
    pub status: CandidateStatus,
    /// True iff the dependency is allowed and the latest version is newer
    pub will_update: bool,
}

impl UpdateCandidate {
    /// Candidate with a newer version available
    pub fn update_available(
        name: impl Into<String>,
        current: impl Into<String>,
        latest: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            current: current.into(),
            latest: Some(latest.into()),
            status: CandidateStatus::UpdateAvailable,
            will_update: true,
        }
    }

    /// Candidate already at (or ahead of) the registry version
    pub fn up_to_date(
        name: impl Into<String>,
        current: impl Into<String>,
        latest: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            current: current.into(),
            latest: Some(latest.into()),
            status: CandidateStatus::UpToDate,
            will_update: false,
        }
    }

    /// Candidate whose registry lookup failed
    pub fn unresolved(
        name: impl Into<String>,
        current: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            current: current.into(),
            latest: None,
            status: CandidateStatus::Unresolved(message.into()),
            will_update: false,
        }
    }

    /// Candidate outside the allow policy
    pub fn not_tracked(name: impl Into<String>, current: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current: current.into(),
            latest: None,
            status: CandidateStatus::NotTracked,
            will_update: false,
        }
    }

    /// Returns true if the registry lookup failed
    pub fn is_unresolved(&self) -> bool {
        matches!(self.status, CandidateStatus::Unresolved(_))
    }

    /// Returns true if this dependency was eligible under the policy
    pub fn is_tracked(&self) -> bool {
        !matches!(self.status, CandidateStatus::NotTracked)
    }
}

impl fmt::Display for UpdateCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.latest {
            Some(latest) if self.will_update => {
                write!(f, "{}: {} → {}", self.name, self.current, latest)
            }
            _ => write!(f, "{}: {} ({})", self.name, self.current, self.status),
        }
    }
}
