//! Update plan building and application
//!
//! This module provides:
//! - `build_plan`: decide per-dependency whether an update is warranted
//! - `UpdatePlan`: the caller-owned result, also the dry-run pending buffer
//! - `DependencyUpdater`: applies the plan via the package tooling

mod apply;

pub use apply::{ApplyOutcome, DependencyUpdater};

use crate::domain::{is_newer, AllowPolicy, UpdateCandidate};
use crate::registry::RegistryClient;
use std::collections::BTreeMap;

/// The update plan for one manifest snapshot
///
/// Holds one candidate per declared dependency, sorted by identifier so
/// every rendering of the plan is deterministic. In dry-run mode this
/// value doubles as the pending-report buffer; there is no hidden
/// process-wide accumulator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePlan {
    /// One entry per declared dependency, ordered by identifier
    pub candidates: Vec<UpdateCandidate>,
}

impl UpdatePlan {
    /// Candidates that will actually be updated
    pub fn updates(&self) -> impl Iterator<Item = &UpdateCandidate> {
        self.candidates.iter().filter(|c| c.will_update)
    }

    /// Candidates eligible under the policy (tracked), regardless of outcome
    pub fn tracked(&self) -> impl Iterator<Item = &UpdateCandidate> {
        self.candidates.iter().filter(|c| c.is_tracked())
    }

    /// Candidates whose registry lookup failed
    pub fn unresolved(&self) -> impl Iterator<Item = &UpdateCandidate> {
        self.candidates.iter().filter(|c| c.is_unresolved())
    }

    /// Number of dependencies with an update available
    pub fn update_count(&self) -> usize {
        self.updates().count()
    }

    /// True if at least one dependency will be updated
    pub fn has_updates(&self) -> bool {
        self.candidates.iter().any(|c| c.will_update)
    }

    /// Total number of declared dependencies in the plan
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// True when the manifest declared no dependencies
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Build the update plan for the declared dependencies.
///
/// Dependencies outside the policy get a row but are never looked up and
/// never proposed. A failed lookup records the dependency as unresolved
/// and processing continues; one registry failure never aborts the batch.
/// An update is proposed only when the registry version is strictly newer
/// under semver precedence; unparseable versions on either side fail safe
/// to "no update".
pub async fn build_plan(
    declared: &BTreeMap<String, String>,
    policy: &AllowPolicy,
    registry: &dyn RegistryClient,
) -> UpdatePlan {
    let mut candidates = Vec::with_capacity(declared.len());

    for (module, current) in declared {
        if !policy.is_allowed(module) {
            candidates.push(UpdateCandidate::not_tracked(module, current));
            continue;
        }

        match registry.latest_version(module).await {
            Ok(latest) => {
                if is_newer(current, &latest) {
                    candidates.push(UpdateCandidate::update_available(module, current, latest));
                } else {
                    candidates.push(UpdateCandidate::up_to_date(module, current, latest));
                }
            }
            Err(e) => {
                candidates.push(UpdateCandidate::unresolved(module, current, e.to_string()));
            }
        }
    }

    UpdatePlan { candidates }
}
