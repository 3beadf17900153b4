//! Applying an update plan through the package tooling
//!
//! The plan builder never mutates the manifest; applying means running
//! `go get module@version` per candidate. In dry-run mode nothing is
//! executed and the plan itself serves as the pending-report buffer.

use crate::domain::UpdateCandidate;
use crate::error::VcsError;
use crate::plan::UpdatePlan;
use crate::vcs::CommandRunner;
use std::path::{Path, PathBuf};

/// Outcome of applying one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Module identifier
    pub module: String,
    /// Version the module was moved to
    pub version: String,
    /// Error text when the tooling failed; None on success or dry-run
    pub error: Option<String>,
}

impl ApplyOutcome {
    /// True when the candidate was applied without error
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Applies update candidates via `go get`
pub struct DependencyUpdater<'a> {
    runner: &'a dyn CommandRunner,
    dir: PathBuf,
    dry_run: bool,
}

impl<'a> DependencyUpdater<'a> {
    /// Create an updater bound to a working directory
    pub fn new(runner: &'a dyn CommandRunner, dir: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            runner,
            dir: dir.into(),
            dry_run,
        }
    }

    /// Working directory used for tooling commands
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Apply every will-update candidate in the plan.
    ///
    /// One failed `go get` is recorded in its outcome and does not stop
    /// the remaining candidates. Dry-run applies nothing and returns an
    /// empty outcome list; the caller renders the plan instead.
    pub fn apply(&self, plan: &UpdatePlan) -> Vec<ApplyOutcome> {
        if self.dry_run {
            return Vec::new();
        }

        plan.updates().map(|c| self.apply_one(c)).collect()
    }

    fn apply_one(&self, candidate: &UpdateCandidate) -> ApplyOutcome {
        // Plans only mark will_update when a latest version exists
        let version = candidate.latest.clone().unwrap_or_default();
        let spec = format!("{}@{}", candidate.name, go_version(&version));

        let error = match self.runner.run_checked(&self.dir, "go", &["get", &spec]) {
            Ok(_) => None,
            Err(e) => Some(e.to_string()),
        };

        ApplyOutcome {
            module: candidate.name.clone(),
            version,
            error,
        }
    }

    /// Run `go mod tidy` after updates so go.sum stays consistent
    pub fn tidy(&self) -> Result<(), VcsError> {
        if self.dry_run {
            return Ok(());
        }
        self.runner.run_checked(&self.dir, "go", &["mod", "tidy"])?;
        Ok(())
    }
}

/// Go module versions carry a leading `v`
fn go_version(version: &str) -> String {
    if version.starts_with('v') {
        version.to_string()
    } else {
        format!("v{}", version)
    }
}
