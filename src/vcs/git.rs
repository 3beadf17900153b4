//! Git repository operations built on the command-runner seam

use crate::error::VcsError;
use crate::vcs::{CommandOutput, CommandRunner};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

// Last two path segments before an optional .git suffix. Handles:
//   https://github.com/owner/repo.git
//   ssh://git@github.com/owner/repo
//   git@github.com:owner/repo.git
static REPO_SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[:/]([^/]+/[^/]+?)(?:\.git)?$").unwrap());

/// Normalize a remote URL (HTTPS/SSH) to "owner/repo".
pub fn extract_repo_slug(remote_url: &str) -> Result<String, VcsError> {
    REPO_SLUG_RE
        .captures(remote_url.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| VcsError::UnparseableRemote {
            remote_url: remote_url.to_string(),
        })
}

/// Default branch name for an update pull request
pub fn branch_name(override_name: Option<&str>, next_version: &str) -> String {
    match override_name {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => format!("update-dependencies-{}", next_version),
    }
}

/// Git repository handle bound to a working directory and a runner
pub struct GitRepo<'a> {
    runner: &'a dyn CommandRunner,
    dir: PathBuf,
}

impl<'a> GitRepo<'a> {
    /// Create a repository handle
    pub fn new(runner: &'a dyn CommandRunner, dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            dir: dir.into(),
        }
    }

    /// Working directory of this repository
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn git(&self, args: &[&str]) -> Result<CommandOutput, VcsError> {
        self.runner.run(&self.dir, "git", args)
    }

    fn git_checked(&self, args: &[&str]) -> Result<CommandOutput, VcsError> {
        self.runner.run_checked(&self.dir, "git", args)
    }

    /// Repository slug from git remotes, preferring `upstream` and
    /// falling back to `origin`.
    pub fn repo_slug(&self) -> Result<String, VcsError> {
        let upstream = self.git(&["remote", "get-url", "upstream"])?;
        if upstream.success && !upstream.stdout.is_empty() {
            return extract_repo_slug(&upstream.stdout);
        }

        let origin = self.git_checked(&["remote", "get-url", "origin"])?;
        extract_repo_slug(&origin.stdout)
    }

    /// Names of the configured remotes
    pub fn remotes(&self) -> Result<Vec<String>, VcsError> {
        let output = self.git_checked(&["remote"])?;
        Ok(output
            .stdout
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect())
    }

    /// True when the named remote is configured
    pub fn has_remote(&self, remote: &str) -> Result<bool, VcsError> {
        Ok(self.remotes()?.iter().any(|r| r == remote))
    }

    /// Default branch of a remote, e.g. "main"
    ///
    /// Tries the remote HEAD symbolic ref first, then parses
    /// `git remote show`.
    pub fn default_branch(&self, remote: &str) -> Option<String> {
        let head_ref = format!("refs/remotes/{}/HEAD", remote);
        if let Ok(output) = self.git(&["symbolic-ref", "--quiet", "--short", &head_ref]) {
            if output.success {
                if let Some((_, branch)) = output.stdout.split_once('/') {
                    if !branch.is_empty() {
                        return Some(branch.to_string());
                    }
                }
            }
        }

        let show = self.git(&["remote", "show", remote]).ok()?;
        for line in show.stdout.lines() {
            let line = line.trim();
            if let Some(rest) = line.strip_prefix("HEAD branch:") {
                let name = rest.trim();
                if !name.is_empty() {
                    return Some(name.to_string());
                }
            }
        }
        None
    }

    /// Fetch a branch from a remote (best effort)
    pub fn fetch(&self, remote: &str, branch: &str) {
        let _ = self.git(&["fetch", remote, branch]);
    }

    /// True when `refs/remotes/{remote}/{branch}` resolves
    pub fn has_remote_branch(&self, remote: &str, branch: &str) -> bool {
        let refname = format!("refs/remotes/{}/{}", remote, branch);
        self.git(&["rev-parse", "--verify", &refname])
            .map(|o| o.success)
            .unwrap_or(false)
    }

    /// True when `git status --porcelain` reports nothing
    pub fn working_tree_clean(&self) -> Result<bool, VcsError> {
        let output = self.git_checked(&["status", "--porcelain"])?;
        Ok(output.stdout.is_empty())
    }

    /// Create (or reset) a local branch from a remote base
    pub fn checkout_branch_from(
        &self,
        branch: &str,
        remote: &str,
        base: &str,
    ) -> Result<(), VcsError> {
        let start_point = format!("{}/{}", remote, base);
        self.git_checked(&["checkout", "-B", branch, &start_point])?;
        Ok(())
    }

    /// Stage the given paths
    pub fn add(&self, paths: &[&str]) -> Result<(), VcsError> {
        let mut args = vec!["add"];
        args.extend_from_slice(paths);
        self.git_checked(&args)?;
        Ok(())
    }

    /// Commit staged changes with a message
    pub fn commit(&self, message: &str) -> Result<(), VcsError> {
        self.git_checked(&["commit", "-m", message])?;
        Ok(())
    }

    /// Push a branch to a remote with lease protection
    pub fn push(&self, remote: &str, branch: &str) -> Result<(), VcsError> {
        self.git_checked(&["push", remote, branch, "--force-with-lease"])?;
        Ok(())
    }

    /// True when git itself is runnable
    pub fn git_available(&self) -> bool {
        self.git(&["--version"]).map(|o| o.success).unwrap_or(false)
    }
}
