//! Workflow orchestration for the check, update and report subcommands
//!
//! This module wires the collaborators together:
//! - manifest reading (fatal on failure)
//! - plan building against the registry (per-dependency failures continue)
//! - applying updates through the package tooling, gated by dry-run
//! - release lookup, change listing and report generation
//! - branch/commit/push and pull-request automation

use crate::cli::{CheckArgs, CliArgs, Command, ReportArgs, UpdateArgs};
use crate::domain::{classify, next_version_or_placeholder, AllowPolicy, CandidateStatus};
use crate::error::{AppError, VcsError};
use crate::hosting::HostingClient;
use crate::manifest::{read_dependencies, GO_MOD_FILE};
use crate::plan::{build_plan, DependencyUpdater, UpdatePlan};
use crate::progress::Progress;
use crate::registry::{HttpClient, ModuleProxyClient, RegistryClient};
use crate::report::{self, ReportKind, DRY_RUN_REPORT_FILE};
use crate::vcs::{branch_name, CommandRunner, GitRepo, SystemRunner};
use chrono::Utc;
use colored::Colorize;
use std::path::PathBuf;

/// Environment variable holding the hosting-service token
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Orchestrator coordinating one command invocation
pub struct Orchestrator {
    path: PathBuf,
    verbose: bool,
    quiet: bool,
    runner: Box<dyn CommandRunner>,
    registry: Box<dyn RegistryClient>,
    hosting: Box<dyn HostingClient>,
}

impl Orchestrator {
    /// Create an orchestrator with the real collaborators
    pub fn new(args: &CliArgs) -> Result<Self, AppError> {
        let client = HttpClient::new()?;
        let token = std::env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty());
        Ok(Self {
            path: args.path.clone(),
            verbose: args.verbose,
            quiet: args.quiet,
            runner: Box::new(SystemRunner::new()),
            registry: Box::new(ModuleProxyClient::new(client.clone())),
            hosting: Box::new(crate::hosting::GitHubClient::new(client, token)),
        })
    }

    /// Create an orchestrator with injected collaborators (for testing)
    pub fn with_components(
        path: PathBuf,
        runner: Box<dyn CommandRunner>,
        registry: Box<dyn RegistryClient>,
        hosting: Box<dyn HostingClient>,
    ) -> Self {
        Self {
            path,
            verbose: false,
            quiet: true,
            runner,
            registry,
            hosting,
        }
    }

    /// Run the requested subcommand
    pub async fn run(&self, command: &Command) -> Result<(), AppError> {
        match command {
            Command::Check(check) => self.run_check(check).await,
            Command::Update(update) => self.run_update(update).await,
            Command::Report(report) => self.run_report(report).await,
        }
    }

    fn info(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    fn debug(&self, message: &str) {
        if self.verbose {
            eprintln!("{}", message);
        }
    }

    fn git(&self) -> GitRepo<'_> {
        GitRepo::new(self.runner.as_ref(), &self.path)
    }

    async fn build_plan_with_progress(&self, policy: &AllowPolicy) -> Result<UpdatePlan, AppError> {
        let declared = read_dependencies(&self.path)?;

        let mut progress = Progress::new(!self.quiet);
        progress.start(declared.len() as u64, "Checking dependencies");

        // Progress ticks wrap the registry; the plan itself stays a pure
        // function of (declared, policy, lookups).
        let plan = {
            let ticking = TickingRegistry {
                inner: self.registry.as_ref(),
                progress: &progress,
            };
            build_plan(&declared, policy, &ticking).await
        };
        progress.finish();

        for candidate in plan.unresolved() {
            if let CandidateStatus::Unresolved(message) = &candidate.status {
                eprintln!(
                    "{} {}: {}",
                    "warning:".yellow(),
                    candidate.name,
                    message
                );
            }
        }

        Ok(plan)
    }

    /// `relup check`: print per-dependency status
    async fn run_check(&self, args: &CheckArgs) -> Result<(), AppError> {
        let policy = AllowPolicy::from_cli(&args.allow);
        let plan = self.build_plan_with_progress(&policy).await?;

        self.info("Current Dependencies:");
        self.info("=====================");
        for candidate in &plan.candidates {
            let line = match &candidate.status {
                CandidateStatus::UpToDate => format!(
                    "{}: {} ({})",
                    candidate.name,
                    candidate.current,
                    "✅ Up to date".green()
                ),
                CandidateStatus::UpdateAvailable => format!(
                    "{}: {} ({} {} → {})",
                    candidate.name,
                    candidate.current,
                    "🔄 Update available:".yellow(),
                    candidate.current,
                    candidate.latest.as_deref().unwrap_or_default()
                ),
                CandidateStatus::Unresolved(message) => format!(
                    "{}: {} ({} {})",
                    candidate.name,
                    candidate.current,
                    "❌ Error:".red(),
                    message
                ),
                CandidateStatus::NotTracked => {
                    if !self.verbose {
                        continue;
                    }
                    format!(
                        "{}: {} ({})",
                        candidate.name,
                        candidate.current,
                        "not tracked".dimmed()
                    )
                }
            };
            println!("{}", line);
        }
        Ok(())
    }

    /// `relup update`: plan, apply, and report or open a pull request
    async fn run_update(&self, args: &UpdateArgs) -> Result<(), AppError> {
        let git = self.git();
        let repo = git.repo_slug()?;
        self.debug(&format!("Detected repository: {}", repo));

        let (base_remote, base_branch) = self.resolve_base(args, &git)?;
        self.preflight(args.create_pr).await?;

        git.fetch(&base_remote, &base_branch);
        if !git.has_remote_branch(&base_remote, &base_branch) {
            return Err(VcsError::RemoteNotFound {
                remote: format!("{}/{}", base_remote, base_branch),
            }
            .into());
        }

        if args.dry_run {
            self.info("Running in Dry Run mode (No changes will be made)");
        }

        let policy = AllowPolicy::from_cli(&args.allow);
        let plan = self.build_plan_with_progress(&policy).await?;

        let updater = DependencyUpdater::new(self.runner.as_ref(), &self.path, args.dry_run);
        let outcomes = updater.apply(&plan);
        for outcome in &outcomes {
            match &outcome.error {
                None => self.debug(&format!("Updated {} to {}", outcome.module, outcome.version)),
                Some(message) => {
                    eprintln!(
                        "{} failed to update {}: {}",
                        "warning:".yellow(),
                        outcome.module,
                        message
                    );
                }
            }
        }

        let release = self.hosting.latest_release(&repo).await?;
        match self.hosting.commit_sha_for_tag(&repo, &release.tag).await {
            Ok(sha) => self.debug(&format!(
                "Latest release: {} (commit {}) published {}",
                release.tag, sha, release.published_at
            )),
            Err(e) => eprintln!("{} commit lookup failed: {}", "warning:".yellow(), e),
        }

        let changes = match self
            .hosting
            .merged_changes_since(&repo, &base_branch, release.published_at)
            .await
        {
            Ok(changes) => changes,
            Err(e) => {
                eprintln!("{} fetching merged changes failed: {}", "warning:".yellow(), e);
                Vec::new()
            }
        };

        if changes.is_empty() {
            self.info("No merged PRs found since the latest release.");
        } else {
            self.info("Merged PRs since the latest release:");
            for change in &changes {
                self.info(&format!("{}", change));
            }
        }

        if !plan.has_updates() && changes.is_empty() {
            self.info(
                "No dependency updates and no merged changes since last release — no new release needed.",
            );
            return Ok(());
        }

        if args.dry_run {
            let rendered = report::render(
                ReportKind::DryRun,
                &repo,
                &plan,
                &changes,
                &release.tag,
                Utc::now(),
            );
            let output = self.path.join(DRY_RUN_REPORT_FILE);
            report::write_report(&output, &rendered)?;
            self.info(&format!(
                "{} Dry-Run Report generated: {}",
                "✅".green(),
                output.display()
            ));
            return Ok(());
        }

        if plan.has_updates() {
            if let Err(e) = updater.tidy() {
                eprintln!("{} go mod tidy failed: {}", "warning:".yellow(), e);
            }
        }

        if args.create_pr {
            let kind = classify(&changes);
            let next = next_version_or_placeholder(&release.tag, kind);
            let branch = branch_name(args.new_branch.as_deref(), &next);

            git.checkout_branch_from(&branch, &base_remote, &base_branch)?;
            git.add(&[GO_MOD_FILE, "go.sum"])?;
            git.commit(&format!(
                "chore({}): update dependencies to latest versions",
                next
            ))?;
            git.push("origin", &branch)?;

            let number = self
                .hosting
                .create_pull_request(&repo, &branch, &base_branch)
                .await?;
            self.info(&format!("{} PR created: #{}", "✅".green(), number));

            match self.hosting.pull_request_status(&repo, number).await {
                Ok(state) => self.info(&format!("PR status: {}", state)),
                Err(e) => eprintln!("{} PR status lookup failed: {}", "warning:".yellow(), e),
            }
        }

        Ok(())
    }

    /// `relup report`: render the full report to a file
    async fn run_report(&self, args: &ReportArgs) -> Result<(), AppError> {
        let git = self.git();
        let repo = git.repo_slug()?;

        let policy = AllowPolicy::from_cli(&args.allow);
        let plan = self.build_plan_with_progress(&policy).await?;

        let release = self.hosting.latest_release(&repo).await?;
        let changes = match self
            .hosting
            .merged_changes_since(&repo, &self.base_branch_for_report(&git), release.published_at)
            .await
        {
            Ok(changes) => changes,
            Err(e) => {
                eprintln!("{} fetching merged changes failed: {}", "warning:".yellow(), e);
                Vec::new()
            }
        };

        let rendered = report::render(
            ReportKind::Full,
            &repo,
            &plan,
            &changes,
            &release.tag,
            Utc::now(),
        );
        report::write_report(&args.output, &rendered)?;
        self.info(&format!(
            "{} Dependency Report generated: {}",
            "✅".green(),
            args.output.display()
        ));
        Ok(())
    }

    fn base_branch_for_report(&self, git: &GitRepo<'_>) -> String {
        git.default_branch("origin")
            .unwrap_or_else(|| "main".to_string())
    }

    /// Resolve the base remote/branch for the update command.
    ///
    /// A user-specified `--remote` must exist. Otherwise `upstream` is
    /// preferred with its detected default branch, falling back to
    /// `origin` when `upstream` is not configured.
    fn resolve_base(
        &self,
        args: &UpdateArgs,
        git: &GitRepo<'_>,
    ) -> Result<(String, String), AppError> {
        if let Some((remote, branch)) = &args.remote {
            if !git.has_remote(remote)? {
                return Err(VcsError::RemoteNotFound {
                    remote: remote.clone(),
                }
                .into());
            }
            return Ok((remote.clone(), branch.clone()));
        }

        let remote = if git.has_remote("upstream")? {
            "upstream".to_string()
        } else if git.has_remote("origin")? {
            "origin".to_string()
        } else {
            return Err(VcsError::RemoteNotFound {
                remote: "origin".to_string(),
            }
            .into());
        };

        let branch = git
            .default_branch(&remote)
            .unwrap_or_else(|| "main".to_string());
        Ok((remote, branch))
    }

    /// Validate environment and repository state before any changes.
    ///
    /// Issues are collected and reported together rather than one at a
    /// time.
    async fn preflight(&self, require_pr: bool) -> Result<(), AppError> {
        let git = self.git();
        let mut issues = Vec::new();

        if !self.path.join(GO_MOD_FILE).exists() {
            issues.push("missing go.mod in project root".to_string());
        }

        if !git.git_available() {
            issues.push("git not found in PATH".to_string());
        } else {
            match git.working_tree_clean() {
                Ok(true) => {}
                Ok(false) => {
                    issues.push("working tree not clean; commit or stash changes first".to_string())
                }
                Err(e) => issues.push(format!("failed to check git status: {}", e)),
            }

            match git.has_remote("origin") {
                Ok(true) => {}
                Ok(false) => issues.push("git remote 'origin' not configured".to_string()),
                Err(e) => issues.push(format!("failed to list remotes: {}", e)),
            }
        }

        if self
            .runner
            .run(&self.path, "go", &["version"])
            .map(|o| !o.success)
            .unwrap_or(true)
        {
            issues.push("go not found in PATH".to_string());
        }

        if require_pr {
            if std::env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty()).is_none() {
                issues.push(format!(
                    "{} is not set (required for PR creation)",
                    TOKEN_ENV_VAR
                ));
            }
            if !self.hosting.reachable().await {
                issues.push("cannot reach hosting API (network/auth issue)".to_string());
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(VcsError::PreflightFailed { issues }.into())
        }
    }
}

/// Registry wrapper that advances the progress bar per lookup
struct TickingRegistry<'a> {
    inner: &'a dyn RegistryClient,
    progress: &'a Progress,
}

#[async_trait::async_trait]
impl RegistryClient for TickingRegistry<'_> {
    fn registry_name(&self) -> &'static str {
        self.inner.registry_name()
    }

    async fn latest_version(
        &self,
        module: &str,
    ) -> Result<String, crate::error::RegistryError> {
        self.progress.tick(module);
        self.inner.latest_version(module).await
    }
}
