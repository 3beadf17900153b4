//! CLI argument parsing module for relup

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::report::DEFAULT_REPORT_FILE;

/// Parse a base in the form `<remote>/<branch>`
fn parse_base(s: &str) -> Result<(String, String), String> {
    let trimmed = s.trim();
    match trimmed.split_once('/') {
        Some((remote, branch)) if !remote.is_empty() && !branch.is_empty() => {
            Ok((remote.to_string(), branch.to_string()))
        }
        _ => Err("expected <remote>/<branch>".to_string()),
    }
}

/// Dependency update and release readiness manager
#[derive(Parser, Debug, Clone)]
#[command(
    name = "relup",
    version,
    about = "Dependency update and release readiness manager"
)]
pub struct CliArgs {
    /// Project directory containing go.mod (default: current directory)
    #[arg(long, default_value = ".", global = true)]
    pub path: PathBuf,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check current dependency status against the registry
    #[command(visible_alias = "cd")]
    Check(CheckArgs),

    /// Update dependencies to latest versions
    #[command(visible_alias = "ud")]
    Update(UpdateArgs),

    /// Generate a dependency update report
    #[command(visible_alias = "gr")]
    Report(ReportArgs),
}

/// Arguments for `relup check`
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Module eligible for update proposals (repeatable; none means all)
    #[arg(long, action = ArgAction::Append)]
    pub allow: Vec<String>,
}

/// Arguments for `relup update`
#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Run in dry-run mode (no changes will be made)
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Create a pull request with the changes
    #[arg(short = 'p', long)]
    pub create_pr: bool,

    /// Base in form <remote>/<branch> (default: upstream plus its default branch)
    #[arg(long, value_parser = parse_base)]
    pub remote: Option<(String, String)>,

    /// Override the generated branch name (e.g. update-dependencies-1.2.3)
    #[arg(long)]
    pub new_branch: Option<String>,

    /// Module eligible for update proposals (repeatable; none means all)
    #[arg(long, action = ArgAction::Append)]
    pub allow: Vec<String>,
}

/// Arguments for `relup report`
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Output file path for the report
    #[arg(short, long, default_value = DEFAULT_REPORT_FILE)]
    pub output: PathBuf,

    /// Module eligible for update proposals (repeatable; none means all)
    #[arg(long, action = ArgAction::Append)]
    pub allow: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_defaults() {
        let args = CliArgs::parse_from(["relup", "check"]);
        assert_eq!(args.path, PathBuf::from("."));
        assert!(!args.verbose);
        assert!(!args.quiet);
        match args.command {
            Command::Check(check) => assert!(check.allow.is_empty()),
            _ => panic!("expected check subcommand"),
        }
    }

    #[test]
    fn test_check_alias() {
        let args = CliArgs::parse_from(["relup", "cd"]);
        assert!(matches!(args.command, Command::Check(_)));
    }

    #[test]
    fn test_update_flags() {
        let args = CliArgs::parse_from(["relup", "update", "-n", "--create-pr"]);
        match args.command {
            Command::Update(update) => {
                assert!(update.dry_run);
                assert!(update.create_pr);
                assert!(update.remote.is_none());
                assert!(update.new_branch.is_none());
            }
            _ => panic!("expected update subcommand"),
        }
    }

    #[test]
    fn test_update_alias() {
        let args = CliArgs::parse_from(["relup", "ud", "--dry-run"]);
        assert!(matches!(args.command, Command::Update(_)));
    }

    #[test]
    fn test_update_remote_parses() {
        let args = CliArgs::parse_from(["relup", "update", "--remote", "upstream/dev"]);
        match args.command {
            Command::Update(update) => {
                assert_eq!(
                    update.remote,
                    Some(("upstream".to_string(), "dev".to_string()))
                );
            }
            _ => panic!("expected update subcommand"),
        }
    }

    #[test]
    fn test_update_remote_invalid() {
        assert!(CliArgs::try_parse_from(["relup", "update", "--remote", "nodash"]).is_err());
        assert!(CliArgs::try_parse_from(["relup", "update", "--remote", "/branch"]).is_err());
        assert!(CliArgs::try_parse_from(["relup", "update", "--remote", "remote/"]).is_err());
    }

    #[test]
    fn test_update_new_branch() {
        let args = CliArgs::parse_from(["relup", "update", "--new-branch", "deps-refresh"]);
        match args.command {
            Command::Update(update) => {
                assert_eq!(update.new_branch.as_deref(), Some("deps-refresh"));
            }
            _ => panic!("expected update subcommand"),
        }
    }

    #[test]
    fn test_allow_repeatable() {
        let args = CliArgs::parse_from([
            "relup", "update", "--allow", "mod/a", "--allow", "mod/b",
        ]);
        match args.command {
            Command::Update(update) => assert_eq!(update.allow, vec!["mod/a", "mod/b"]),
            _ => panic!("expected update subcommand"),
        }
    }

    #[test]
    fn test_report_default_output() {
        let args = CliArgs::parse_from(["relup", "report"]);
        match args.command {
            Command::Report(report) => {
                assert_eq!(report.output, PathBuf::from("dependency-report.md"));
            }
            _ => panic!("expected report subcommand"),
        }
    }

    #[test]
    fn test_report_custom_output() {
        let args = CliArgs::parse_from(["relup", "report", "-o", "out.md"]);
        match args.command {
            Command::Report(report) => assert_eq!(report.output, PathBuf::from("out.md")),
            _ => panic!("expected report subcommand"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from(["relup", "check", "--path", "/tmp/project", "--quiet"]);
        assert_eq!(args.path, PathBuf::from("/tmp/project"));
        assert!(args.quiet);
    }

    #[test]
    fn test_parse_base_helper() {
        assert_eq!(
            parse_base("origin/main").unwrap(),
            ("origin".to_string(), "main".to_string())
        );
        assert!(parse_base("origin").is_err());
        assert!(parse_base("").is_err());
    }
}
