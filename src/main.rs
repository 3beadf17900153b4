//! relup - Dependency update and release readiness manager CLI
//!
//! Subcommands:
//! - check: print per-dependency status against the registry
//! - update: apply updates (dry-run aware) and automate the release PR
//! - report: write the full dependency/release report

use clap::Parser;
use relup::cli::CliArgs;
use relup::orchestrator::Orchestrator;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<()> {
    if args.verbose {
        eprintln!("relup v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: {}", args.path.display());
    }

    let orchestrator = Orchestrator::new(&args)?;
    orchestrator.run(&args.command).await?;
    Ok(())
}
