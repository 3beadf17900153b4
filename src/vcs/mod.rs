//! Version control plumbing behind a command-execution interface
//!
//! This module provides:
//! - `CommandRunner`: the process-spawning seam, so the release logic
//!   never touches `std::process` directly
//! - `SystemRunner`: the real implementation
//! - `RecordingRunner`: a recorded-invocation test double
//! - `GitRepo`: repository slug detection, remote/branch handling and the
//!   branch-commit-push sequence used for pull-request automation

mod git;

pub use git::{branch_name, extract_repo_slug, GitRepo};

use crate::error::VcsError;
use std::path::Path;
use std::process::Command;
use std::sync::Mutex;

/// Captured output of an executed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// True when the command exited zero
    pub success: bool,
    /// Trimmed standard output
    pub stdout: String,
    /// Trimmed standard error
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given stderr
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Trait for running external commands
pub trait CommandRunner: Send + Sync {
    /// Run a command in the given directory and capture its output
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<CommandOutput, VcsError>;

    /// Run a command that must succeed; non-zero exit is an error
    fn run_checked(
        &self,
        dir: &Path,
        program: &str,
        args: &[&str],
    ) -> Result<CommandOutput, VcsError> {
        let output = self.run(dir, program, args)?;
        if !output.success {
            let command = format!("{} {}", program, args.join(" "));
            return Err(VcsError::command_failed(command, output.stderr));
        }
        Ok(output)
    }
}

impl<T: CommandRunner> CommandRunner for std::sync::Arc<T> {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<CommandOutput, VcsError> {
        (**self).run(dir, program, args)
    }
}

/// Command runner that spawns real processes
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<CommandOutput, VcsError> {
        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|e| {
                VcsError::spawn_failed(format!("{} {}", program, args.join(" ")), e.to_string())
            })?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Recorded-invocation test double
///
/// Scripted responses are matched by command prefix; unmatched commands
/// succeed with empty output. Every invocation is recorded for assertions.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<String>>,
    responses: Mutex<Vec<(String, CommandOutput)>>,
}

impl RecordingRunner {
    /// Create a new recording runner
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response for any command starting with `prefix`
    pub fn respond(self, prefix: impl Into<String>, output: CommandOutput) -> Self {
        self.responses
            .lock()
            .expect("responses lock poisoned")
            .push((prefix.into(), output));
        self
    }

    /// Commands executed so far, formatted as "program arg1 arg2 ..."
    pub fn recorded(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, _dir: &Path, program: &str, args: &[&str]) -> Result<CommandOutput, VcsError> {
        let command = format!("{} {}", program, args.join(" "));
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(command.clone());

        let responses = self.responses.lock().expect("responses lock poisoned");
        for (prefix, output) in responses.iter() {
            if command.starts_with(prefix.as_str()) {
                return Ok(output.clone());
            }
        }
        Ok(CommandOutput::ok(""))
    }
}
