//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: go.mod reading and parsing failures (fatal for a run)
//! - RegistryError: module registry communication failures (per-dependency)
//! - HostingError: GitHub API failures
//! - VcsError: git command execution failures
//! - ReportError: report rendering/writing failures

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Module registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Hosting service related errors
    #[error(transparent)]
    Hosting(#[from] HostingError),

    /// Version control related errors
    #[error(transparent)]
    Vcs(#[from] VcsError),

    /// Report generation related errors
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Errors related to manifest file operations
///
/// A manifest failure means no meaningful plan can be built, so these
/// abort the whole run.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// go.mod parsing error
    #[error("failed to parse {path}: {message}")]
    ParseError { path: PathBuf, message: String },
}

/// Errors related to module registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Module not found in registry
    #[error("module '{module}' not found in {registry}")]
    ModuleNotFound { module: String, registry: String },

    /// Network request failed
    #[error("failed to fetch '{module}' from {registry}: {message}")]
    NetworkError {
        module: String,
        registry: String,
        message: String,
    },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{module}': {message}")]
    InvalidResponse {
        module: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{module}' from {registry}")]
    Timeout { module: String, registry: String },
}

/// Errors related to the hosting service (GitHub)
#[derive(Error, Debug)]
pub enum HostingError {
    /// Resource not found (release, tag, pull request)
    #[error("{resource} not found for {repo}")]
    NotFound { repo: String, resource: String },

    /// Network request failed
    #[error("request to {repo} failed: {message}")]
    NetworkError { repo: String, message: String },

    /// Unexpected HTTP status
    #[error("unexpected response code {status} from {repo}")]
    UnexpectedStatus { repo: String, status: u16 },

    /// Response body did not match the expected shape
    #[error("invalid response from {repo}: {message}")]
    InvalidResponse { repo: String, message: String },

    /// Authentication token missing or rejected
    #[error("authentication failed for {repo}: {message}")]
    AuthenticationError { repo: String, message: String },
}

/// Errors related to git command execution
#[derive(Error, Debug)]
pub enum VcsError {
    /// Failed to spawn the command at all
    #[error("failed to run '{command}': {message}")]
    SpawnFailed { command: String, message: String },

    /// Command ran but exited non-zero
    #[error("'{command}' failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// Could not determine the repository slug from remotes
    #[error("could not parse repository from remote: {remote_url}")]
    UnparseableRemote { remote_url: String },

    /// Required remote is not configured
    #[error("remote '{remote}' not found; configure it first")]
    RemoteNotFound { remote: String },

    /// Preflight validation found blocking issues
    #[error("preflight checks failed:\n- {}", issues.join("\n- "))]
    PreflightFailed { issues: Vec<String> },
}

/// Errors related to report generation
#[derive(Error, Debug)]
pub enum ReportError {
    /// Failed to write the report file
    #[error("failed to write report {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new ParseError
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new ModuleNotFound error
    pub fn module_not_found(module: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::ModuleNotFound {
            module: module.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        module: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            module: module.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        module: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            module: module.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(module: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            module: module.into(),
            registry: registry.into(),
        }
    }
}

impl HostingError {
    /// Creates a new NotFound error
    pub fn not_found(repo: impl Into<String>, resource: impl Into<String>) -> Self {
        HostingError::NotFound {
            repo: repo.into(),
            resource: resource.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(repo: impl Into<String>, message: impl Into<String>) -> Self {
        HostingError::NetworkError {
            repo: repo.into(),
            message: message.into(),
        }
    }

    /// Creates a new UnexpectedStatus error
    pub fn unexpected_status(repo: impl Into<String>, status: u16) -> Self {
        HostingError::UnexpectedStatus {
            repo: repo.into(),
            status,
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(repo: impl Into<String>, message: impl Into<String>) -> Self {
        HostingError::InvalidResponse {
            repo: repo.into(),
            message: message.into(),
        }
    }
}

impl VcsError {
    /// Creates a new SpawnFailed error
    pub fn spawn_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        VcsError::SpawnFailed {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Creates a new CommandFailed error
    pub fn command_failed(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        VcsError::CommandFailed {
            command: command.into(),
            stderr: stderr.into(),
        }
    }
}
