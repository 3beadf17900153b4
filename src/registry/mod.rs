//! Module registry lookups
//!
//! This module provides:
//! - HTTP client shared foundation with bounded timeout
//! - The `RegistryClient` trait answering "latest published version of X"
//! - Go module proxy implementation

mod client;
mod module_proxy;

pub use client::HttpClient;
pub use module_proxy::ModuleProxyClient;

use crate::error::RegistryError;
use async_trait::async_trait;

/// Trait for registry clients
///
/// A lookup is a pure function of the module identifier: no shared mutable
/// state, so callers are free to fan out lookups if they choose.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Get the registry name for error messages and logs
    fn registry_name(&self) -> &'static str;

    /// Fetch the latest published version string for a module
    async fn latest_version(&self, module: &str) -> Result<String, RegistryError>;
}
