//! HTTP client shared foundation
//!
//! A thin wrapper over reqwest with a bounded timeout and a stable
//! User-Agent. Transient-failure retries are deliberately not handled
//! here; the one call that needs them (commit-SHA lookup) applies its own
//! bounded policy.

use crate::error::RegistryError;
use reqwest::Client;
use std::time::Duration;

/// Default timeout for HTTP requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("relup/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper shared by the registry and hosting adapters
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| RegistryError::NetworkError {
                module: String::new(),
                registry: "HTTP client".to_string(),
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Perform a GET request, mapping timeouts, 404s and non-success
    /// statuses into registry errors
    pub async fn get(
        &self,
        url: &str,
        module: &str,
        registry: &str,
    ) -> Result<reqwest::Response, RegistryError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                RegistryError::timeout(module, registry)
            } else {
                RegistryError::network_error(module, registry, e.to_string())
            }
        })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::module_not_found(module, registry));
        }
        if !response.status().is_success() {
            return Err(RegistryError::network_error(
                module,
                registry,
                format!("HTTP {}", response.status()),
            ));
        }

        Ok(response)
    }

    /// Perform a GET request and parse the JSON response
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        module: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        let response = self.get(url, module, registry).await?;
        response.json::<T>().await.map_err(|e| {
            RegistryError::invalid_response(module, registry, format!("failed to parse JSON: {}", e))
        })
    }
}
