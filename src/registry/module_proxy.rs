//! Go module proxy client
//!
//! Answers "latest published version" via the module proxy:
//! `GET {proxy}/{module}/@latest` returns `{"Version": "...", "Time": "..."}`.

use crate::error::RegistryError;
use crate::registry::{HttpClient, RegistryClient};
use async_trait::async_trait;
use serde::Deserialize;

/// Default module proxy base URL
const MODULE_PROXY_URL: &str = "https://proxy.golang.org";

/// Go module proxy client
pub struct ModuleProxyClient {
    client: HttpClient,
    base_url: String,
}

/// Latest-version response
#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(rename = "Version")]
    version: String,
}

impl ModuleProxyClient {
    /// Create a client against the default public proxy
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, MODULE_PROXY_URL)
    }

    /// Create a client against a custom proxy base URL (for tests)
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build the `@latest` URL for a module
    fn build_latest_url(&self, module: &str) -> String {
        format!("{}/{}/@latest", self.base_url, Self::escape_module_path(module))
    }

    /// Case-encode a module path for the proxy: uppercase letters become
    /// `!lowercase`
    fn escape_module_path(module: &str) -> String {
        let mut escaped = String::with_capacity(module.len());
        for ch in module.chars() {
            if ch.is_uppercase() {
                escaped.push('!');
                for lower in ch.to_lowercase() {
                    escaped.push(lower);
                }
            } else {
                escaped.push(ch);
            }
        }
        escaped
    }
}

#[async_trait]
impl RegistryClient for ModuleProxyClient {
    fn registry_name(&self) -> &'static str {
        "Go Proxy"
    }

    async fn latest_version(&self, module: &str) -> Result<String, RegistryError> {
        let url = self.build_latest_url(module);
        let latest: LatestResponse = self
            .client
            .get_json(&url, module, self.registry_name())
            .await?;

        if latest.version.is_empty() {
            return Err(RegistryError::invalid_response(
                module,
                self.registry_name(),
                "empty version in @latest response",
            ));
        }

        Ok(latest.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_name() {
        let client = ModuleProxyClient::new(HttpClient::new().unwrap());
        assert_eq!(client.registry_name(), "Go Proxy");
    }

    #[test]
    fn test_escape_module_path_lowercase() {
        assert_eq!(
            ModuleProxyClient::escape_module_path("github.com/acme/widget"),
            "github.com/acme/widget"
        );
    }

    #[test]
    fn test_escape_module_path_uppercase() {
        assert_eq!(
            ModuleProxyClient::escape_module_path("github.com/Azure/azure-sdk-for-go"),
            "github.com/!azure/azure-sdk-for-go"
        );
    }

    #[test]
    fn test_build_latest_url() {
        let client = ModuleProxyClient::new(HttpClient::new().unwrap());
        assert_eq!(
            client.build_latest_url("github.com/acme/widget"),
            "https://proxy.golang.org/github.com/acme/widget/@latest"
        );
    }

    #[test]
    fn test_build_latest_url_custom_base() {
        let client =
            ModuleProxyClient::with_base_url(HttpClient::new().unwrap(), "http://localhost:9999");
        assert_eq!(
            client.build_latest_url("example.com/m"),
            "http://localhost:9999/example.com/m/@latest"
        );
    }

    #[test]
    fn test_latest_response_deserializes() {
        let json = r#"{"Version":"v1.4.2","Time":"2025-02-11T08:00:00Z"}"#;
        let parsed: LatestResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.version, "v1.4.2");
    }
}
