use crate::prelude::*;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Portal configuration from environment variables
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub api_url: String,
    pub auth_url: String,
}

impl PortalConfig {
    /// Load configuration from environment variables
    ///
    /// Uses N360_API_URL with a localhost default, and N360_AUTH_URL
    /// with a `{api_url}/auth` fallback.
    pub fn from_env() -> Result<Self> {
        let api_url =
            std::env::var("N360_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let auth_url = std::env::var("N360_AUTH_URL")
            .unwrap_or_else(|_| format!("{}/auth", api_url.trim_end_matches('/')));

        Ok(Self { api_url, auth_url })
    }

    /// Apply CLI overrides to the configuration
    pub fn with_overrides(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.auth_url = format!("{}/auth", url.trim_end_matches('/'));
            self.api_url = url;
        }
        self
    }

    /// Base URL without a trailing slash, ready for path concatenation
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

/// Resolve the effective configuration for a command invocation
pub fn resolve(global: &crate::Global) -> Result<PortalConfig> {
    Ok(PortalConfig::from_env()?.with_overrides(global.api_url.clone()))
}
