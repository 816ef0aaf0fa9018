//! Directus client configuration
//!
//! Connection settings for one Directus instance.

use serde::{Deserialize, Serialize};

use crate::error::{DirectusError, DirectusResult};

/// Placeholder shown instead of the access token in debug output.
const REDACTED: &str = "[REDACTED]";

/// Connection settings for a Directus instance.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectusConfig {
    /// Base URL of the instance (e.g., "https://cms.example.com").
    pub url: String,

    /// Static access token sent as a bearer token.
    pub token: String,

    /// Request timeout. The transport default applies when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl DirectusConfig {
    /// Create a new config with the required fields.
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            timeout_secs: None,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Build the full URL for an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> DirectusResult<()> {
        if self.url.trim().is_empty() {
            return Err(DirectusError::InvalidConfiguration(
                "url is required".to_string(),
            ));
        }

        let url = url::Url::parse(&self.url).map_err(|e| {
            DirectusError::InvalidConfiguration(format!("invalid url '{}': {}", self.url, e))
        })?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(DirectusError::InvalidConfiguration(format!(
                    "unsupported scheme '{}' in url '{}'",
                    scheme, self.url
                )));
            }
        }

        if url.host_str().is_none() {
            return Err(DirectusError::InvalidConfiguration(format!(
                "url '{}' has no host",
                self.url
            )));
        }

        if self.token.trim().is_empty() {
            return Err(DirectusError::InvalidConfiguration(format!(
                "token is required for {}",
                self.url
            )));
        }

        if self.timeout_secs == Some(0) {
            return Err(DirectusError::InvalidConfiguration(
                "timeoutSecs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for DirectusConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectusConfig")
            .field("url", &self.url)
            .field("token", &REDACTED)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
