//! Platform API client configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::CredentialContext;

/// Default Platform API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.layer.com";

/// Client configuration (credentials, endpoint, timeouts)
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Platform API bearer token
    pub token: String,

    /// Application identifier
    pub app_id: String,

    /// API version sent in the Accept header
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound on waiting for bulk composition units, in milliseconds
    #[serde(default = "default_compose_timeout")]
    pub bulk_compose_timeout_ms: u64,

    /// How to treat response bodies that are not valid JSON
    #[serde(default)]
    pub decode_policy: DecodePolicy,
}

/// Response decoding policy.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Malformed bodies are logged and decode to the default value.
    #[default]
    Lenient,
    /// Malformed bodies fail the call.
    Strict,
}

impl ClientConfig {
    /// Create a configuration with defaults for everything but the credentials
    pub fn new(token: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            app_id: app_id.into(),
            api_version: default_api_version(),
            timeout_secs: default_timeout(),
            base_url: default_base_url(),
            bulk_compose_timeout_ms: default_compose_timeout(),
            decode_policy: DecodePolicy::default(),
        }
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the bulk compose bound as Duration
    pub fn bulk_compose_timeout(&self) -> Duration {
        Duration::from_millis(self.bulk_compose_timeout_ms)
    }

    /// Build the credential context for a client
    pub fn credentials(&self) -> Result<CredentialContext, crate::domain::ValidationError> {
        CredentialContext::new(
            self.token.clone(),
            self.app_id.clone(),
            self.api_version.clone(),
            self.timeout(),
        )
    }

    /// Validate client configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token.is_empty() {
            return Err(ValidationError::MissingRequired("TOKEN"));
        }
        if self.app_id.is_empty() {
            return Err(ValidationError::MissingRequired("APP_ID"));
        }
        if self.api_version.is_empty() {
            return Err(ValidationError::MissingRequired("API_VERSION"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.bulk_compose_timeout_ms == 0 {
            return Err(ValidationError::InvalidComposeTimeout);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        Ok(())
    }
}

fn default_api_version() -> String {
    "1.0".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_compose_timeout() -> u64 {
    5_000
}
