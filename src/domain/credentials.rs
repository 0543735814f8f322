//! Credential context shared by every request.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use super::errors::ValidationError;

/// Immutable authentication and addressing data for one application.
///
/// Built once and shared read-only by all calls; nothing mutates it after
/// construction, so clones can be handed to any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct CredentialContext {
    token: SecretString,
    application_id: String,
    api_version: String,
    timeout: Duration,
}

impl CredentialContext {
    /// Creates a credential context.
    ///
    /// The token and application id must be non-empty.
    pub fn new(
        token: impl Into<String>,
        application_id: impl Into<String>,
        api_version: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ValidationError> {
        let token = token.into();
        let application_id = application_id.into();
        let api_version = api_version.into();

        if token.is_empty() {
            return Err(ValidationError::empty_field("token"));
        }
        if application_id.is_empty() {
            return Err(ValidationError::empty_field("application_id"));
        }
        if api_version.is_empty() {
            return Err(ValidationError::empty_field("api_version"));
        }

        Ok(Self {
            token: SecretString::new(token),
            application_id,
            api_version,
            timeout,
        })
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `Authorization` header value.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }
}
