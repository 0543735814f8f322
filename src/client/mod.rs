//! Layer Platform API client.
//!
//! [`LayerClient`] owns the single request builder every resource operation
//! goes through: it resolves a relative resource path against
//! `{base}/apps/{application_id}/`, attaches the authentication, version and
//! content-type headers, and hands the request to an [`HttpTransport`].
//!
//! Resource operations live in sibling modules as `impl LayerClient` blocks:
//! - `conversations` - create, fetch, edit (participants, metadata), delete
//! - `messages` - send, fetch, delete
//! - `blocks` - per-user block lists, including the bulk PATCH
//! - `announcements` - out-of-conversation messages
//! - `badges` - external unread counts
//!
//! # Example
//!
//! ```ignore
//! let credentials = CredentialContext::new(token, app_id, "1.0", Duration::from_secs(30))?;
//! let client = LayerClient::new(credentials, Arc::new(ReqwestTransport::new()?));
//!
//! let conversation = client
//!     .create_conversation(CreateConversationRequest::new(["alice", "bob"]))
//!     .await?;
//! client.add_participants(conversation.conversation_id(), &["carol"]).await?;
//! ```

mod announcements;
mod badges;
mod blocks;
mod composer;
mod conversations;
mod messages;

pub use composer::BulkComposer;
pub use conversations::Fetched;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{ClientConfig, DecodePolicy, DEFAULT_BASE_URL};
use crate::domain::{CredentialContext, LayerError, PatchDocument, ValidationError};
use crate::ports::{HttpMethod, HttpTransport, OutboundRequest, RawResponse};

/// Path segment between the base URL and the application id.
pub const APPS_PREFIX: &str = "apps";

/// Content type for plain JSON bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type for patch-operation bodies.
pub const CONTENT_TYPE_PATCH: &str = "application/vnd.layer-patch+json";

/// Default bound on waiting for bulk composition.
const DEFAULT_COMPOSE_WAIT: Duration = Duration::from_secs(5);

/// Client for one Layer application.
///
/// Immutable once built; cloning is cheap and clones share the transport.
#[derive(Clone)]
pub struct LayerClient {
    credentials: Arc<CredentialContext>,
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    composer: BulkComposer,
    decode_policy: DecodePolicy,
}

impl LayerClient {
    /// Creates a client against the default Platform API endpoint.
    pub fn new(credentials: CredentialContext, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            credentials: Arc::new(credentials),
            transport,
            base_url: DEFAULT_BASE_URL.to_string(),
            composer: BulkComposer::new(DEFAULT_COMPOSE_WAIT),
            decode_policy: DecodePolicy::default(),
        }
    }

    /// Creates a client from loaded configuration.
    pub fn from_config(
        config: &ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, LayerError> {
        Ok(Self::new(config.credentials()?, transport)
            .with_base_url(&config.base_url)
            .with_bulk_compose_timeout(config.bulk_compose_timeout())
            .with_decode_policy(config.decode_policy))
    }

    /// Overrides the API base URL (staging, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_bulk_compose_timeout(mut self, wait: Duration) -> Self {
        self.composer = BulkComposer::new(wait);
        self
    }

    pub fn with_decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.decode_policy = policy;
        self
    }

    pub fn credentials(&self) -> &CredentialContext {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a relative resource path.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url,
            APPS_PREFIX,
            self.credentials.application_id(),
            path
        )
    }

    /// Builds the outbound request for one call without sending it.
    ///
    /// `path` is relative (no leading `/`, no base or apps prefix) and is not
    /// escaped; callers percent-encode identifiers with reserved characters.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Vec<u8>>,
        conditional_token: Option<&str>,
    ) -> Result<OutboundRequest, LayerError> {
        if path.is_empty() {
            return Err(ValidationError::empty_field("path").into());
        }
        if path.starts_with('/') {
            return Err(ValidationError::AbsolutePath(path.to_string()).into());
        }

        let mut headers = vec![
            ("Authorization".to_string(), self.credentials.bearer()),
            (
                "Accept".to_string(),
                format!(
                    "application/vnd.layer+json; version={}",
                    self.credentials.api_version()
                ),
            ),
        ];

        if body.is_some() || method.carries_body() {
            let content_type = match method {
                HttpMethod::Patch => CONTENT_TYPE_PATCH,
                _ => CONTENT_TYPE_JSON,
            };
            headers.push(("Content-Type".to_string(), content_type.to_string()));
        }

        if let Some(token) = conditional_token {
            headers.push(("If-None-Match".to_string(), token.to_string()));
        }

        Ok(OutboundRequest {
            method,
            url: self.url_for(path),
            headers,
            body,
            timeout: self.credentials.timeout(),
        })
    }

    /// Sends one request and returns the raw response, whatever its status.
    ///
    /// Exactly one round trip; transport failures are returned as-is.
    pub async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Vec<u8>>,
        conditional_token: Option<&str>,
    ) -> Result<RawResponse, LayerError> {
        let request = self.build_request(method, path, body, conditional_token)?;

        tracing::debug!(
            method = %method,
            path = %path,
            body_bytes = request.body.as_ref().map_or(0, Vec::len),
            conditional = conditional_token.is_some(),
            "Sending Layer request"
        );

        let response = self.transport.send(request).await?;

        tracing::debug!(
            method = %method,
            path = %path,
            status = response.status,
            "Layer request completed"
        );

        Ok(response)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Helpers shared by resource operations
    // ════════════════════════════════════════════════════════════════════════════

    /// Sends `body` encoded as JSON.
    pub(crate) async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<RawResponse, LayerError> {
        let body = serde_json::to_vec(body).map_err(LayerError::Serialization)?;
        self.execute(method, path, Some(body), None).await
    }

    /// Sends a patch document as the sole body of a PATCH request.
    pub(crate) async fn send_patch(
        &self,
        path: &str,
        document: &PatchDocument,
    ) -> Result<RawResponse, LayerError> {
        let body = document.to_body().map_err(LayerError::Serialization)?;
        self.execute(HttpMethod::Patch, path, Some(body), None).await
    }

    /// GET `path`, require 200 and decode the body.
    pub(crate) async fn fetch<T: DeserializeOwned + Default>(
        &self,
        path: &str,
    ) -> Result<T, LayerError> {
        let response = self.execute(HttpMethod::Get, path, None, None).await?;
        let response = expect_status(response, &[200])?;
        self.decode(&response.body)
    }

    /// Decodes a response body under the configured policy.
    ///
    /// An empty body always yields the default value. Record fields that are
    /// null or mistyped decode to their defaults under either policy; the
    /// policy only decides what happens when the body is not JSON at all or
    /// its top-level shape is wrong.
    pub(crate) fn decode<T: DeserializeOwned + Default>(&self, body: &[u8]) -> Result<T, LayerError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }

        match serde_json::from_slice(body) {
            Ok(value) => Ok(value),
            Err(e) => match self.decode_policy {
                DecodePolicy::Strict => Err(LayerError::Decode(e)),
                DecodePolicy::Lenient => {
                    tracing::warn!(error = %e, "Ignoring undecodable Layer response body");
                    Ok(T::default())
                }
            },
        }
    }

    pub(crate) fn composer(&self) -> &BulkComposer {
        &self.composer
    }
}

impl std::fmt::Debug for LayerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerClient")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("composer", &self.composer)
            .field("decode_policy", &self.decode_policy)
            .finish_non_exhaustive()
    }
}

/// Passes the response through if its status is one of `accepted`.
pub(crate) fn expect_status(response: RawResponse, accepted: &[u16]) -> Result<RawResponse, LayerError> {
    if accepted.contains(&response.status) {
        return Ok(response);
    }

    let body = String::from_utf8_lossy(&response.body).into_owned();
    tracing::warn!(
        status = response.status,
        expected = ?accepted,
        "Layer responded with unexpected status"
    );
    Err(LayerError::Status {
        status: response.status,
        body,
    })
}

/// Rejects empty identifiers before any I/O.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(())
}
