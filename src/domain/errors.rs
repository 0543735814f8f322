//! Error types for client operations.
//!
//! Every failure is terminal for the call that produced it. Nothing in the
//! crate retries; callers branch on the variant (and on the status code for
//! [`LayerError::Status`]) and decide for themselves.

use thiserror::Error;

/// Errors detected locally, before any network I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: &'static str },

    #[error("At least one {field} is required")]
    EmptyList { field: &'static str },

    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("Resource path must be relative, got '{0}'")]
    AbsolutePath(String),

    #[error("'{operation}' patch operation requires a value")]
    MissingPatchValue { operation: &'static str },

    #[error("'delete' patch operation takes no value")]
    UnexpectedPatchValue,
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: &'static str) -> Self {
        ValidationError::EmptyField { field }
    }

    /// Creates an empty list validation error.
    pub fn empty_list(field: &'static str) -> Self {
        ValidationError::EmptyList { field }
    }
}

/// Failure reported by the transport: connection, timeout or TLS.
///
/// Carried as-is from the underlying HTTP layer; not classified further.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failure: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors returned by [`LayerClient`](crate::client::LayerClient) operations.
#[derive(Debug, Error)]
pub enum LayerError {
    /// A required input was missing or malformed.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The outgoing body could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The network exchange itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a status the operation does not accept.
    #[error("responded with error code {status}")]
    Status { status: u16, body: String },

    /// The response body was not valid JSON (strict decoding only).
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// A bulk composition unit stalled, panicked or was cancelled.
    #[error("bulk composition failed: {0}")]
    Compose(String),
}

impl LayerError {
    /// Returns the HTTP status for protocol errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            LayerError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }

    /// True when the call failed before anything was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            LayerError::Validation(_) | LayerError::Serialization(_)
        )
    }
}
