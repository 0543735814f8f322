//! Mock transport for testing.
//!
//! Replays queued responses in order and records every request it receives,
//! so tests can assert on exact URLs, headers and bodies, or that nothing was
//! sent at all.
//!
//! # Example
//!
//! ```ignore
//! let transport = MockTransport::new();
//! transport.push_json(200, &json!([{"user_id": "u2"}]));
//!
//! let client = LayerClient::new(credentials, Arc::new(transport.clone()));
//! let blocked = client.get_block_list("u1").await?;
//!
//! assert_eq!(transport.request_count(), 1);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::TransportError;
use crate::ports::{HttpTransport, OutboundRequest, RawResponse};

/// Recording, scriptable transport.
///
/// Clones share state, so a test can keep one handle and give another to
/// the client.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    /// Responses consumed in order.
    responses: VecDeque<Result<RawResponse, TransportError>>,

    /// Every request received.
    requests: Vec<OutboundRequest>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Queue a response.
    pub fn push_response(&self, response: RawResponse) {
        self.state().responses.push_back(Ok(response));
    }

    /// Queue a bodyless response with the given status.
    pub fn push_status(&self, status: u16) {
        self.push_response(RawResponse::new(status, Vec::new()));
    }

    /// Queue a JSON response.
    pub fn push_json<T: Serialize + ?Sized>(&self, status: u16, body: &T) {
        let body = serde_json::to_vec(body).unwrap_or_default();
        self.push_response(
            RawResponse::new(status, body).with_header("Content-Type", "application/json"),
        );
    }

    /// Queue a transport failure.
    pub fn push_error(&self, error: TransportError) {
        self.state().responses.push_back(Err(error));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Inspection Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// All requests received so far, oldest first.
    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.state().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    pub fn last_request(&self) -> Option<OutboundRequest> {
        self.state().requests.last().cloned()
    }

    /// Responses still queued.
    pub fn pending_responses(&self) -> usize {
        self.state().responses.len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, TransportError> {
        let mut state = self.state();
        state.requests.push(request);
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no mock response queued")))
    }
}
