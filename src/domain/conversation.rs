//! Conversation entities and request bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient::{lenient, lenient_seq};
use super::message::Message;

/// Prefix of conversation ids as the server reports them.
pub const CONVERSATION_ID_PREFIX: &str = "layer:///conversations/";

/// A conversation as returned by the Platform API.
///
/// Missing fields decode to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conversation {
    #[serde(deserialize_with = "lenient")]
    pub id: String,
    #[serde(deserialize_with = "lenient")]
    pub url: String,
    #[serde(deserialize_with = "lenient")]
    pub messages_url: String,
    #[serde(deserialize_with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
    pub metadata: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub distinct: bool,
    #[serde(deserialize_with = "lenient")]
    pub last_message: Option<Message>,
    #[serde(deserialize_with = "lenient")]
    pub unread_message_count: u64,
    #[serde(deserialize_with = "lenient_seq")]
    pub participants: Vec<String>,
}

impl Conversation {
    /// The bare conversation id, usable as a path segment.
    pub fn conversation_id(&self) -> &str {
        self.id
            .strip_prefix(CONVERSATION_ID_PREFIX)
            .unwrap_or(&self.id)
    }

    pub fn has_participant(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p == user_id)
    }
}

/// Reference to a conversation embedded in other resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationRef {
    #[serde(deserialize_with = "lenient")]
    pub id: String,
    #[serde(deserialize_with = "lenient")]
    pub url: String,
}

impl ConversationRef {
    pub fn conversation_id(&self) -> &str {
        self.id
            .strip_prefix(CONVERSATION_ID_PREFIX)
            .unwrap_or(&self.id)
    }
}

/// Body for creating a conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateConversationRequest {
    pub participants: Vec<String>,
    pub distinct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl CreateConversationRequest {
    pub fn new<I, S>(participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            participants: participants.into_iter().map(Into::into).collect(),
            distinct: true,
            metadata: None,
        }
    }

    pub fn with_distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
