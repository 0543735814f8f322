//! Message entities and request bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::conversation::ConversationRef;
use super::lenient::{lenient, lenient_seq};
use super::notification::Notification;

/// Prefix of message ids as the server reports them.
pub const MESSAGE_ID_PREFIX: &str = "layer:///messages/";

/// A message in a conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    #[serde(deserialize_with = "lenient")]
    pub id: String,
    #[serde(deserialize_with = "lenient")]
    pub url: String,
    #[serde(deserialize_with = "lenient")]
    pub position: u64,
    #[serde(deserialize_with = "lenient")]
    pub conversation: ConversationRef,
    #[serde(deserialize_with = "lenient_seq")]
    pub parts: Vec<MessagePart>,
    #[serde(deserialize_with = "lenient")]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient")]
    pub received_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient")]
    pub sender: Sender,
    #[serde(deserialize_with = "lenient")]
    pub is_unread: bool,
    /// Per-recipient delivery state ("sent", "delivered", "read").
    #[serde(deserialize_with = "lenient")]
    pub recipient_status: HashMap<String, String>,
}

impl Message {
    /// The bare message id, usable as a path segment.
    pub fn message_id(&self) -> &str {
        self.id.strip_prefix(MESSAGE_ID_PREFIX).unwrap_or(&self.id)
    }
}

/// One part of a message body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagePart {
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "lenient")]
    pub id: String,
    #[serde(deserialize_with = "lenient")]
    pub mime_type: String,
    #[serde(deserialize_with = "lenient")]
    pub body: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "lenient")]
    pub encoding: String,
}

impl MessagePart {
    pub fn text(body: impl Into<String>) -> Self {
        Self::new("text/plain", body)
    }

    pub fn new(mime_type: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            body: body.into(),
            ..Default::default()
        }
    }
}

/// Sender of a message or announcement.
///
/// Regular messages are sent on behalf of a user id; announcements carry a
/// display name instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sender {
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "lenient")]
    pub user_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "lenient")]
    pub name: String,
}

impl Sender {
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: String::new(),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            user_id: String::new(),
            name: name.into(),
        }
    }
}

/// Body for sending a message into a conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendMessageRequest {
    pub sender: Sender,
    pub parts: Vec<MessagePart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

impl SendMessageRequest {
    pub fn new(sender_id: impl Into<String>, parts: Vec<MessagePart>) -> Self {
        Self {
            sender: Sender::user(sender_id),
            parts,
            notification: None,
        }
    }

    pub fn with_notification(mut self, notification: Notification) -> Self {
        self.notification = Some(notification);
        self
    }
}
