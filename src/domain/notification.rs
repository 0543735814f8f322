//! Push notification payloads and badge counts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::lenient::lenient;

/// Push notification attached to a message or announcement.
///
/// `recipients` overrides the payload for individual users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notification {
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "lenient")]
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "lenient")]
    pub sound: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    #[serde(deserialize_with = "lenient")]
    pub recipients: HashMap<String, Notification>,
}

impl Notification {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = sound.into();
        self
    }

    /// Per-user override of this notification.
    pub fn with_recipient(mut self, user_id: impl Into<String>, notification: Notification) -> Self {
        self.recipients.insert(user_id.into(), notification);
        self
    }
}

/// Unread counts for a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Badge {
    /// Count maintained by the application server.
    #[serde(deserialize_with = "lenient")]
    pub external_unread_count: u64,
    #[serde(deserialize_with = "lenient")]
    pub unread_conversation_count: u64,
    #[serde(deserialize_with = "lenient")]
    pub unread_message_count: u64,
}

/// Body for setting a user's external unread count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct SetBadgeRequest {
    pub external_unread_count: u64,
}
