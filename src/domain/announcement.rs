//! Announcements: messages delivered outside any conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient::{lenient, lenient_seq};
use super::message::{MessagePart, Sender};
use super::notification::Notification;

/// Body for sending an announcement to a list of users.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnouncementRequest {
    pub recipients: Vec<String>,
    pub sender: Sender,
    pub parts: Vec<MessagePart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

impl AnnouncementRequest {
    pub fn new<I, S>(recipients: I, sender_name: impl Into<String>, parts: Vec<MessagePart>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            recipients: recipients.into_iter().map(Into::into).collect(),
            sender: Sender::named(sender_name),
            parts,
            notification: None,
        }
    }

    pub fn with_notification(mut self, notification: Notification) -> Self {
        self.notification = Some(notification);
        self
    }
}

/// An announcement as echoed back by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Announcement {
    #[serde(deserialize_with = "lenient")]
    pub id: String,
    #[serde(deserialize_with = "lenient")]
    pub url: String,
    #[serde(deserialize_with = "lenient")]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient_seq")]
    pub recipients: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub sender: Sender,
    #[serde(deserialize_with = "lenient_seq")]
    pub parts: Vec<MessagePart>,
}
