//! Conversation endpoints.
//!
//! Participant and metadata edits all go through one PATCH on
//! `conversations/{id}` and succeed only on 204.

use serde::Serialize;

use super::{expect_status, require, LayerClient};
use crate::domain::patch::PARTICIPANTS;
use crate::domain::{
    Conversation, CreateConversationRequest, LayerError, PatchDocument, PatchOperation,
    PatchOperationKind, ValidationError,
};
use crate::ports::HttpMethod;

/// Result of a conditional fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// The resource changed; `etag` is the server's new tag, if it sent one.
    Modified { value: T, etag: Option<String> },
    /// The server answered 304 for the supplied tag.
    NotModified,
}

impl<T> Fetched<T> {
    pub fn into_value(self) -> Option<T> {
        match self {
            Fetched::Modified { value, .. } => Some(value),
            Fetched::NotModified => None,
        }
    }
}

impl LayerClient {
    /// All conversations `user_id` participates in.
    pub async fn get_conversations_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Conversation>, LayerError> {
        require("user_id", user_id)?;
        self.fetch(&format!("users/{}/conversations", user_id)).await
    }

    /// One conversation as seen by `user_id`.
    pub async fn get_conversation_for_user(
        &self,
        user_id: &str,
        conversation_id: &str,
    ) -> Result<Conversation, LayerError> {
        require("user_id", user_id)?;
        require("conversation_id", conversation_id)?;
        self.fetch(&format!(
            "users/{}/conversations/{}",
            user_id, conversation_id
        ))
        .await
    }

    pub async fn get_conversation(&self, conversation_id: &str) -> Result<Conversation, LayerError> {
        require("conversation_id", conversation_id)?;
        self.fetch(&format!("conversations/{}", conversation_id))
            .await
    }

    /// Fetches a conversation only if it no longer matches `etag`.
    pub async fn get_conversation_if_changed(
        &self,
        conversation_id: &str,
        etag: &str,
    ) -> Result<Fetched<Conversation>, LayerError> {
        require("conversation_id", conversation_id)?;
        require("etag", etag)?;

        let response = self
            .execute(
                HttpMethod::Get,
                &format!("conversations/{}", conversation_id),
                None,
                Some(etag),
            )
            .await?;
        let response = expect_status(response, &[200, 304])?;

        if response.status == 304 {
            return Ok(Fetched::NotModified);
        }

        let etag = response.header("ETag").map(str::to_string);
        Ok(Fetched::Modified {
            value: self.decode(&response.body)?,
            etag,
        })
    }

    /// Creates a conversation. A distinct conversation that already exists
    /// is returned as-is (200); a new one is 201.
    pub async fn create_conversation(
        &self,
        request: CreateConversationRequest,
    ) -> Result<Conversation, LayerError> {
        if request.participants.is_empty() {
            return Err(ValidationError::empty_list("participant").into());
        }

        let response = self
            .send_json(HttpMethod::Post, "conversations", &request)
            .await?;
        let response = expect_status(response, &[200, 201])?;
        self.decode(&response.body)
    }

    /// Adds each of `participants` to the conversation.
    pub async fn add_participants<S: AsRef<str>>(
        &self,
        conversation_id: &str,
        participants: &[S],
    ) -> Result<(), LayerError> {
        let document = PatchDocument::each(
            PatchOperationKind::Add,
            PARTICIPANTS,
            participants.iter().map(|p| p.as_ref()),
        );
        self.edit_conversation(conversation_id, &document).await
    }

    /// Removes each of `participants` from the conversation.
    pub async fn remove_participants<S: AsRef<str>>(
        &self,
        conversation_id: &str,
        participants: &[S],
    ) -> Result<(), LayerError> {
        let document = PatchDocument::each(
            PatchOperationKind::Remove,
            PARTICIPANTS,
            participants.iter().map(|p| p.as_ref()),
        );
        self.edit_conversation(conversation_id, &document).await
    }

    /// Replaces the whole participant set with `participants`.
    pub async fn set_participants<S: AsRef<str>>(
        &self,
        conversation_id: &str,
        participants: &[S],
    ) -> Result<(), LayerError> {
        let all: Vec<&str> = participants.iter().map(|p| p.as_ref()).collect();
        let document = PatchDocument::from(vec![PatchOperation::set(PARTICIPANTS, all)]);
        self.edit_conversation(conversation_id, &document).await
    }

    /// Sets a metadata property, e.g. `metadata.admin`.
    pub async fn set_metadata<V: Serialize + ?Sized>(
        &self,
        conversation_id: &str,
        property: &str,
        value: &V,
    ) -> Result<(), LayerError> {
        require("property", property)?;
        let operation =
            PatchOperation::set_serialized(property, value).map_err(LayerError::Serialization)?;
        self.edit_conversation(conversation_id, &PatchDocument::from(vec![operation]))
            .await
    }

    /// Deletes a metadata property, e.g. `metadata.admin.name`.
    pub async fn delete_metadata(
        &self,
        conversation_id: &str,
        property: &str,
    ) -> Result<(), LayerError> {
        require("property", property)?;
        let document = PatchDocument::from(vec![PatchOperation::delete(property)]);
        self.edit_conversation(conversation_id, &document).await
    }

    /// Applies an arbitrary patch document to a conversation.
    pub async fn edit_conversation(
        &self,
        conversation_id: &str,
        document: &PatchDocument,
    ) -> Result<(), LayerError> {
        require("conversation_id", conversation_id)?;
        let response = self
            .send_patch(&format!("conversations/{}", conversation_id), document)
            .await?;
        expect_status(response, &[204])?;
        Ok(())
    }

    /// Deletes a conversation and its history for every participant.
    pub async fn delete_conversation(&self, conversation_id: &str) -> Result<(), LayerError> {
        require("conversation_id", conversation_id)?;
        let response = self
            .execute(
                HttpMethod::Delete,
                &format!("conversations/{}", conversation_id),
                None,
                None,
            )
            .await?;
        expect_status(response, &[204])?;
        Ok(())
    }
}
