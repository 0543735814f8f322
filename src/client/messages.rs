//! Message endpoints.

use super::{expect_status, require, LayerClient};
use crate::domain::{LayerError, Message, SendMessageRequest, ValidationError};
use crate::ports::HttpMethod;

impl LayerClient {
    /// Sends a message into a conversation on behalf of `request.sender`.
    pub async fn send_message(
        &self,
        conversation_id: &str,
        request: &SendMessageRequest,
    ) -> Result<Message, LayerError> {
        require("conversation_id", conversation_id)?;
        require("sender.user_id", &request.sender.user_id)?;
        if request.parts.is_empty() {
            return Err(ValidationError::empty_list("part").into());
        }

        let response = self
            .send_json(
                HttpMethod::Post,
                &format!("conversations/{}/messages", conversation_id),
                request,
            )
            .await?;
        let response = expect_status(response, &[200, 201])?;
        self.decode(&response.body)
    }

    /// Messages in a conversation as seen by `user_id`.
    pub async fn get_messages_for_user(
        &self,
        conversation_id: &str,
        user_id: &str,
    ) -> Result<Vec<Message>, LayerError> {
        require("conversation_id", conversation_id)?;
        require("user_id", user_id)?;
        self.fetch(&format!(
            "users/{}/conversations/{}/messages",
            user_id, conversation_id
        ))
        .await
    }

    /// Every message in a conversation, from the system's perspective.
    pub async fn get_all_messages(&self, conversation_id: &str) -> Result<Vec<Message>, LayerError> {
        require("conversation_id", conversation_id)?;
        self.fetch(&format!("conversations/{}/messages", conversation_id))
            .await
    }

    pub async fn get_message_for_user(
        &self,
        user_id: &str,
        message_id: &str,
    ) -> Result<Message, LayerError> {
        require("user_id", user_id)?;
        require("message_id", message_id)?;
        self.fetch(&format!("users/{}/messages/{}", user_id, message_id))
            .await
    }

    pub async fn get_message(
        &self,
        conversation_id: &str,
        message_id: &str,
    ) -> Result<Message, LayerError> {
        require("conversation_id", conversation_id)?;
        require("message_id", message_id)?;
        self.fetch(&format!(
            "conversations/{}/messages/{}",
            conversation_id, message_id
        ))
        .await
    }

    /// Deletes a message for every participant.
    pub async fn delete_message(
        &self,
        conversation_id: &str,
        message_id: &str,
    ) -> Result<(), LayerError> {
        require("conversation_id", conversation_id)?;
        require("message_id", message_id)?;
        let response = self
            .execute(
                HttpMethod::Delete,
                &format!("conversations/{}/messages/{}", conversation_id, message_id),
                None,
                None,
            )
            .await?;
        expect_status(response, &[204])?;
        Ok(())
    }
}
