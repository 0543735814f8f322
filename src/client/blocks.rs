//! Per-user block lists.

use super::{expect_status, require, LayerClient};
use crate::domain::{BlockedUser, LayerError};
use crate::ports::HttpMethod;

impl LayerClient {
    /// Adds `blocked_id` to `user_id`'s block list.
    pub async fn block_user(&self, user_id: &str, blocked_id: &str) -> Result<(), LayerError> {
        require("user_id", user_id)?;
        require("blocked_id", blocked_id)?;
        let response = self
            .send_json(
                HttpMethod::Post,
                &format!("users/{}/blocks", user_id),
                &BlockedUser::new(blocked_id),
            )
            .await?;
        expect_status(response, &[204])?;
        Ok(())
    }

    pub async fn get_block_list(&self, user_id: &str) -> Result<Vec<BlockedUser>, LayerError> {
        require("user_id", user_id)?;
        self.fetch(&format!("users/{}/blocks", user_id)).await
    }

    /// Removes `blocked_id` from `user_id`'s block list.
    pub async fn unblock_user(&self, user_id: &str, blocked_id: &str) -> Result<(), LayerError> {
        require("user_id", user_id)?;
        require("blocked_id", blocked_id)?;
        let response = self
            .execute(
                HttpMethod::Delete,
                &format!("users/{}/blocks/{}", user_id, blocked_id),
                None,
                None,
            )
            .await?;
        expect_status(response, &[204])?;
        Ok(())
    }

    /// Blocks and unblocks many users in one PATCH.
    ///
    /// The body is every `add` triple for `block_ids` followed by every
    /// `remove` triple for `unblock_ids`. The server accepts the change
    /// asynchronously with 202.
    pub async fn bulk_modify_block_list(
        &self,
        user_id: &str,
        block_ids: Vec<String>,
        unblock_ids: Vec<String>,
    ) -> Result<(), LayerError> {
        require("user_id", user_id)?;

        let (blocking, unblocking) = (block_ids.len(), unblock_ids.len());
        let document = self.composer().compose(block_ids, unblock_ids).await?;

        let response = self
            .send_patch(&format!("users/{}", user_id), &document)
            .await?;
        expect_status(response, &[202])?;

        tracing::info!(
            user_id = %user_id,
            blocked = blocking,
            unblocked = unblocking,
            "Block list updated"
        );
        Ok(())
    }
}
