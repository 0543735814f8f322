//! Badge endpoints.

use super::{expect_status, require, LayerClient};
use crate::domain::notification::SetBadgeRequest;
use crate::domain::{Badge, LayerError};
use crate::ports::HttpMethod;

impl LayerClient {
    /// Sets the unread count the application server maintains for `user_id`.
    pub async fn set_user_badge(&self, user_id: &str, count: u64) -> Result<(), LayerError> {
        require("user_id", user_id)?;
        let body = SetBadgeRequest {
            external_unread_count: count,
        };
        let response = self
            .send_json(HttpMethod::Put, &format!("users/{}/badge", user_id), &body)
            .await?;
        expect_status(response, &[204])?;
        Ok(())
    }

    pub async fn get_user_badge(&self, user_id: &str) -> Result<Badge, LayerError> {
        require("user_id", user_id)?;
        self.fetch(&format!("users/{}/badge", user_id)).await
    }
}
