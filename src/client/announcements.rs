//! Announcement endpoint.

use super::{expect_status, LayerClient};
use crate::domain::{Announcement, AnnouncementRequest, LayerError, ValidationError};
use crate::ports::HttpMethod;

impl LayerClient {
    /// Sends an announcement to every user in `request.recipients`.
    ///
    /// The server may queue delivery and answer 202.
    pub async fn send_announcement(
        &self,
        request: &AnnouncementRequest,
    ) -> Result<Announcement, LayerError> {
        if request.recipients.is_empty() {
            return Err(ValidationError::empty_list("recipient").into());
        }
        if request.parts.is_empty() {
            return Err(ValidationError::empty_list("part").into());
        }

        let response = self
            .send_json(HttpMethod::Post, "announcements", request)
            .await?;
        let response = expect_status(response, &[200, 201, 202])?;
        self.decode(&response.body)
    }
}
