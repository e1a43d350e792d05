//! Contact inbox API client methods

use reqwest::Method;

use super::VolantClient;
use super::error::ClientError;
use crate::types::MessagePage;

impl VolantClient {
    /// List contact messages, newest first
    pub async fn list_messages(&self, page: Option<u32>) -> Result<MessagePage, ClientError> {
        let mut req = self.request(Method::GET, "/messages");
        if let Some(page) = page {
            req = req.query("page", page);
        }
        self.execute_data(req).await
    }

    /// Mark a message as read
    pub async fn mark_message_read(&self, id: i64) -> Result<(), ClientError> {
        let req = self.request(Method::PATCH, &format!("/messages/{id}/read"));
        self.execute_unit(req).await
    }

    /// Delete a message
    pub async fn delete_message(&self, id: i64) -> Result<(), ClientError> {
        let req = self.request(Method::DELETE, &format!("/messages/{id}"));
        self.execute_unit(req).await
    }
}
