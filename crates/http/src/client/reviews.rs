//! Review moderation API client methods

use reqwest::Method;
use serde_json::json;

use super::VolantClient;
use super::error::ClientError;
use crate::types::{Review, ReviewFilter};

impl VolantClient {
    /// List reviews, optionally filtered by approval state or product
    pub async fn list_reviews(&self, filter: &ReviewFilter) -> Result<Vec<Review>, ClientError> {
        let mut req = self.request(Method::GET, "/reviews");

        if let Some(approved) = filter.approved {
            req = req.query("approved", approved);
        }
        if let Some(product_id) = filter.product_id {
            req = req.query("productId", product_id);
        }

        self.execute_data(req).await
    }

    /// Approve a review so it shows up on the storefront
    pub async fn approve_review(&self, id: i64) -> Result<Review, ClientError> {
        let req = self
            .request(Method::PATCH, &format!("/reviews/{id}"))
            .json(&json!({"approved": true}))?;
        self.execute_data(req).await
    }

    /// Delete a review
    pub async fn delete_review(&self, id: i64) -> Result<(), ClientError> {
        let req = self.request(Method::DELETE, &format!("/reviews/{id}"));
        self.execute_unit(req).await
    }
}
