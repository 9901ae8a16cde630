//! Content Endpoints

use crate::models::{Content, ContentPayload};
use super::{ApiClient, ApiError};

impl ApiClient {
    /// Published contents, optionally limited to one category
    pub async fn list_contents(&self, category: Option<u32>) -> Result<Vec<Content>, ApiError> {
        match category {
            Some(id) => self.get_json(&format!("/categories/{}/contents", id)).await,
            None => self.get_json("/contents/").await,
        }
    }

    /// Every content including drafts
    pub async fn list_admin_contents(&self) -> Result<Vec<Content>, ApiError> {
        self.get_json("/contents/admin").await
    }

    pub async fn get_content(&self, id: u32) -> Result<Content, ApiError> {
        self.get_json(&format!("/contents/{}", id)).await
    }

    pub async fn create_content(&self, payload: &ContentPayload) -> Result<(), ApiError> {
        self.post_unit("/contents/", payload).await
    }

    pub async fn update_content(&self, id: u32, payload: &ContentPayload) -> Result<(), ApiError> {
        self.put_unit(&format!("/contents/{}", id), payload).await
    }

    pub async fn delete_content(&self, id: u32) -> Result<(), ApiError> {
        self.delete(&format!("/contents/{}", id)).await
    }
}
