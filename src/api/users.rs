//! User Management Endpoints

use crate::models::{ManagedUser, UserPayload};
use super::{ApiClient, ApiError};

impl ApiClient {
    pub async fn list_users(&self) -> Result<Vec<ManagedUser>, ApiError> {
        self.get_json("/users/").await
    }

    pub async fn create_user(&self, payload: &UserPayload) -> Result<(), ApiError> {
        self.post_unit("/users/", payload).await
    }

    pub async fn update_user(&self, id: u32, payload: &UserPayload) -> Result<(), ApiError> {
        self.put_unit(&format!("/users/{}", id), payload).await
    }

    pub async fn delete_user(&self, id: u32) -> Result<(), ApiError> {
        self.delete(&format!("/users/{}", id)).await
    }
}
