//! Category Endpoints

use crate::models::{Category, CategoryPayload, SortOrderEntry};
use super::{ApiClient, ApiError};

impl ApiClient {
    /// All categories, sorted by `sort_order`
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let mut categories: Vec<Category> = self.get_json("/categories/").await?;
        categories.sort_by_key(|c| c.sort_order);
        Ok(categories)
    }

    pub async fn create_category(&self, payload: &CategoryPayload) -> Result<(), ApiError> {
        self.post_unit("/categories/", payload).await
    }

    pub async fn update_category(&self, id: u32, payload: &CategoryPayload) -> Result<(), ApiError> {
        self.put_unit(&format!("/categories/{}", id), payload).await
    }

    pub async fn delete_category(&self, id: u32) -> Result<(), ApiError> {
        self.delete(&format!("/categories/{}", id)).await
    }

    /// Submit a full dense ordering in one batch
    pub async fn update_category_order(&self, entries: &[SortOrderEntry]) -> Result<(), ApiError> {
        self.put_unit("/categories/sort-order", &entries).await
    }
}
