use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    category::{event::CreateCategory, Category},
    id::CategoryId,
};

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, event: CreateCategory) -> AppResult<CategoryId>;
    async fn find_all(&self) -> AppResult<Vec<Category>>;
}
