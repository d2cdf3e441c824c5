use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    category::Category,
    id::{CategoryId, UserId},
};

#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Replaces the user's preferred-category set as one atomic step; a
    /// concurrent reader observes either the old set or the new set.
    /// Unknown category ids are dropped silently.
    async fn replace(&self, user_id: UserId, category_ids: Vec<CategoryId>) -> AppResult<()>;
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Category>>;
}
