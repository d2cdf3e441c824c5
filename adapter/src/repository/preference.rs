use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        category::Category,
        id::{CategoryId, UserId},
    },
    repository::preference::PreferenceRepository,
};
use shared::error::{AppError, AppResult};
use uuid::Uuid;

use crate::database::{model::category::CategoryRow, ConnectionPool};

#[derive(new)]
pub struct PreferenceRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl PreferenceRepository for PreferenceRepositoryImpl {
    // Delete-then-insert runs in one transaction, so readers observe
    // either the previous set or the new set in full. Inserting through
    // a SELECT on categories drops unknown ids without erroring.
    async fn replace(&self, user_id: UserId, category_ids: Vec<CategoryId>) -> AppResult<()> {
        let ids = category_ids.iter().map(|id| id.raw()).collect::<Vec<Uuid>>();

        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM user_preferences WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        sqlx::query(
            r#"
                INSERT INTO user_preferences (user_id, category_id)
                SELECT $1, category_id FROM categories WHERE category_id = ANY($2)
            "#,
        )
        .bind(user_id)
        .bind(ids)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, CategoryRow>(
            r#"
                SELECT c.category_id, c.name, c.description, c.color
                FROM categories AS c
                INNER JOIN user_preferences AS up ON c.category_id = up.category_id
                WHERE up.user_id = $1
                ORDER BY c.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Category::from).collect())
        .map_err(AppError::SpecificOperationError)
    }
}
