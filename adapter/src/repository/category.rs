use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        category::{event::CreateCategory, Category},
        id::CategoryId,
    },
    repository::category::CategoryRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::category::CategoryRow, ConnectionPool};

#[derive(new)]
pub struct CategoryRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl CategoryRepository for CategoryRepositoryImpl {
    async fn create(&self, event: CreateCategory) -> AppResult<CategoryId> {
        let category_id = CategoryId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO categories (category_id, name, description, color)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(category_id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.color)
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref de) if de.is_unique_violation() => {
                AppError::UnprocessableEntity(format!(
                    "category name ({}) is already taken",
                    event.name
                ))
            }
            e => AppError::SpecificOperationError(e),
        })?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No category record has been created".into(),
            ));
        }

        Ok(category_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, CategoryRow>(
            r#"
                SELECT category_id, name, description, color
                FROM categories
                ORDER BY name ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Category::from).collect())
        .map_err(AppError::SpecificOperationError)
    }
}
