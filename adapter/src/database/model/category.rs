use kernel::model::{category::Category, id::CategoryId};

#[derive(sqlx::FromRow)]
pub struct CategoryRow {
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub color: String,
}

impl From<CategoryRow> for Category {
    fn from(value: CategoryRow) -> Self {
        let CategoryRow {
            category_id,
            name,
            description,
            color,
        } = value;
        Category {
            category_id,
            name,
            description,
            color,
        }
    }
}
