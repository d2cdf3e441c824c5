pub mod event;

use crate::model::id::CategoryId;

#[derive(Debug, Clone)]
pub struct Category {
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub color: String,
}
