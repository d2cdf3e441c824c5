use garde::Validate;
use kernel::model::{
    category::{event::CreateCategory, Category},
    id::CategoryId,
};
use serde::{Deserialize, Serialize};

fn default_color() -> String {
    "#3f51b5".into()
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    #[serde(default)]
    pub description: String,
    #[garde(skip)]
    #[serde(default = "default_color")]
    pub color: String,
}

impl From<CreateCategoryRequest> for CreateCategory {
    fn from(value: CreateCategoryRequest) -> Self {
        let CreateCategoryRequest {
            name,
            description,
            color,
        } = value;
        CreateCategory {
            name,
            description,
            color,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesResponse {
    pub items: Vec<CategoryResponse>,
}

impl From<Vec<Category>> for CategoriesResponse {
    fn from(value: Vec<Category>) -> Self {
        Self {
            items: value.into_iter().map(CategoryResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub color: String,
}

impl From<Category> for CategoryResponse {
    fn from(value: Category) -> Self {
        let Category {
            category_id,
            name,
            description,
            color,
        } = value;
        Self {
            category_id,
            name,
            description,
            color,
        }
    }
}
