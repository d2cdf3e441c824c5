use kernel::model::{category::Category, id::CategoryId};
use serde::{Deserialize, Serialize};

use crate::model::category::CategoryResponse;

// The request always carries the full desired set; the stored set is
// replaced wholesale, never merged.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    pub category_ids: Vec<CategoryId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesResponse {
    pub categories: Vec<CategoryResponse>,
}

impl From<Vec<Category>> for PreferencesResponse {
    fn from(value: Vec<Category>) -> Self {
        Self {
            categories: value.into_iter().map(CategoryResponse::from).collect(),
        }
    }
}
