use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::category::{CategoriesResponse, CreateCategoryRequest},
};

pub async fn show_category_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CategoriesResponse>> {
    registry
        .category_repository()
        .find_all()
        .await
        .map(CategoriesResponse::from)
        .map(Json)
}

pub async fn register_category(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateCategoryRequest>,
) -> AppResult<StatusCode> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate()?;

    registry
        .category_repository()
        .create(req.into())
        .await
        .map(|_| StatusCode::CREATED)
}
