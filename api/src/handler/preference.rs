use axum::{extract::State, Json};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AuthorizedUser,
    model::preference::{PreferencesResponse, UpdatePreferencesRequest},
};

pub async fn show_preferences(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PreferencesResponse>> {
    registry
        .preference_repository()
        .find_by_user_id(user.id())
        .await
        .map(PreferencesResponse::from)
        .map(Json)
}

pub async fn update_preferences(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdatePreferencesRequest>,
) -> AppResult<Json<PreferencesResponse>> {
    registry
        .preference_repository()
        .replace(user.id(), req.category_ids)
        .await?;

    registry
        .preference_repository()
        .find_by_user_id(user.id())
        .await
        .map(PreferencesResponse::from)
        .map(Json)
}
