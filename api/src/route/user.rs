use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    preference::{show_preferences, update_preferences},
    user::get_current_user,
};

pub fn build_user_routers() -> Router<AppRegistry> {
    let user_routers = Router::new()
        .route("/me", get(get_current_user))
        .route("/me/preferences", get(show_preferences))
        .route("/me/preferences", put(update_preferences));

    Router::new().nest("/users", user_routers)
}
