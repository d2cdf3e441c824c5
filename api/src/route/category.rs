use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::category::{register_category, show_category_list};

pub fn build_category_routers() -> Router<AppRegistry> {
    let category_routers = Router::new()
        .route("/", get(show_category_list))
        .route("/", post(register_category));

    Router::new().nest("/categories", category_routers)
}
