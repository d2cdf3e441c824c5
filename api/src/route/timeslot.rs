use axum::{
    routing::{delete, get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::timeslot::{delete_timeslot, register_timeslot, show_timeslot_list};

pub fn build_timeslot_routers() -> Router<AppRegistry> {
    let timeslot_routers = Router::new()
        .route("/", get(show_timeslot_list))
        .route("/", post(register_timeslot))
        .route("/:timeslot_id", delete(delete_timeslot));

    Router::new().nest("/timeslots", timeslot_routers)
}
