use axum::{
    routing::{delete, get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{cancel_booking, reserve_timeslot, show_booking_list};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let booking_routers = Router::new()
        .route("/", get(show_booking_list))
        .route("/", post(reserve_timeslot))
        .route("/:booking_id", delete(cancel_booking));

    Router::new().nest("/bookings", booking_routers)
}
