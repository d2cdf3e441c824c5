use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use kernel::model::{
    booking::event::{CancelBooking, CreateBooking},
    id::BookingId,
};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AuthorizedUser,
    model::booking::{BookingResponse, BookingsResponse, CreateBookingRequest},
};

pub async fn show_booking_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    registry
        .booking_repository()
        .find_all_by_user_id(user.id())
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

// A 409 here is the legitimate outcome of losing the reservation race;
// the caller decides whether to re-poll or inform the user.
pub async fn reserve_timeslot(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    registry
        .booking_repository()
        .reserve(CreateBooking::new(req.timeslot_id, user.id()))
        .await
        .map(BookingResponse::from)
        .map(|booking| (StatusCode::CREATED, Json(booking)))
}

pub async fn cancel_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .booking_repository()
        .cancel(CancelBooking::new(booking_id, user.id()))
        .await
        .map(|_| StatusCode::NO_CONTENT)
}
