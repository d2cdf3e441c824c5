use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    booking::BookingSummary,
    id::TimeSlotId,
    timeslot::event::{DeleteTimeSlot, TimeSlotFilter},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::timeslot::{
        CreateTimeSlotRequest, CreateTimeSlotRequestWithUserId, TimeSlotListQuery,
        TimeSlotResponse, TimeSlotsResponse,
    },
};

// The availability view: the slot listing joined per request with the
// current bookings. The two reads are not serialized against concurrent
// writers; a slot can flip between them and the response simply reflects
// whichever state each read observed. The ledger alone owns the
// uniqueness invariant.
pub async fn show_timeslot_list(
    _user: AuthorizedUser,
    Query(query): Query<TimeSlotListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<TimeSlotsResponse>> {
    let filter = TimeSlotFilter::try_from(query)?;
    let timeslots = registry.timeslot_repository().find_all(filter).await?;

    let timeslot_ids = timeslots
        .iter()
        .map(|t| t.timeslot_id)
        .collect::<Vec<TimeSlotId>>();
    let mut bookings: HashMap<TimeSlotId, BookingSummary> = registry
        .booking_repository()
        .find_summaries_by_timeslot_ids(&timeslot_ids)
        .await?
        .into_iter()
        .map(|summary| (summary.timeslot_id, summary))
        .collect();

    let items = timeslots
        .into_iter()
        .map(|timeslot| {
            let booking = bookings.remove(&timeslot.timeslot_id);
            TimeSlotResponse::from((timeslot, booking))
        })
        .collect();

    Ok(Json(TimeSlotsResponse { items }))
}

pub async fn register_timeslot(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateTimeSlotRequest>,
) -> AppResult<(StatusCode, Json<TimeSlotResponse>)> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate()?;

    let event = CreateTimeSlotRequestWithUserId::new(req, user.id()).into();
    let timeslot_id = registry.timeslot_repository().create(event).await?;

    let timeslot = registry
        .timeslot_repository()
        .find_by_id(timeslot_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("time slot ({timeslot_id}) was not found"))
        })?;

    Ok((
        StatusCode::CREATED,
        Json(TimeSlotResponse::from((timeslot, None))),
    ))
}

pub async fn delete_timeslot(
    user: AuthorizedUser,
    Path(timeslot_id): Path<TimeSlotId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .timeslot_repository()
        .delete(DeleteTimeSlot::new(timeslot_id))
        .await
        .map(|_| StatusCode::NO_CONTENT)
}
