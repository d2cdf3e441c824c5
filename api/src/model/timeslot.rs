use std::str::FromStr;

use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    booking::BookingSummary,
    id::{BookingId, CategoryId, TimeSlotId, UserId},
    timeslot::{
        event::{CreateTimeSlot, TimeSlotFilter},
        TimeSlot,
    },
};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

use crate::model::category::CategoryResponse;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeSlotRequest {
    #[garde(skip)]
    pub category_id: CategoryId,
    #[garde(length(min = 1))]
    pub title: String,
    #[garde(skip)]
    #[serde(default)]
    pub description: String,
    #[garde(skip)]
    pub start_time: DateTime<Utc>,
    #[garde(skip)]
    pub end_time: DateTime<Utc>,
}

#[derive(derive_new::new)]
pub struct CreateTimeSlotRequestWithUserId(pub CreateTimeSlotRequest, pub UserId);

impl From<CreateTimeSlotRequestWithUserId> for CreateTimeSlot {
    fn from(value: CreateTimeSlotRequestWithUserId) -> Self {
        let CreateTimeSlotRequestWithUserId(
            CreateTimeSlotRequest {
                category_id,
                title,
                description,
                start_time,
                end_time,
            },
            user_id,
        ) = value;
        CreateTimeSlot {
            category_id,
            title,
            description,
            start_time,
            end_time,
            created_by: user_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotListQuery {
    pub start_after: Option<DateTime<Utc>>,
    pub end_before: Option<DateTime<Utc>>,
    // Comma-separated category ids, e.g. "id1,id2".
    pub category_ids: Option<String>,
}

impl TryFrom<TimeSlotListQuery> for TimeSlotFilter {
    type Error = AppError;

    fn try_from(value: TimeSlotListQuery) -> Result<Self, Self::Error> {
        let TimeSlotListQuery {
            start_after,
            end_before,
            category_ids,
        } = value;
        let category_ids = category_ids
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter(|s| !s.is_empty())
            .map(|s| {
                CategoryId::from_str(s.trim()).map_err(|_| {
                    AppError::UnprocessableEntity(format!("invalid category id ({s})"))
                })
            })
            .collect::<Result<Vec<CategoryId>, AppError>>()?;
        Ok(TimeSlotFilter {
            start_after,
            end_before,
            category_ids,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotsResponse {
    pub items: Vec<TimeSlotResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotResponse {
    pub timeslot_id: TimeSlotId,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub category: CategoryResponse,
    pub is_available: bool,
    pub booking: Option<BookingInfoResponse>,
}

impl From<(TimeSlot, Option<BookingSummary>)> for TimeSlotResponse {
    fn from((timeslot, booking): (TimeSlot, Option<BookingSummary>)) -> Self {
        let TimeSlot {
            timeslot_id,
            category,
            title,
            description,
            start_time,
            end_time,
            created_by,
            created_at,
        } = timeslot;
        Self {
            timeslot_id,
            title,
            description,
            start_time,
            end_time,
            created_by,
            created_at,
            category: category.into(),
            is_available: booking.is_none(),
            booking: booking.map(BookingInfoResponse::from),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInfoResponse {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    pub booked_at: DateTime<Utc>,
}

impl From<BookingSummary> for BookingInfoResponse {
    fn from(value: BookingSummary) -> Self {
        let BookingSummary {
            booking_id,
            timeslot_id: _,
            booked_by,
            user_name,
            user_email,
            booked_at,
        } = value;
        Self {
            booking_id,
            user_id: booked_by,
            user_name,
            user_email,
            booked_at,
        }
    }
}
