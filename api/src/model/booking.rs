use chrono::{DateTime, Utc};
use kernel::model::{
    booking::{Booking, BookingTimeSlot},
    id::{BookingId, CategoryId, TimeSlotId, UserId},
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub timeslot_id: TimeSlotId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub items: Vec<BookingResponse>,
}

impl From<Vec<Booking>> for BookingsResponse {
    fn from(value: Vec<Booking>) -> Self {
        Self {
            items: value.into_iter().map(BookingResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub booked_at: DateTime<Utc>,
    pub timeslot: BookingTimeSlotResponse,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id,
            booked_by,
            booked_at,
            timeslot,
        } = value;
        Self {
            booking_id,
            user_id: booked_by,
            booked_at,
            timeslot: timeslot.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingTimeSlotResponse {
    pub timeslot_id: TimeSlotId,
    pub category_id: CategoryId,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl From<BookingTimeSlot> for BookingTimeSlotResponse {
    fn from(value: BookingTimeSlot) -> Self {
        let BookingTimeSlot {
            timeslot_id,
            category_id,
            title,
            start_time,
            end_time,
        } = value;
        Self {
            timeslot_id,
            category_id,
            title,
            start_time,
            end_time,
        }
    }
}
