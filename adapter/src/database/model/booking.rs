use kernel::model::{
    booking::{Booking, BookingSummary, BookingTimeSlot},
    id::{BookingId, CategoryId, TimeSlotId, UserId},
};
use sqlx::types::chrono::{DateTime, Utc};

// Booking joined with the slot it claims.
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub booked_at: DateTime<Utc>,
    pub timeslot_id: TimeSlotId,
    pub category_id: CategoryId,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(value: BookingRow) -> Self {
        let BookingRow {
            booking_id,
            user_id,
            booked_at,
            timeslot_id,
            category_id,
            title,
            start_time,
            end_time,
        } = value;
        Booking {
            booking_id,
            booked_by: user_id,
            booked_at,
            timeslot: BookingTimeSlot {
                timeslot_id,
                category_id,
                title,
                start_time,
                end_time,
            },
        }
    }
}

// Occupancy row for the availability listing, joined with the booker.
#[derive(sqlx::FromRow)]
pub struct BookingSummaryRow {
    pub booking_id: BookingId,
    pub timeslot_id: TimeSlotId,
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub booked_at: DateTime<Utc>,
}

impl From<BookingSummaryRow> for BookingSummary {
    fn from(value: BookingSummaryRow) -> Self {
        let BookingSummaryRow {
            booking_id,
            timeslot_id,
            user_id,
            user_name,
            email,
            booked_at,
        } = value;
        BookingSummary {
            booking_id,
            timeslot_id,
            booked_by: user_id,
            user_name,
            user_email: email,
            booked_at,
        }
    }
}
