pub mod event;

use chrono::{DateTime, Utc};

use crate::model::id::{BookingId, CategoryId, TimeSlotId, UserId};

#[derive(Debug)]
pub struct Booking {
    pub booking_id: BookingId,
    pub booked_by: UserId,
    pub booked_at: DateTime<Utc>,
    pub timeslot: BookingTimeSlot,
}

// The slot a booking refers to, carried on every read so callers never
// have to re-join against the slot store themselves.
#[derive(Debug)]
pub struct BookingTimeSlot {
    pub timeslot_id: TimeSlotId,
    pub category_id: CategoryId,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

// Occupancy record attached to a slot in the availability listing.
#[derive(Debug)]
pub struct BookingSummary {
    pub booking_id: BookingId,
    pub timeslot_id: TimeSlotId,
    pub booked_by: UserId,
    pub user_name: String,
    pub user_email: String,
    pub booked_at: DateTime<Utc>,
}
