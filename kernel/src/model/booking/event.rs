use derive_new::new;

use crate::model::id::{BookingId, TimeSlotId, UserId};

#[derive(Debug, new)]
pub struct CreateBooking {
    pub timeslot_id: TimeSlotId,
    pub booked_by: UserId,
}

#[derive(Debug, new)]
pub struct CancelBooking {
    pub booking_id: BookingId,
    pub requested_user: UserId,
}
