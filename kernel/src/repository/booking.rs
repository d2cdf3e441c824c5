use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    booking::{
        event::{CancelBooking, CreateBooking},
        Booking, BookingSummary,
    },
    id::{TimeSlotId, UserId},
};

/// The reservation ledger. Implementations must guarantee that a slot
/// carries at most one live booking at any instant, with the uniqueness
/// guard living in the shared storage layer so the invariant holds even
/// across multiple server processes.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Claims a slot for a user. Fails with `EntityNotFound` when the
    /// slot does not exist and with `ResourceConflict` when another live
    /// booking already references it; under concurrent calls for the
    /// same slot exactly one caller succeeds.
    async fn reserve(&self, event: CreateBooking) -> AppResult<Booking>;
    /// Removes a booking, freeing its slot for a subsequent reserve.
    /// Only the booking's owner may cancel it.
    async fn cancel(&self, event: CancelBooking) -> AppResult<()>;
    /// The user's current bookings, each carrying the referenced slot.
    async fn find_all_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Booking>>;
    /// Occupancy records for the given slots, for availability listings.
    async fn find_summaries_by_timeslot_ids(
        &self,
        timeslot_ids: &[TimeSlotId],
    ) -> AppResult<Vec<BookingSummary>>;
}
