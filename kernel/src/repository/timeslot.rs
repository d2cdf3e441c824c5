use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::TimeSlotId,
    timeslot::{
        event::{CreateTimeSlot, DeleteTimeSlot, TimeSlotFilter},
        TimeSlot,
    },
};

#[async_trait]
pub trait TimeSlotRepository: Send + Sync {
    /// Validates the time range and the referenced category, then
    /// durably inserts the slot.
    async fn create(&self, event: CreateTimeSlot) -> AppResult<TimeSlotId>;
    /// Removes the slot and, in the same atomic unit, any live booking
    /// referencing it.
    async fn delete(&self, event: DeleteTimeSlot) -> AppResult<()>;
    /// Slots matching every given predicate, ordered ascending by start
    /// time with ties broken by slot id.
    async fn find_all(&self, filter: TimeSlotFilter) -> AppResult<Vec<TimeSlot>>;
    async fn find_by_id(&self, timeslot_id: TimeSlotId) -> AppResult<Option<TimeSlot>>;
}
