pub mod event;

use chrono::{DateTime, Utc};

use crate::model::{
    category::Category,
    id::{TimeSlotId, UserId},
};

#[derive(Debug)]
pub struct TimeSlot {
    pub timeslot_id: TimeSlotId,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}
