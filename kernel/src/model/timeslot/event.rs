use chrono::{DateTime, Utc};
use derive_new::new;

use crate::model::id::{CategoryId, TimeSlotId, UserId};

#[derive(Debug, new)]
pub struct CreateTimeSlot {
    pub category_id: CategoryId,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_by: UserId,
}

#[derive(Debug, new)]
pub struct DeleteTimeSlot {
    pub timeslot_id: TimeSlotId,
}

// All absent fields mean "no restriction"; category_ids empty means
// every category matches.
#[derive(Debug, Default)]
pub struct TimeSlotFilter {
    pub start_after: Option<DateTime<Utc>>,
    pub end_before: Option<DateTime<Utc>>,
    pub category_ids: Vec<CategoryId>,
}
