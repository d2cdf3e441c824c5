use kernel::model::{
    category::Category,
    id::{CategoryId, TimeSlotId, UserId},
    timeslot::TimeSlot,
};
use sqlx::types::chrono::{DateTime, Utc};

// Slot joined with its category; one row per slot in every listing.
#[derive(sqlx::FromRow)]
pub struct TimeSlotRow {
    pub timeslot_id: TimeSlotId,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub category_id: CategoryId,
    pub category_name: String,
    pub category_description: String,
    pub category_color: String,
}

impl From<TimeSlotRow> for TimeSlot {
    fn from(value: TimeSlotRow) -> Self {
        let TimeSlotRow {
            timeslot_id,
            title,
            description,
            start_time,
            end_time,
            created_by,
            created_at,
            category_id,
            category_name,
            category_description,
            category_color,
        } = value;
        TimeSlot {
            timeslot_id,
            category: Category {
                category_id,
                name: category_name,
                description: category_description,
                color: category_color,
            },
            title,
            description,
            start_time,
            end_time,
            created_by,
            created_at,
        }
    }
}
