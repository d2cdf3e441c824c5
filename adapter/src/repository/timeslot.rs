use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::TimeSlotId,
        timeslot::{
            event::{CreateTimeSlot, DeleteTimeSlot, TimeSlotFilter},
            TimeSlot,
        },
    },
    repository::timeslot::TimeSlotRepository,
};
use shared::error::{AppError, AppResult};
use uuid::Uuid;

use crate::database::{model::timeslot::TimeSlotRow, ConnectionPool};

#[derive(new)]
pub struct TimeSlotRepositoryImpl {
    db: ConnectionPool,
}

const TIMESLOT_COLUMNS: &str = r#"
    t.timeslot_id,
    t.title,
    t.description,
    t.start_time,
    t.end_time,
    t.created_by,
    t.created_at,
    c.category_id,
    c.name AS category_name,
    c.description AS category_description,
    c.color AS category_color
"#;

#[async_trait]
impl TimeSlotRepository for TimeSlotRepositoryImpl {
    async fn create(&self, event: CreateTimeSlot) -> AppResult<TimeSlotId> {
        if event.end_time <= event.start_time {
            return Err(AppError::UnprocessableEntity(
                "end time must be after start time".into(),
            ));
        }

        let mut tx = self.db.begin().await?;

        let category = sqlx::query("SELECT category_id FROM categories WHERE category_id = $1")
            .bind(event.category_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if category.is_none() {
            return Err(AppError::UnprocessableEntity(format!(
                "category ({}) does not exist",
                event.category_id
            )));
        }

        let timeslot_id = TimeSlotId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO timeslots
                (timeslot_id, category_id, title, description, start_time, end_time, created_by)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(timeslot_id)
        .bind(event.category_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(event.created_by)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No time slot record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(timeslot_id)
    }

    // The booking delete and the slot delete commit together so no
    // booking can ever reference a slot that is gone.
    async fn delete(&self, event: DeleteTimeSlot) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let slot = sqlx::query("SELECT timeslot_id FROM timeslots WHERE timeslot_id = $1 FOR UPDATE")
            .bind(event.timeslot_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if slot.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "time slot ({}) was not found",
                event.timeslot_id
            )));
        }

        sqlx::query("DELETE FROM bookings WHERE timeslot_id = $1")
            .bind(event.timeslot_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let res = sqlx::query("DELETE FROM timeslots WHERE timeslot_id = $1")
            .bind(event.timeslot_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No time slot record has been deleted".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn find_all(&self, filter: TimeSlotFilter) -> AppResult<Vec<TimeSlot>> {
        let category_ids = if filter.category_ids.is_empty() {
            None
        } else {
            Some(
                filter
                    .category_ids
                    .iter()
                    .map(|id| id.raw())
                    .collect::<Vec<Uuid>>(),
            )
        };

        sqlx::query_as::<_, TimeSlotRow>(&format!(
            r#"
                SELECT {TIMESLOT_COLUMNS}
                FROM timeslots AS t
                INNER JOIN categories AS c ON t.category_id = c.category_id
                WHERE ($1::timestamptz IS NULL OR t.start_time >= $1)
                  AND ($2::timestamptz IS NULL OR t.end_time <= $2)
                  AND ($3::uuid[] IS NULL OR t.category_id = ANY($3))
                ORDER BY t.start_time ASC, t.timeslot_id ASC
            "#
        ))
        .bind(filter.start_after)
        .bind(filter.end_before)
        .bind(category_ids)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(TimeSlot::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_id(&self, timeslot_id: TimeSlotId) -> AppResult<Option<TimeSlot>> {
        sqlx::query_as::<_, TimeSlotRow>(&format!(
            r#"
                SELECT {TIMESLOT_COLUMNS}
                FROM timeslots AS t
                INNER JOIN categories AS c ON t.category_id = c.category_id
                WHERE t.timeslot_id = $1
            "#
        ))
        .bind(timeslot_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(TimeSlot::from))
        .map_err(AppError::SpecificOperationError)
    }
}
