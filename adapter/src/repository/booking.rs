use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        booking::{
            event::{CancelBooking, CreateBooking},
            Booking, BookingSummary,
        },
        id::{BookingId, TimeSlotId, UserId},
    },
    repository::booking::BookingRepository,
};
use shared::error::{AppError, AppResult};
use uuid::Uuid;

use crate::database::{
    model::booking::{BookingRow, BookingSummaryRow},
    ConnectionPool,
};

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

const BOOKING_COLUMNS: &str = r#"
    b.booking_id,
    b.user_id,
    b.booked_at,
    t.timeslot_id,
    t.category_id,
    t.title,
    t.start_time,
    t.end_time
"#;

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    // The UNIQUE constraint on bookings.timeslot_id is the authoritative
    // guard for the one-booking-per-slot invariant; it holds across
    // server processes, so no pre-check is needed and none is made. A
    // constraint violation here is the expected outcome of losing a race
    // and is surfaced as a conflict for the caller to handle.
    async fn reserve(&self, event: CreateBooking) -> AppResult<Booking> {
        let mut tx = self.db.begin().await?;

        let slot = sqlx::query("SELECT timeslot_id FROM timeslots WHERE timeslot_id = $1")
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

        let booking_id = BookingId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO bookings (booking_id, timeslot_id, user_id)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(booking_id)
        .bind(event.timeslot_id)
        .bind(event.booked_by)
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref de) if de.is_unique_violation() => {
                AppError::ResourceConflict(format!(
                    "time slot ({}) is already booked",
                    event.timeslot_id
                ))
            }
            e => AppError::SpecificOperationError(e),
        })?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been created".into(),
            ));
        }

        let row = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
                SELECT {BOOKING_COLUMNS}
                FROM bookings AS b
                INNER JOIN timeslots AS t ON b.timeslot_id = t.timeslot_id
                WHERE b.booking_id = $1
            "#
        ))
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(Booking::from(row))
    }

    async fn cancel(&self, event: CancelBooking) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let row: Option<(UserId,)> =
            sqlx::query_as("SELECT user_id FROM bookings WHERE booking_id = $1 FOR UPDATE")
                .bind(event.booking_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

        let Some((owner,)) = row else {
            return Err(AppError::EntityNotFound(format!(
                "booking ({}) was not found",
                event.booking_id
            )));
        };
        if owner != event.requested_user {
            return Err(AppError::ForbiddenOperation);
        }

        let res = sqlx::query("DELETE FROM bookings WHERE booking_id = $1")
            .bind(event.booking_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been deleted".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn find_all_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, BookingRow>(&format!(
            r#"
                SELECT {BOOKING_COLUMNS}
                FROM bookings AS b
                INNER JOIN timeslots AS t ON b.timeslot_id = t.timeslot_id
                WHERE b.user_id = $1
                ORDER BY b.booked_at ASC
            "#
        ))
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Booking::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_summaries_by_timeslot_ids(
        &self,
        timeslot_ids: &[TimeSlotId],
    ) -> AppResult<Vec<BookingSummary>> {
        let ids = timeslot_ids.iter().map(|id| id.raw()).collect::<Vec<Uuid>>();
        sqlx::query_as::<_, BookingSummaryRow>(
            r#"
                SELECT
                    b.booking_id,
                    b.timeslot_id,
                    b.user_id,
                    u.user_name,
                    u.email,
                    b.booked_at
                FROM bookings AS b
                INNER JOIN users AS u ON b.user_id = u.user_id
                WHERE b.timeslot_id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(BookingSummary::from).collect())
        .map_err(AppError::SpecificOperationError)
    }
}
