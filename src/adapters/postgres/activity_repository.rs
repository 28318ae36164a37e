//! PostgreSQL implementation of ActivityRepository.
//!
//! Itinerary entries reference `activities(id)` with `ON DELETE CASCADE`, so
//! deleting an activity clears every reference to it in the same statement.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{
    activity_not_found, day_param, db_error, is_foreign_key_violation, row_to_activity,
    trip_not_found, ACTIVITY_COLUMNS,
};
use super::trip_repository::touch_trip;
use crate::domain::activity::Activity;
use crate::domain::foundation::{ActivityId, DomainError, TripId};
use crate::ports::ActivityRepository;

#[derive(Clone)]
pub struct PostgresActivityRepository {
    pool: PgPool,
}

impl PostgresActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepository {
    async fn create_scheduled(&self, activity: &Activity) -> Result<(), DomainError> {
        let day = day_param(activity.day())?;
        let coordinates = activity.location().coordinates;
        let booking = activity.booking_info().cloned().unwrap_or_default();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        sqlx::query(&format!(
            r#"
            INSERT INTO activities ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
            "#,
            ACTIVITY_COLUMNS
        ))
        .bind(activity.id().as_uuid())
        .bind(activity.trip_id().as_uuid())
        .bind(day)
        .bind(activity.name())
        .bind(activity.description())
        .bind(&activity.location().address)
        .bind(coordinates.map(|c| c.latitude))
        .bind(coordinates.map(|c| c.longitude))
        .bind(activity.start_time().to_string())
        .bind(activity.end_time().to_string())
        .bind(activity.cost())
        .bind(activity.category().as_str())
        .bind(i16::from(activity.eco_rating()))
        .bind(activity.booking_required())
        .bind(booking.provider)
        .bind(booking.url)
        .bind(booking.reference)
        .bind(activity.notes())
        .bind(activity.created_at().as_datetime())
        .bind(activity.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                trip_not_found(activity.trip_id())
            } else {
                DomainError::database("Failed to insert activity", e)
            }
        })?;

        sqlx::query(
            r#"
            INSERT INTO itinerary_entries (trip_id, day, activity_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (trip_id, day, activity_id) DO NOTHING
            "#,
        )
        .bind(activity.trip_id().as_uuid())
        .bind(day)
        .bind(activity.id().as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to schedule activity"))?;
        touch_trip(&mut tx, activity.trip_id()).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(())
    }

    async fn find_by_id(
        &self,
        trip_id: &TripId,
        id: &ActivityId,
    ) -> Result<Option<Activity>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM activities WHERE id = $1 AND trip_id = $2",
            ACTIVITY_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(trip_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch activity"))?;

        row.as_ref().map(row_to_activity).transpose()
    }

    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Vec<Activity>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM activities WHERE trip_id = $1",
            ACTIVITY_COLUMNS
        ))
        .bind(trip_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to fetch activities"))?;

        rows.iter().map(row_to_activity).collect()
    }

    async fn update(&self, activity: &Activity) -> Result<(), DomainError> {
        let day = day_param(activity.day())?;
        let coordinates = activity.location().coordinates;
        let booking = activity.booking_info().cloned().unwrap_or_default();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let locked: Option<(uuid::Uuid,)> = sqlx::query_as(
            "SELECT id FROM activities WHERE id = $1 AND trip_id = $2 FOR UPDATE",
        )
        .bind(activity.id().as_uuid())
        .bind(activity.trip_id().as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to lock activity"))?;
        if locked.is_none() {
            return Err(activity_not_found(activity.id()));
        }

        sqlx::query(
            r#"
            UPDATE activities SET
                day = $3,
                name = $4,
                description = $5,
                address = $6,
                latitude = $7,
                longitude = $8,
                start_time = $9,
                end_time = $10,
                cost = $11,
                category = $12,
                eco_rating = $13,
                booking_required = $14,
                booking_provider = $15,
                booking_url = $16,
                booking_reference = $17,
                notes = $18,
                updated_at = $19
            WHERE id = $1 AND trip_id = $2
            "#,
        )
        .bind(activity.id().as_uuid())
        .bind(activity.trip_id().as_uuid())
        .bind(day)
        .bind(activity.name())
        .bind(activity.description())
        .bind(&activity.location().address)
        .bind(coordinates.map(|c| c.latitude))
        .bind(coordinates.map(|c| c.longitude))
        .bind(activity.start_time().to_string())
        .bind(activity.end_time().to_string())
        .bind(activity.cost())
        .bind(activity.category().as_str())
        .bind(i16::from(activity.eco_rating()))
        .bind(activity.booking_required())
        .bind(booking.provider)
        .bind(booking.url)
        .bind(booking.reference)
        .bind(activity.notes())
        .bind(activity.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to update activity"))?;

        // Scheduled references follow the activity; unscheduled ones stay out.
        let (on_day, scheduled): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FILTER (WHERE day = $3), COUNT(*)
            FROM itinerary_entries
            WHERE trip_id = $1 AND activity_id = $2
            "#,
        )
        .bind(activity.trip_id().as_uuid())
        .bind(activity.id().as_uuid())
        .bind(day)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to read itinerary entries"))?;

        if scheduled > 0 && on_day == 0 {
            sqlx::query("DELETE FROM itinerary_entries WHERE trip_id = $1 AND activity_id = $2")
                .bind(activity.trip_id().as_uuid())
                .bind(activity.id().as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(db_error("Failed to clear itinerary entries"))?;
            sqlx::query(
                "INSERT INTO itinerary_entries (trip_id, day, activity_id) VALUES ($1, $2, $3)",
            )
            .bind(activity.trip_id().as_uuid())
            .bind(day)
            .bind(activity.id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to reschedule activity"))?;
            touch_trip(&mut tx, activity.trip_id()).await?;
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(())
    }

    async fn delete(&self, trip_id: &TripId, id: &ActivityId) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let result = sqlx::query("DELETE FROM activities WHERE id = $1 AND trip_id = $2")
            .bind(id.as_uuid())
            .bind(trip_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete activity"))?;

        if result.rows_affected() == 0 {
            return Err(activity_not_found(id));
        }
        touch_trip(&mut tx, trip_id).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(())
    }
}
