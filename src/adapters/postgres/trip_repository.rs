//! PostgreSQL implementation of TripRepository.
//!
//! Creation writes the trip, its budget (with one row per category) and its
//! packing list in one transaction. Deletion relies on `ON DELETE CASCADE`
//! from `trips(id)`, counting dependents inside the same transaction first.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::rows::{
    activity_not_found, day_param, db_error, is_foreign_key_violation, load_itineraries,
    load_trip, row_to_trip, trip_exists, trip_not_found, TRIP_COLUMNS,
};
use crate::domain::budget::Budget;
use crate::domain::foundation::{ActivityId, DomainError, TripId, UserId};
use crate::domain::packing::PackingList;
use crate::domain::trip::{CascadeReport, DependentCounts, Itinerary, Trip, TripFilter, TripUpdate};
use crate::ports::TripRepository;

#[derive(Clone)]
pub struct PostgresTripRepository {
    pool: PgPool,
}

impl PostgresTripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Inserts a budget row plus one ledger row per category.
///
/// Leaves an existing budget for the trip untouched.
pub(super) async fn insert_budget(conn: &mut PgConnection, budget: &Budget) -> Result<(), DomainError> {
    let inserted = sqlx::query(
        r#"
        INSERT INTO budgets (
            id, trip_id, total_budget, currency, savings, emergency_fund, last_updated
        ) VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (trip_id) DO NOTHING
        "#,
    )
    .bind(budget.id().as_uuid())
    .bind(budget.trip_id().as_uuid())
    .bind(budget.total_budget())
    .bind(budget.currency().as_str())
    .bind(budget.savings())
    .bind(budget.emergency_fund())
    .bind(budget.last_updated().as_datetime())
    .execute(&mut *conn)
    .await
    .map_err(|e| {
        if is_foreign_key_violation(&e) {
            trip_not_found(budget.trip_id())
        } else {
            DomainError::database("Failed to insert budget", e)
        }
    })?;
    if inserted.rows_affected() == 0 {
        return Ok(());
    }

    for ledger in budget.categories() {
        sqlx::query(
            r#"
            INSERT INTO budget_categories (budget_id, trip_id, name, allocated, spent)
            SELECT id, trip_id, $2, $3, $4 FROM budgets WHERE trip_id = $1
            ON CONFLICT (budget_id, name) DO NOTHING
            "#,
        )
        .bind(budget.trip_id().as_uuid())
        .bind(ledger.name.as_str())
        .bind(ledger.allocated)
        .bind(ledger.spent)
        .execute(&mut *conn)
        .await
        .map_err(db_error("Failed to insert budget category"))?;
    }
    Ok(())
}

pub(super) async fn insert_packing_list(
    conn: &mut PgConnection,
    list: &PackingList,
) -> Result<(), DomainError> {
    let weather: Vec<&str> = list.weather_considerations().iter().map(|w| w.as_str()).collect();
    sqlx::query(
        r#"
        INSERT INTO packing_lists (
            id, trip_id, weather_considerations, special_requirements, last_updated
        ) VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (trip_id) DO NOTHING
        "#,
    )
    .bind(list.id().as_uuid())
    .bind(list.trip_id().as_uuid())
    .bind(&weather)
    .bind(list.special_requirements())
    .bind(list.last_updated().as_datetime())
    .execute(&mut *conn)
    .await
    .map_err(|e| {
        if is_foreign_key_violation(&e) {
            trip_not_found(list.trip_id())
        } else {
            DomainError::database("Failed to insert packing list", e)
        }
    })?;
    Ok(())
}

async fn count_for(conn: &mut PgConnection, id: &TripId) -> Result<DependentCounts, DomainError> {
    let (budgets, packing_lists, activities): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM budgets WHERE trip_id = $1),
            (SELECT COUNT(*) FROM packing_lists WHERE trip_id = $1),
            (SELECT COUNT(*) FROM activities WHERE trip_id = $1)
        "#,
    )
    .bind(id.as_uuid())
    .fetch_one(&mut *conn)
    .await
    .map_err(db_error("Failed to count trip dependents"))?;

    Ok(DependentCounts {
        budgets: budgets as u64,
        packing_lists: packing_lists as u64,
        activities: activities as u64,
    })
}

#[async_trait]
impl TripRepository for PostgresTripRepository {
    async fn create_with_dependents(
        &self,
        trip: &Trip,
        budget: &Budget,
        packing_list: &PackingList,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        sqlx::query(
            r#"
            INSERT INTO trips (
                id, user_id, title, description, start_date, end_date, status,
                is_public, tags, destinations, budget_id, packing_list_id,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(trip.id().as_uuid())
        .bind(trip.user_id().as_str())
        .bind(trip.title())
        .bind(trip.description())
        .bind(trip.start_date())
        .bind(trip.end_date())
        .bind(trip.status().as_str())
        .bind(trip.is_public())
        .bind(trip.tags())
        .bind(trip.destinations())
        .bind(trip.budget_id().as_uuid())
        .bind(trip.packing_list_id().as_uuid())
        .bind(trip.created_at().as_datetime())
        .bind(trip.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to insert trip"))?;

        insert_budget(&mut tx, budget).await?;
        insert_packing_list(&mut tx, packing_list).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_error("Failed to acquire connection"))?;
        load_trip(&mut conn, id).await
    }

    async fn find_by_owner(
        &self,
        owner: &UserId,
        filter: &TripFilter,
    ) -> Result<Vec<Trip>, DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_error("Failed to acquire connection"))?;

        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM trips
            WHERE user_id = $1
              AND ($2::TEXT IS NULL OR status = $2)
              AND ($3::DATE IS NULL OR start_date >= $3)
              AND ($4::DATE IS NULL OR end_date <= $4)
            ORDER BY start_date, created_at
            "#,
            TRIP_COLUMNS
        ))
        .bind(owner.as_str())
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.starts_on_or_after)
        .bind(filter.ends_on_or_before)
        .fetch_all(&mut *conn)
        .await
        .map_err(db_error("Failed to fetch trips by owner"))?;

        let mut ids = Vec::with_capacity(rows.len());
        for row in &rows {
            ids.push(sqlx::Row::try_get::<Uuid, _>(row, "id").map_err(db_error("Failed to decode trip id"))?);
        }
        let mut itineraries = load_itineraries(&mut conn, &ids).await?;

        rows.iter()
            .zip(ids)
            .map(|(row, id)| {
                let itinerary = itineraries
                    .iter()
                    .position(|(trip_id, _)| *trip_id == id)
                    .map(|index| itineraries.swap_remove(index).1)
                    .unwrap_or_else(Itinerary::new);
                row_to_trip(row, itinerary)
            })
            .collect()
    }

    async fn apply_update(&self, id: &TripId, update: &TripUpdate) -> Result<Trip, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let locked: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM trips WHERE id = $1 FOR UPDATE")
            .bind(id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("Failed to lock trip"))?;
        if locked.is_none() {
            return Err(trip_not_found(id));
        }
        let mut trip = load_trip(&mut tx, id)
            .await?
            .ok_or_else(|| trip_not_found(id))?;
        trip.apply_update(update.clone())?;

        sqlx::query(
            r#"
            UPDATE trips SET
                title = $2,
                description = $3,
                start_date = $4,
                end_date = $5,
                status = $6,
                is_public = $7,
                tags = $8,
                destinations = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(trip.id().as_uuid())
        .bind(trip.title())
        .bind(trip.description())
        .bind(trip.start_date())
        .bind(trip.end_date())
        .bind(trip.status().as_str())
        .bind(trip.is_public())
        .bind(trip.tags())
        .bind(trip.destinations())
        .bind(trip.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to update trip"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(trip)
    }

    async fn delete_cascade(&self, id: &TripId) -> Result<CascadeReport, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let locked: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM trips WHERE id = $1 FOR UPDATE")
            .bind(id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("Failed to lock trip"))?;
        if locked.is_none() {
            return Err(trip_not_found(id));
        }

        let before = count_for(&mut tx, id).await?;

        sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete trip"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        Ok(CascadeReport {
            budgets_removed: before.budgets,
            packing_lists_removed: before.packing_lists,
            activities_removed: before.activities,
        })
    }

    async fn count_dependents(&self, id: &TripId) -> Result<DependentCounts, DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_error("Failed to acquire connection"))?;
        count_for(&mut conn, id).await
    }

    async fn add_itinerary_entry(
        &self,
        trip_id: &TripId,
        day: u32,
        activity_id: &ActivityId,
    ) -> Result<bool, DomainError> {
        let day = day_param(day)?;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        if !trip_exists(&mut tx, trip_id).await? {
            return Err(trip_not_found(trip_id));
        }
        let (owned,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM activities WHERE id = $1 AND trip_id = $2")
                .bind(activity_id.as_uuid())
                .bind(trip_id.as_uuid())
                .fetch_one(&mut *tx)
                .await
                .map_err(db_error("Failed to check activity"))?;
        if owned == 0 {
            return Err(activity_not_found(activity_id));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO itinerary_entries (trip_id, day, activity_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (trip_id, day, activity_id) DO NOTHING
            "#,
        )
        .bind(trip_id.as_uuid())
        .bind(day)
        .bind(activity_id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                trip_not_found(trip_id)
            } else {
                DomainError::database("Failed to add itinerary entry", e)
            }
        })?;

        if result.rows_affected() > 0 {
            touch_trip(&mut tx, trip_id).await?;
        }
        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove_itinerary_entry(
        &self,
        trip_id: &TripId,
        day: u32,
        activity_id: &ActivityId,
    ) -> Result<bool, DomainError> {
        let day = day_param(day)?;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        if !trip_exists(&mut tx, trip_id).await? {
            return Err(trip_not_found(trip_id));
        }
        let result = sqlx::query(
            "DELETE FROM itinerary_entries WHERE trip_id = $1 AND day = $2 AND activity_id = $3",
        )
        .bind(trip_id.as_uuid())
        .bind(day)
        .bind(activity_id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to remove itinerary entry"))?;

        if result.rows_affected() > 0 {
            touch_trip(&mut tx, trip_id).await?;
        }
        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(result.rows_affected() > 0)
    }
}

pub(super) async fn touch_trip(conn: &mut PgConnection, trip_id: &TripId) -> Result<(), DomainError> {
    sqlx::query("UPDATE trips SET updated_at = NOW() WHERE id = $1")
        .bind(trip_id.as_uuid())
        .execute(&mut *conn)
        .await
        .map_err(db_error("Failed to touch trip"))?;
    Ok(())
}
