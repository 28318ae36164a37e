//! PostgreSQL implementation of PackingRepository.
//!
//! Items live in their own rows, so toggling or deleting one never rewrites
//! its siblings.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::rows::{
    db_error, is_foreign_key_violation, item_not_found, load_packing_list, packing_list_not_found,
    quantity_param, row_to_item, trip_exists, trip_not_found, ITEM_COLUMNS,
};
use super::trip_repository::insert_packing_list;
use crate::domain::foundation::{DomainError, PackingItemId, TripId};
use crate::domain::packing::{PackingCategory, PackingItem, PackingList, WeatherCondition};
use crate::ports::PackingRepository;

#[derive(Clone)]
pub struct PostgresPackingRepository {
    pool: PgPool,
}

impl PostgresPackingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Locks a trip's packing list row and returns its id.
async fn lock_list(conn: &mut PgConnection, trip_id: &TripId) -> Result<Uuid, DomainError> {
    let row: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM packing_lists WHERE trip_id = $1 FOR UPDATE")
            .bind(trip_id.as_uuid())
            .fetch_optional(&mut *conn)
            .await
            .map_err(db_error("Failed to lock packing list"))?;
    row.map(|(id,)| id)
        .ok_or_else(|| packing_list_not_found(trip_id))
}

async fn list_id(conn: &mut PgConnection, trip_id: &TripId) -> Result<Uuid, DomainError> {
    let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM packing_lists WHERE trip_id = $1")
        .bind(trip_id.as_uuid())
        .fetch_optional(&mut *conn)
        .await
        .map_err(db_error("Failed to fetch packing list"))?;
    row.map(|(id,)| id)
        .ok_or_else(|| packing_list_not_found(trip_id))
}

async fn touch_list(conn: &mut PgConnection, list_id: Uuid) -> Result<(), DomainError> {
    sqlx::query("UPDATE packing_lists SET last_updated = NOW() WHERE id = $1")
        .bind(list_id)
        .execute(&mut *conn)
        .await
        .map_err(db_error("Failed to touch packing list"))?;
    Ok(())
}

#[async_trait]
impl PackingRepository for PostgresPackingRepository {
    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Option<PackingList>, DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_error("Failed to acquire connection"))?;
        load_packing_list(&mut conn, trip_id).await
    }

    async fn insert_default(&self, list: &PackingList) -> Result<PackingList, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;
        if !trip_exists(&mut tx, list.trip_id()).await? {
            return Err(trip_not_found(list.trip_id()));
        }
        insert_packing_list(&mut tx, list).await?;
        let stored = load_packing_list(&mut tx, list.trip_id())
            .await?
            .ok_or_else(|| packing_list_not_found(list.trip_id()))?;
        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(stored)
    }

    async fn update_settings(
        &self,
        trip_id: &TripId,
        weather_considerations: Option<Vec<WeatherCondition>>,
        special_requirements: Option<Vec<String>>,
    ) -> Result<PackingList, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;
        lock_list(&mut tx, trip_id).await?;
        let mut list = load_packing_list(&mut tx, trip_id)
            .await?
            .ok_or_else(|| packing_list_not_found(trip_id))?;
        list.update_settings(weather_considerations, special_requirements);

        let weather: Vec<&str> = list
            .weather_considerations()
            .iter()
            .map(|w| w.as_str())
            .collect();
        sqlx::query(
            r#"
            UPDATE packing_lists SET
                weather_considerations = $2,
                special_requirements = $3,
                last_updated = $4
            WHERE id = $1
            "#,
        )
        .bind(list.id().as_uuid())
        .bind(&weather)
        .bind(list.special_requirements())
        .bind(list.last_updated().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to update packing list"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(list)
    }

    async fn add_item(
        &self,
        trip_id: &TripId,
        category: PackingCategory,
        item: &PackingItem,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;
        let list_id = list_id(&mut tx, trip_id).await?;

        sqlx::query(
            r#"
            INSERT INTO packing_items (
                id, packing_list_id, trip_id, category, name, quantity, is_packed, notes, priority
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(list_id)
        .bind(trip_id.as_uuid())
        .bind(category.as_str())
        .bind(&item.name)
        .bind(quantity_param(item.quantity)?)
        .bind(item.is_packed)
        .bind(&item.notes)
        .bind(item.priority.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                packing_list_not_found(trip_id)
            } else {
                DomainError::database("Failed to insert packing item", e)
            }
        })?;
        touch_list(&mut tx, list_id).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(())
    }

    async fn set_item_packed(
        &self,
        trip_id: &TripId,
        category: PackingCategory,
        item_id: &PackingItemId,
        packed: Option<bool>,
    ) -> Result<PackingItem, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;
        let list_id = list_id(&mut tx, trip_id).await?;

        let row = sqlx::query(&format!(
            r#"
            UPDATE packing_items
            SET is_packed = COALESCE($4, NOT is_packed)
            WHERE id = $1 AND packing_list_id = $2 AND category = $3
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(item_id.as_uuid())
        .bind(list_id)
        .bind(category.as_str())
        .bind(packed)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to update packing item"))?;

        let Some(row) = row else {
            return Err(item_not_found(item_id));
        };
        let (_, item) = row_to_item(&row)?;
        touch_list(&mut tx, list_id).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(item)
    }

    async fn delete_item(
        &self,
        trip_id: &TripId,
        category: PackingCategory,
        item_id: &PackingItemId,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;
        let list_id = list_id(&mut tx, trip_id).await?;

        let result = sqlx::query(
            "DELETE FROM packing_items WHERE id = $1 AND packing_list_id = $2 AND category = $3",
        )
        .bind(item_id.as_uuid())
        .bind(list_id)
        .bind(category.as_str())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to delete packing item"))?;

        if result.rows_affected() == 0 {
            return Err(item_not_found(item_id));
        }
        touch_list(&mut tx, list_id).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(())
    }
}
