//! PostgreSQL implementation of BudgetRepository.
//!
//! Spend is never written as an absolute value from a read copy: every
//! expense change adjusts `spent` with an increment in the same transaction
//! as the expense row, so concurrent writers cannot lose updates.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::rows::{
    budget_not_found, db_error, expense_not_found, is_foreign_key_violation, load_budget,
    lock_budget, reload_budget, row_to_expense, trip_exists, trip_not_found,
};
use super::trip_repository::insert_budget;
use crate::domain::budget::{
    ensure_non_negative, Budget, BudgetCategory, BudgetSettings, ExchangeRateSnapshot,
    ExpenseItem, ExpenseUpdate,
};
use crate::domain::foundation::{DomainError, ExpenseId, TripId};
use crate::ports::BudgetRepository;

#[derive(Clone)]
pub struct PostgresBudgetRepository {
    pool: PgPool,
}

impl PostgresBudgetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Adds `delta` to a category's spend, creating the ledger row if needed.
async fn adjust_spent(
    conn: &mut PgConnection,
    budget_id: Uuid,
    trip_id: &TripId,
    category: BudgetCategory,
    delta: Decimal,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO budget_categories (budget_id, trip_id, name, allocated, spent)
        VALUES ($1, $2, $3, 0, $4)
        ON CONFLICT (budget_id, name)
        DO UPDATE SET spent = budget_categories.spent + EXCLUDED.spent
        "#,
    )
    .bind(budget_id)
    .bind(trip_id.as_uuid())
    .bind(category.as_str())
    .bind(delta)
    .execute(&mut *conn)
    .await
    .map_err(db_error("Failed to adjust category spend"))?;
    Ok(())
}

async fn set_allocated(
    conn: &mut PgConnection,
    budget_id: Uuid,
    trip_id: &TripId,
    category: BudgetCategory,
    allocated: Decimal,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO budget_categories (budget_id, trip_id, name, allocated, spent)
        VALUES ($1, $2, $3, $4, 0)
        ON CONFLICT (budget_id, name)
        DO UPDATE SET allocated = EXCLUDED.allocated
        "#,
    )
    .bind(budget_id)
    .bind(trip_id.as_uuid())
    .bind(category.as_str())
    .bind(allocated)
    .execute(&mut *conn)
    .await
    .map_err(db_error("Failed to set category allocation"))?;
    Ok(())
}

async fn touch_budget(conn: &mut PgConnection, budget_id: Uuid) -> Result<(), DomainError> {
    sqlx::query("UPDATE budgets SET last_updated = NOW() WHERE id = $1")
        .bind(budget_id)
        .execute(&mut *conn)
        .await
        .map_err(db_error("Failed to touch budget"))?;
    Ok(())
}

/// Fetches one expense of a category, locking its row.
async fn lock_expense(
    conn: &mut PgConnection,
    budget_id: Uuid,
    category: BudgetCategory,
    expense_id: &ExpenseId,
) -> Result<ExpenseItem, DomainError> {
    let row = sqlx::query(
        r#"
        SELECT id, description, amount, expense_date, payment_method, receipt, notes
        FROM expense_items
        WHERE id = $1 AND budget_id = $2 AND category = $3
        FOR UPDATE
        "#,
    )
    .bind(expense_id.as_uuid())
    .bind(budget_id)
    .bind(category.as_str())
    .fetch_optional(&mut *conn)
    .await
    .map_err(db_error("Failed to fetch expense"))?;

    match row {
        Some(row) => row_to_expense(&row),
        None => Err(expense_not_found(expense_id)),
    }
}

#[async_trait]
impl BudgetRepository for PostgresBudgetRepository {
    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Option<Budget>, DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_error("Failed to acquire connection"))?;
        load_budget(&mut conn, trip_id).await
    }

    async fn insert_default(&self, budget: &Budget) -> Result<Budget, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;
        if !trip_exists(&mut tx, budget.trip_id()).await? {
            return Err(trip_not_found(budget.trip_id()));
        }
        insert_budget(&mut tx, budget).await?;
        let stored = reload_budget(&mut tx, budget.trip_id()).await?;
        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(stored)
    }

    async fn apply_settings(
        &self,
        trip_id: &TripId,
        settings: &BudgetSettings,
    ) -> Result<Budget, DomainError> {
        settings.validate()?;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;
        let budget_id = lock_budget(&mut tx, trip_id).await?;

        sqlx::query(
            r#"
            UPDATE budgets SET
                total_budget = $2,
                currency = $3,
                savings = COALESCE($4, savings),
                emergency_fund = COALESCE($5, emergency_fund),
                last_updated = NOW()
            WHERE id = $1
            "#,
        )
        .bind(budget_id)
        .bind(settings.total_budget)
        .bind(settings.currency.as_str())
        .bind(settings.savings)
        .bind(settings.emergency_fund)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to update budget"))?;

        for (category, amount) in &settings.allocations {
            set_allocated(&mut tx, budget_id, trip_id, *category, *amount).await?;
        }

        let budget = reload_budget(&mut tx, trip_id).await?;
        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(budget)
    }

    async fn set_allocation(
        &self,
        trip_id: &TripId,
        category: BudgetCategory,
        allocated: Decimal,
    ) -> Result<Budget, DomainError> {
        ensure_non_negative("allocated", allocated)?;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;
        let budget_id = lock_budget(&mut tx, trip_id).await?;
        set_allocated(&mut tx, budget_id, trip_id, category, allocated).await?;
        touch_budget(&mut tx, budget_id).await?;

        let budget = reload_budget(&mut tx, trip_id).await?;
        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(budget)
    }

    async fn append_expense(
        &self,
        trip_id: &TripId,
        category: BudgetCategory,
        item: &ExpenseItem,
    ) -> Result<Budget, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let budget_id: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM budgets WHERE trip_id = $1")
            .bind(trip_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("Failed to fetch budget"))?;
        let (budget_id,) = budget_id.ok_or_else(|| budget_not_found(trip_id))?;

        sqlx::query(
            r#"
            INSERT INTO expense_items (
                id, budget_id, trip_id, category, description, amount,
                expense_date, payment_method, receipt, notes
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(budget_id)
        .bind(trip_id.as_uuid())
        .bind(category.as_str())
        .bind(&item.description)
        .bind(item.amount)
        .bind(item.date)
        .bind(item.payment_method.as_str())
        .bind(&item.receipt)
        .bind(&item.notes)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                budget_not_found(trip_id)
            } else {
                DomainError::database("Failed to insert expense", e)
            }
        })?;

        // The ledger row lock taken here serializes concurrent appends.
        adjust_spent(&mut tx, budget_id, trip_id, category, item.amount).await?;
        touch_budget(&mut tx, budget_id).await?;

        let budget = reload_budget(&mut tx, trip_id).await?;
        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(budget)
    }

    async fn update_expense(
        &self,
        trip_id: &TripId,
        category: BudgetCategory,
        expense_id: &ExpenseId,
        update: &ExpenseUpdate,
    ) -> Result<Budget, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;
        let budget_id = lock_budget(&mut tx, trip_id).await?;
        let current = lock_expense(&mut tx, budget_id, category, expense_id).await?;
        let amended = current.amended(update)?;

        sqlx::query(
            r#"
            UPDATE expense_items SET
                description = $2,
                amount = $3,
                expense_date = $4,
                payment_method = $5,
                receipt = $6,
                notes = $7
            WHERE id = $1
            "#,
        )
        .bind(expense_id.as_uuid())
        .bind(&amended.description)
        .bind(amended.amount)
        .bind(amended.date)
        .bind(amended.payment_method.as_str())
        .bind(&amended.receipt)
        .bind(&amended.notes)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to update expense"))?;

        let delta = amended
            .amount
            .checked_sub(current.amount)
            .ok_or_else(|| DomainError::validation("amount", "Expense amount out of range"))?;
        if !delta.is_zero() {
            adjust_spent(&mut tx, budget_id, trip_id, category, delta).await?;
        }
        touch_budget(&mut tx, budget_id).await?;

        let budget = reload_budget(&mut tx, trip_id).await?;
        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(budget)
    }

    async fn delete_expense(
        &self,
        trip_id: &TripId,
        category: BudgetCategory,
        expense_id: &ExpenseId,
    ) -> Result<Budget, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;
        let budget_id = lock_budget(&mut tx, trip_id).await?;
        let current = lock_expense(&mut tx, budget_id, category, expense_id).await?;

        sqlx::query("DELETE FROM expense_items WHERE id = $1")
            .bind(expense_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete expense"))?;
        adjust_spent(&mut tx, budget_id, trip_id, category, -current.amount).await?;
        touch_budget(&mut tx, budget_id).await?;

        let budget = reload_budget(&mut tx, trip_id).await?;
        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(budget)
    }

    async fn record_exchange_rate(
        &self,
        trip_id: &TripId,
        snapshot: &ExchangeRateSnapshot,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE budgets SET
                rate_from = $2,
                rate_to = $3,
                rate = $4,
                rate_fetched_at = $5,
                last_updated = NOW()
            WHERE trip_id = $1
            "#,
        )
        .bind(trip_id.as_uuid())
        .bind(snapshot.from.as_str())
        .bind(snapshot.to.as_str())
        .bind(snapshot.rate)
        .bind(snapshot.fetched_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to record exchange rate"))?;

        if result.rows_affected() == 0 {
            return Err(budget_not_found(trip_id));
        }
        Ok(())
    }
}
