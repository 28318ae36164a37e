//! Budget repository port.
//!
//! Every mutation is a targeted, atomic update of one budget. In particular
//! an expense append and its category `spent` increment happen together,
//! so concurrent writers to one category never lose an increment.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::budget::{
    Budget, BudgetCategory, BudgetSettings, ExchangeRateSnapshot, ExpenseItem, ExpenseUpdate,
};
use crate::domain::foundation::{DomainError, ExpenseId, TripId};

/// Repository port for Budget persistence.
///
/// Mutations fail with `BudgetNotFound` (keyed by `trip_id`) when the trip
/// has no budget, which includes the trip having been deleted.
#[async_trait]
pub trait BudgetRepository: Send + Sync {
    /// Finds the budget of a trip.
    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Option<Budget>, DomainError>;

    /// Stores a default budget for a trip that lacks one and returns the
    /// budget now stored, which is an existing one if another writer won.
    ///
    /// # Errors
    ///
    /// - `TripNotFound` if the trip no longer exists
    async fn insert_default(&self, budget: &Budget) -> Result<Budget, DomainError>;

    /// Replaces total, currency and the named allocations.
    async fn apply_settings(
        &self,
        trip_id: &TripId,
        settings: &BudgetSettings,
    ) -> Result<Budget, DomainError>;

    /// Sets one category's allocation.
    async fn set_allocation(
        &self,
        trip_id: &TripId,
        category: BudgetCategory,
        allocated: Decimal,
    ) -> Result<Budget, DomainError>;

    /// Appends an expense and increments the category's spend atomically.
    async fn append_expense(
        &self,
        trip_id: &TripId,
        category: BudgetCategory,
        item: &ExpenseItem,
    ) -> Result<Budget, DomainError>;

    /// Amends an expense, adjusting spend by the differential atomically.
    ///
    /// # Errors
    ///
    /// - `ExpenseNotFound` if the expense is not in `category`
    async fn update_expense(
        &self,
        trip_id: &TripId,
        category: BudgetCategory,
        expense_id: &ExpenseId,
        update: &ExpenseUpdate,
    ) -> Result<Budget, DomainError>;

    /// Removes an expense, subtracting its amount from spend atomically.
    async fn delete_expense(
        &self,
        trip_id: &TripId,
        category: BudgetCategory,
        expense_id: &ExpenseId,
    ) -> Result<Budget, DomainError>;

    /// Caches an exchange-rate lookup on the budget.
    async fn record_exchange_rate(
        &self,
        trip_id: &TripId,
        snapshot: &ExchangeRateSnapshot,
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn BudgetRepository) {}
    }
}
