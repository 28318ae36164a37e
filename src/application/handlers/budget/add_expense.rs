//! AddExpenseHandler - Command handler for recording an expense.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::parse_category;
use crate::application::handlers::access::owned_trip;
use crate::domain::budget::{Budget, BudgetError, ExpenseItem, NewExpense, PaymentMethod};
use crate::domain::foundation::{TripId, UserId};
use crate::ports::{BudgetRepository, TripRepository};

/// Command to add an expense to one budget category.
#[derive(Debug, Clone)]
pub struct AddExpenseCommand {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub receipt: Option<String>,
    pub notes: Option<String>,
}

/// Result of recording an expense.
#[derive(Debug, Clone)]
pub struct AddExpenseResult {
    pub expense: ExpenseItem,
    pub budget: Budget,
}

/// Handler for adding expenses.
///
/// The item append and the category's `spent` increment are a single
/// repository call, so concurrent expenses in one category all count.
pub struct AddExpenseHandler {
    trips: Arc<dyn TripRepository>,
    budgets: Arc<dyn BudgetRepository>,
}

impl AddExpenseHandler {
    pub fn new(trips: Arc<dyn TripRepository>, budgets: Arc<dyn BudgetRepository>) -> Self {
        Self { trips, budgets }
    }

    pub async fn handle(&self, cmd: AddExpenseCommand) -> Result<AddExpenseResult, BudgetError> {
        owned_trip(self.trips.as_ref(), &cmd.trip_id, &cmd.user_id).await?;
        let category = parse_category(&cmd.category)?;

        let expense = ExpenseItem::create(NewExpense {
            description: cmd.description,
            amount: cmd.amount,
            date: cmd.date,
            payment_method: cmd.payment_method,
            receipt: cmd.receipt,
            notes: cmd.notes,
        })?;

        let budget = self
            .budgets
            .append_expense(&cmd.trip_id, category, &expense)
            .await?;

        tracing::info!(
            trip_id = %cmd.trip_id,
            expense_id = %expense.id,
            category = %category,
            amount = %expense.amount,
            "Expense recorded"
        );
        Ok(AddExpenseResult { expense, budget })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::application::handlers::testing::{date, intruder, owner, seed_trip};
    use crate::domain::budget::BudgetCategory;
    use rust_decimal_macros::dec;

    fn command(trip_id: TripId, category: &str, amount: Decimal) -> AddExpenseCommand {
        AddExpenseCommand {
            trip_id,
            user_id: owner(),
            category: category.to_string(),
            description: "Ramen".to_string(),
            amount,
            date: date(2024, 4, 2),
            payment_method: PaymentMethod::Cash,
            receipt: None,
            notes: None,
        }
    }

    fn handler(store: &MemoryStore) -> AddExpenseHandler {
        AddExpenseHandler::new(Arc::new(store.clone()), Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn appends_item_and_increments_spent() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;

        let result = handler(&store)
            .handle(command(*trip.id(), "food", dec!(18.50)))
            .await
            .unwrap();

        let food = result.budget.category(BudgetCategory::Food);
        assert_eq!(food.spent, dec!(18.50));
        assert_eq!(food.items, vec![result.expense.clone()]);
        assert_eq!(result.budget.total_spent(), dec!(18.50));
    }

    #[tokio::test]
    async fn unknown_category_is_invalid_category() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;

        let err = handler(&store)
            .handle(command(*trip.id(), "souvenirs", dec!(5)))
            .await
            .unwrap_err();

        assert_eq!(err, BudgetError::InvalidCategory("souvenirs".to_string()));
    }

    #[tokio::test]
    async fn non_positive_amount_is_rejected() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;

        for amount in [dec!(0), dec!(-3)] {
            let err = handler(&store)
                .handle(command(*trip.id(), "food", amount))
                .await
                .unwrap_err();
            assert!(matches!(err, BudgetError::ValidationFailed { ref field, .. } if field == "amount"));
        }
    }

    #[tokio::test]
    async fn deleted_trip_is_trip_not_found() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        store.delete_cascade(trip.id()).await.unwrap();

        let err = handler(&store)
            .handle(command(*trip.id(), "food", dec!(5)))
            .await
            .unwrap_err();

        assert_eq!(err, BudgetError::TripNotFound(*trip.id()));
    }

    #[tokio::test]
    async fn other_users_are_forbidden() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let mut cmd = command(*trip.id(), "food", dec!(5));
        cmd.user_id = intruder();

        assert_eq!(handler(&store).handle(cmd).await.unwrap_err(), BudgetError::Forbidden);
    }
}
