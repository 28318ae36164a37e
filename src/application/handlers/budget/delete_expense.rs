//! DeleteExpenseHandler - Command handler for removing an expense.

use std::sync::Arc;

use super::parse_category;
use crate::application::handlers::access::owned_trip;
use crate::domain::budget::{Budget, BudgetError};
use crate::domain::foundation::{ExpenseId, TripId, UserId};
use crate::ports::{BudgetRepository, TripRepository};

/// Command to delete an expense from a named category.
#[derive(Debug, Clone)]
pub struct DeleteExpenseCommand {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub category: String,
    pub expense_id: ExpenseId,
}

pub struct DeleteExpenseHandler {
    trips: Arc<dyn TripRepository>,
    budgets: Arc<dyn BudgetRepository>,
}

impl DeleteExpenseHandler {
    pub fn new(trips: Arc<dyn TripRepository>, budgets: Arc<dyn BudgetRepository>) -> Self {
        Self { trips, budgets }
    }

    pub async fn handle(&self, cmd: DeleteExpenseCommand) -> Result<Budget, BudgetError> {
        owned_trip(self.trips.as_ref(), &cmd.trip_id, &cmd.user_id).await?;
        let category = parse_category(&cmd.category)?;

        let budget = self
            .budgets
            .delete_expense(&cmd.trip_id, category, &cmd.expense_id)
            .await?;

        tracing::info!(
            trip_id = %cmd.trip_id,
            expense_id = %cmd.expense_id,
            category = %category,
            "Expense deleted"
        );
        Ok(budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::application::handlers::testing::{date, owner, seed_trip};
    use crate::domain::budget::{BudgetCategory, ExpenseItem, NewExpense, PaymentMethod};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn expense(amount: Decimal) -> ExpenseItem {
        ExpenseItem::create(NewExpense {
            description: "Matcha".to_string(),
            amount,
            date: date(2024, 4, 3),
            payment_method: PaymentMethod::MobilePayment,
            receipt: None,
            notes: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn removes_item_and_subtracts_amount() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let keep = expense(dec!(12));
        let drop = expense(dec!(7.25));
        store.append_expense(trip.id(), BudgetCategory::Food, &keep).await.unwrap();
        store.append_expense(trip.id(), BudgetCategory::Food, &drop).await.unwrap();
        let handler = DeleteExpenseHandler::new(Arc::new(store.clone()), Arc::new(store));

        let budget = handler
            .handle(DeleteExpenseCommand {
                trip_id: *trip.id(),
                user_id: owner(),
                category: "food".to_string(),
                expense_id: drop.id,
            })
            .await
            .unwrap();

        let food = budget.category(BudgetCategory::Food);
        assert_eq!(food.spent, dec!(12));
        assert_eq!(food.items, vec![keep]);
    }

    #[tokio::test]
    async fn wrong_category_is_not_found_and_changes_nothing() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let item = expense(dec!(18.50));
        store.append_expense(trip.id(), BudgetCategory::Food, &item).await.unwrap();
        let handler = DeleteExpenseHandler::new(Arc::new(store.clone()), Arc::new(store.clone()));

        let err = handler
            .handle(DeleteExpenseCommand {
                trip_id: *trip.id(),
                user_id: owner(),
                category: "shopping".to_string(),
                expense_id: item.id,
            })
            .await
            .unwrap_err();

        assert_eq!(err, BudgetError::ExpenseNotFound(item.id));
        let budget = store.find_by_trip(trip.id()).await.unwrap().unwrap();
        assert_eq!(budget.category(BudgetCategory::Food).spent, dec!(18.50));
    }
}
