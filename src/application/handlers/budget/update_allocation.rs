//! UpdateAllocationHandler - Command handler for one category's allocation.

use rust_decimal::Decimal;
use std::sync::Arc;

use super::parse_category;
use crate::application::handlers::access::owned_trip;
use crate::domain::budget::{Budget, BudgetError};
use crate::domain::foundation::{TripId, UserId};
use crate::ports::{BudgetRepository, TripRepository};

/// Command to set the allocation of one budget category.
#[derive(Debug, Clone)]
pub struct UpdateAllocationCommand {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub category: String,
    pub allocated: Decimal,
}

/// Handler for allocation changes. Spend and items stay as they are.
pub struct UpdateAllocationHandler {
    trips: Arc<dyn TripRepository>,
    budgets: Arc<dyn BudgetRepository>,
}

impl UpdateAllocationHandler {
    pub fn new(trips: Arc<dyn TripRepository>, budgets: Arc<dyn BudgetRepository>) -> Self {
        Self { trips, budgets }
    }

    pub async fn handle(&self, cmd: UpdateAllocationCommand) -> Result<Budget, BudgetError> {
        owned_trip(self.trips.as_ref(), &cmd.trip_id, &cmd.user_id).await?;
        let category = parse_category(&cmd.category)?;

        let budget = self
            .budgets
            .set_allocation(&cmd.trip_id, category, cmd.allocated)
            .await?;

        tracing::info!(
            trip_id = %cmd.trip_id,
            category = %category,
            allocated = %cmd.allocated,
            "Allocation updated"
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
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn changes_allocation_and_keeps_spend() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let item = ExpenseItem::create(NewExpense {
            description: "Train pass".to_string(),
            amount: dec!(45),
            date: date(2024, 4, 1),
            payment_method: PaymentMethod::DebitCard,
            receipt: None,
            notes: None,
        })
        .unwrap();
        store
            .append_expense(trip.id(), BudgetCategory::Transportation, &item)
            .await
            .unwrap();
        let handler = UpdateAllocationHandler::new(Arc::new(store.clone()), Arc::new(store));

        let budget = handler
            .handle(UpdateAllocationCommand {
                trip_id: *trip.id(),
                user_id: owner(),
                category: "transportation".to_string(),
                allocated: dec!(120),
            })
            .await
            .unwrap();

        let ledger = budget.category(BudgetCategory::Transportation);
        assert_eq!(ledger.allocated, dec!(120));
        assert_eq!(ledger.spent, dec!(45));
        assert_eq!(ledger.items.len(), 1);
    }

    #[tokio::test]
    async fn negative_allocation_is_rejected() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = UpdateAllocationHandler::new(Arc::new(store.clone()), Arc::new(store));

        let err = handler
            .handle(UpdateAllocationCommand {
                trip_id: *trip.id(),
                user_id: owner(),
                category: "food".to_string(),
                allocated: dec!(-10),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, BudgetError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn unknown_category_is_invalid_category() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = UpdateAllocationHandler::new(Arc::new(store.clone()), Arc::new(store));

        let err = handler
            .handle(UpdateAllocationCommand {
                trip_id: *trip.id(),
                user_id: owner(),
                category: "Food ".to_string(),
                allocated: dec!(10),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, BudgetError::InvalidCategory(_)));
    }
}
