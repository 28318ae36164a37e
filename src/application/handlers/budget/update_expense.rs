//! UpdateExpenseHandler - Command handler for amending an expense.

use std::sync::Arc;

use super::parse_category;
use crate::application::handlers::access::owned_trip;
use crate::domain::budget::{Budget, BudgetError, ExpenseUpdate};
use crate::domain::foundation::{ExpenseId, TripId, UserId};
use crate::ports::{BudgetRepository, TripRepository};

/// Command to amend an expense in a named category.
#[derive(Debug, Clone)]
pub struct UpdateExpenseCommand {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub category: String,
    pub expense_id: ExpenseId,
    pub update: ExpenseUpdate,
}

/// Handler for amending expenses. `spent` moves by the amount difference.
pub struct UpdateExpenseHandler {
    trips: Arc<dyn TripRepository>,
    budgets: Arc<dyn BudgetRepository>,
}

impl UpdateExpenseHandler {
    pub fn new(trips: Arc<dyn TripRepository>, budgets: Arc<dyn BudgetRepository>) -> Self {
        Self { trips, budgets }
    }

    pub async fn handle(&self, cmd: UpdateExpenseCommand) -> Result<Budget, BudgetError> {
        owned_trip(self.trips.as_ref(), &cmd.trip_id, &cmd.user_id).await?;
        let category = parse_category(&cmd.category)?;

        let budget = self
            .budgets
            .update_expense(&cmd.trip_id, category, &cmd.expense_id, &cmd.update)
            .await?;

        tracing::info!(
            trip_id = %cmd.trip_id,
            expense_id = %cmd.expense_id,
            category = %category,
            "Expense updated"
        );
        Ok(budget)
    }
}
