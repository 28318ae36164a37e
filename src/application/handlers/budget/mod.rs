//! Budget ledger command and query handlers.

mod add_expense;
mod delete_expense;
mod get_budget;
mod get_exchange_rate;
mod get_summary;
mod set_budget;
mod update_allocation;
mod update_expense;

pub use add_expense::{AddExpenseCommand, AddExpenseHandler, AddExpenseResult};
pub use delete_expense::{DeleteExpenseCommand, DeleteExpenseHandler};
pub use get_budget::{GetBudgetHandler, GetBudgetQuery};
pub use get_exchange_rate::{GetExchangeRateHandler, GetExchangeRateQuery};
pub use get_summary::{GetBudgetSummaryHandler, GetBudgetSummaryQuery};
pub use set_budget::{SetBudgetCommand, SetBudgetHandler};
pub use update_allocation::{UpdateAllocationCommand, UpdateAllocationHandler};
pub use update_expense::{UpdateExpenseCommand, UpdateExpenseHandler};

use crate::domain::budget::{BudgetCategory, BudgetError};

fn parse_category(name: &str) -> Result<BudgetCategory, BudgetError> {
    name.parse()
        .map_err(|err: crate::domain::foundation::UnknownCategory| BudgetError::invalid_category(err.0))
}
