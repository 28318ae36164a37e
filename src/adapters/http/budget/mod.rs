//! HTTP adapter for the budget ledger.

mod dto;
mod handlers;
mod routes;

pub use dto::{BudgetResponse, ExpenseResponse};
pub use handlers::BudgetHandlers;
pub use routes::budget_routes;
