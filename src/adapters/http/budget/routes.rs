//! HTTP routes for budget endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    add_expense, delete_expense, get_budget, get_exchange_rate, get_summary, set_budget,
    update_allocation, update_expense, BudgetHandlers,
};

/// Creates the budget router. Paths are relative to `/api`.
pub fn budget_routes(handlers: BudgetHandlers) -> Router {
    Router::new()
        .route(
            "/budgets/:trip_id",
            get(get_budget).post(set_budget).put(set_budget),
        )
        .route("/budgets/:trip_id/expenses", post(add_expense))
        .route(
            "/budgets/:trip_id/expenses/:expense_id",
            put(update_expense).delete(delete_expense),
        )
        .route("/budgets/:trip_id/categories", put(update_allocation))
        .route("/budgets/:trip_id/summary", get(get_summary))
        .route("/budgets/:trip_id/exchange-rate", get(get_exchange_rate))
        .with_state(handlers)
}
