//! HTTP handlers for budget endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    response::Response,
    Json,
};
use chrono::Utc;

use crate::adapters::http::envelope::{json_body, ok, parse_id, query_params, ApiError};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::budget::{
    AddExpenseCommand, AddExpenseHandler, DeleteExpenseCommand, DeleteExpenseHandler,
    GetBudgetHandler, GetBudgetQuery, GetBudgetSummaryHandler, GetBudgetSummaryQuery,
    GetExchangeRateHandler, GetExchangeRateQuery, SetBudgetCommand, SetBudgetHandler,
    UpdateAllocationCommand, UpdateAllocationHandler, UpdateExpenseCommand, UpdateExpenseHandler,
};
use crate::domain::budget::{BudgetError, ExpenseUpdate, PaymentMethod};
use crate::domain::foundation::{DomainError, ExpenseId, TripId};

use super::dto::{
    AddExpenseRequest, BudgetResponse, BudgetSummaryResponse, CategoryQuery, ExchangeRateParams,
    ExchangeRateResponse, ExpenseAddedResponse, ExpenseResponse, SetBudgetRequest,
    UpdateAllocationRequest, UpdateExpenseRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct BudgetHandlers {
    pub set_budget: Arc<SetBudgetHandler>,
    pub get_budget: Arc<GetBudgetHandler>,
    pub add_expense: Arc<AddExpenseHandler>,
    pub update_expense: Arc<UpdateExpenseHandler>,
    pub delete_expense: Arc<DeleteExpenseHandler>,
    pub update_allocation: Arc<UpdateAllocationHandler>,
    pub get_summary: Arc<GetBudgetSummaryHandler>,
    pub get_exchange_rate: Arc<GetExchangeRateHandler>,
}

fn payment_method(raw: Option<&str>) -> Result<Option<PaymentMethod>, ApiError> {
    raw.map(|value| {
        PaymentMethod::parse(value)
            .map_err(|err| ApiError::from(BudgetError::from(DomainError::from(err))))
    })
    .transpose()
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST|PUT /api/budgets/:trip_id - Set total, currency and allocations
pub async fn set_budget(
    State(handlers): State<BudgetHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
    payload: Result<Json<SetBudgetRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let trip_id: TripId = parse_id("tripId", &trip_id)?;
    let req = json_body(payload)?;

    let cmd = SetBudgetCommand {
        trip_id,
        user_id: user.id,
        total_budget: req.total_budget,
        currency: req.currency,
        allocations: req
            .categories
            .into_iter()
            .map(|c| (c.name, c.allocated))
            .collect(),
        savings: req.savings,
        emergency_fund: req.emergency_fund,
    };

    let budget = handlers.set_budget.handle(cmd).await?;
    Ok(ok(BudgetResponse::from(&budget)))
}

/// GET /api/budgets/:trip_id
pub async fn get_budget(
    State(handlers): State<BudgetHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
) -> Result<Response, ApiError> {
    let query = GetBudgetQuery {
        trip_id: parse_id("tripId", &trip_id)?,
        user_id: user.id,
    };
    let budget = handlers.get_budget.handle(query).await?;
    Ok(ok(BudgetResponse::from(&budget)))
}

/// POST /api/budgets/:trip_id/expenses
pub async fn add_expense(
    State(handlers): State<BudgetHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
    payload: Result<Json<AddExpenseRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let trip_id: TripId = parse_id("tripId", &trip_id)?;
    let req = json_body(payload)?;

    let cmd = AddExpenseCommand {
        trip_id,
        user_id: user.id,
        category: req.category,
        description: req.description,
        amount: req.amount,
        date: req.date.unwrap_or_else(|| Utc::now().date_naive()),
        payment_method: payment_method(req.payment_method.as_deref())?.unwrap_or_default(),
        receipt: req.receipt,
        notes: req.notes,
    };

    let result = handlers.add_expense.handle(cmd).await?;
    Ok(ok(ExpenseAddedResponse {
        expense: ExpenseResponse::from(&result.expense),
        budget: BudgetResponse::from(&result.budget),
    }))
}

/// PUT /api/budgets/:trip_id/expenses/:expense_id
pub async fn update_expense(
    State(handlers): State<BudgetHandlers>,
    RequireAuth(user): RequireAuth,
    Path((trip_id, expense_id)): Path<(String, String)>,
    payload: Result<Json<UpdateExpenseRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let trip_id: TripId = parse_id("tripId", &trip_id)?;
    let expense_id: ExpenseId = parse_id("expenseId", &expense_id)?;
    let req = json_body(payload)?;

    let cmd = UpdateExpenseCommand {
        trip_id,
        user_id: user.id,
        category: req.category,
        expense_id,
        update: ExpenseUpdate {
            description: req.description,
            amount: req.amount,
            date: req.date,
            payment_method: payment_method(req.payment_method.as_deref())?,
            receipt: req.receipt,
            notes: req.notes,
        },
    };

    let budget = handlers.update_expense.handle(cmd).await?;
    Ok(ok(BudgetResponse::from(&budget)))
}

/// DELETE /api/budgets/:trip_id/expenses/:expense_id?category=
pub async fn delete_expense(
    State(handlers): State<BudgetHandlers>,
    RequireAuth(user): RequireAuth,
    Path((trip_id, expense_id)): Path<(String, String)>,
    params: Result<Query<CategoryQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let trip_id: TripId = parse_id("tripId", &trip_id)?;
    let expense_id: ExpenseId = parse_id("expenseId", &expense_id)?;
    let params = query_params(params)?;

    let cmd = DeleteExpenseCommand {
        trip_id,
        user_id: user.id,
        category: params.category,
        expense_id,
    };

    let budget = handlers.delete_expense.handle(cmd).await?;
    Ok(ok(BudgetResponse::from(&budget)))
}

/// PUT /api/budgets/:trip_id/categories
pub async fn update_allocation(
    State(handlers): State<BudgetHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
    payload: Result<Json<UpdateAllocationRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let trip_id: TripId = parse_id("tripId", &trip_id)?;
    let req = json_body(payload)?;

    let cmd = UpdateAllocationCommand {
        trip_id,
        user_id: user.id,
        category: req.category,
        allocated: req.allocated,
    };

    let budget = handlers.update_allocation.handle(cmd).await?;
    Ok(ok(BudgetResponse::from(&budget)))
}

/// GET /api/budgets/:trip_id/summary
pub async fn get_summary(
    State(handlers): State<BudgetHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
) -> Result<Response, ApiError> {
    let query = GetBudgetSummaryQuery {
        trip_id: parse_id("tripId", &trip_id)?,
        user_id: user.id,
    };
    let summary = handlers.get_summary.handle(query).await?;
    Ok(ok(BudgetSummaryResponse::from(&summary)))
}

/// GET /api/budgets/:trip_id/exchange-rate?from=&to=
pub async fn get_exchange_rate(
    State(handlers): State<BudgetHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
    params: Result<Query<ExchangeRateParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let trip_id: TripId = parse_id("tripId", &trip_id)?;
    let params = query_params(params)?;

    let query = GetExchangeRateQuery {
        trip_id,
        user_id: user.id,
        from: params.from.filter(|s| !s.trim().is_empty()),
        to: params.to.filter(|s| !s.trim().is_empty()),
    };

    let snapshot = handlers.get_exchange_rate.handle(query).await?;
    Ok(ok(ExchangeRateResponse::from(&snapshot)))
}
