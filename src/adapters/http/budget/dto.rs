//! HTTP DTOs for budget endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::budget::{
    Budget, BudgetSummary, CategoryLedger, CategorySummary, ConsistencyAnomaly, ExchangeRateSnapshot,
    ExpenseItem,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One named allocation inside a budget request.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryAllocationRequest {
    pub name: String,
    pub allocated: Decimal,
}

/// Body of `POST`/`PUT /budgets/{tripId}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBudgetRequest {
    pub total_budget: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategoryAllocationRequest>,
    #[serde(default)]
    pub savings: Option<Decimal>,
    #[serde(default)]
    pub emergency_fund: Option<Decimal>,
}

/// Body of `POST /budgets/{tripId}/expenses`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddExpenseRequest {
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    /// Defaults to today.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of `PUT /budgets/{tripId}/expenses/{expenseId}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseRequest {
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Query of `DELETE /budgets/{tripId}/expenses/{expenseId}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryQuery {
    pub category: String,
}

/// Body of `PUT /budgets/{tripId}/categories`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAllocationRequest {
    pub category: String,
    pub allocated: Decimal,
}

/// Query of `GET /budgets/{tripId}/exchange-rate`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExchangeRateParams {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&ExpenseItem> for ExpenseResponse {
    fn from(item: &ExpenseItem) -> Self {
        Self {
            id: item.id.to_string(),
            description: item.description.clone(),
            amount: item.amount,
            date: item.date,
            payment_method: item.payment_method.as_str().to_string(),
            receipt: item.receipt.clone(),
            notes: item.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLedgerResponse {
    pub name: String,
    pub allocated: Decimal,
    pub spent: Decimal,
    pub items: Vec<ExpenseResponse>,
}

impl From<&CategoryLedger> for CategoryLedgerResponse {
    fn from(ledger: &CategoryLedger) -> Self {
        Self {
            name: ledger.name.as_str().to_string(),
            allocated: ledger.allocated,
            spent: ledger.spent,
            items: ledger.items.iter().map(ExpenseResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateResponse {
    pub from: String,
    pub to: String,
    pub rate: Decimal,
    pub fetched_at: DateTime<Utc>,
}

impl From<&ExchangeRateSnapshot> for ExchangeRateResponse {
    fn from(snapshot: &ExchangeRateSnapshot) -> Self {
        Self {
            from: snapshot.from.as_str().to_string(),
            to: snapshot.to.as_str().to_string(),
            rate: snapshot.rate,
            fetched_at: snapshot.fetched_at,
        }
    }
}

/// Full budget document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetResponse {
    pub id: String,
    pub trip_id: String,
    pub total_budget: Decimal,
    pub currency: String,
    pub categories: Vec<CategoryLedgerResponse>,
    pub savings: Decimal,
    pub emergency_fund: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<ExchangeRateResponse>,
    pub last_updated: DateTime<Utc>,
}

impl From<&Budget> for BudgetResponse {
    fn from(budget: &Budget) -> Self {
        Self {
            id: budget.id().to_string(),
            trip_id: budget.trip_id().to_string(),
            total_budget: budget.total_budget(),
            currency: budget.currency().as_str().to_string(),
            categories: budget
                .categories()
                .iter()
                .map(CategoryLedgerResponse::from)
                .collect(),
            savings: budget.savings(),
            emergency_fund: budget.emergency_fund(),
            exchange_rate: budget.exchange_rate().map(ExchangeRateResponse::from),
            last_updated: *budget.last_updated().as_datetime(),
        }
    }
}

/// Result of adding an expense: the new item and the budget after it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseAddedResponse {
    pub expense: ExpenseResponse,
    pub budget: BudgetResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummaryResponse {
    pub name: String,
    pub allocated: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage_spent: Decimal,
    pub over_budget: bool,
    pub item_count: usize,
}

impl From<&CategorySummary> for CategorySummaryResponse {
    fn from(summary: &CategorySummary) -> Self {
        Self {
            name: summary.name.as_str().to_string(),
            allocated: summary.allocated,
            spent: summary.spent,
            remaining: summary.remaining,
            percentage_spent: summary.percentage_spent,
            over_budget: summary.over_budget,
            item_count: summary.item_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyResponse {
    pub category: String,
    pub recorded_spent: Decimal,
    pub item_total: Decimal,
}

impl From<&ConsistencyAnomaly> for AnomalyResponse {
    fn from(anomaly: &ConsistencyAnomaly) -> Self {
        Self {
            category: anomaly.category.as_str().to_string(),
            recorded_spent: anomaly.recorded_spent,
            item_total: anomaly.item_total,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummaryResponse {
    pub total_budget: Decimal,
    pub total_allocated: Decimal,
    pub total_spent: Decimal,
    pub remaining: Decimal,
    pub currency: String,
    pub savings: Decimal,
    pub emergency_fund: Decimal,
    pub over_budget: bool,
    pub per_category: Vec<CategorySummaryResponse>,
    pub anomalies: Vec<AnomalyResponse>,
}

impl From<&BudgetSummary> for BudgetSummaryResponse {
    fn from(summary: &BudgetSummary) -> Self {
        Self {
            total_budget: summary.total_budget,
            total_allocated: summary.total_allocated,
            total_spent: summary.total_spent,
            remaining: summary.remaining,
            currency: summary.currency.as_str().to_string(),
            savings: summary.savings,
            emergency_fund: summary.emergency_fund,
            over_budget: summary.over_budget,
            per_category: summary
                .per_category
                .iter()
                .map(CategorySummaryResponse::from)
                .collect(),
            anomalies: summary.anomalies.iter().map(AnomalyResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{BudgetId, TripId};

    #[test]
    fn set_budget_request_reads_camel_case() {
        let req: SetBudgetRequest = serde_json::from_str(
            r#"{"totalBudget": 1500, "currency": "eur",
                "categories": [{"name": "food", "allocated": 300.5}],
                "emergencyFund": 100}"#,
        )
        .unwrap();
        assert_eq!(req.total_budget, Decimal::from(1500));
        assert_eq!(req.categories.len(), 1);
        assert_eq!(req.emergency_fund, Some(Decimal::from(100)));
        assert!(req.savings.is_none());
    }

    #[test]
    fn empty_budget_response_lists_six_categories() {
        let budget = Budget::empty(BudgetId::new(), TripId::new());
        let value = serde_json::to_value(BudgetResponse::from(&budget)).unwrap();
        assert_eq!(value["currency"], "USD");
        assert_eq!(value["categories"].as_array().unwrap().len(), 6);
        assert!(value.get("exchangeRate").is_none());
        assert!(value.get("emergencyFund").is_some());
    }
}
