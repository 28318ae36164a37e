//! GetBudgetSummaryHandler - Query handler for computed budget totals.

use std::sync::Arc;

use crate::application::handlers::access::owned_trip;
use crate::domain::budget::{BudgetError, BudgetSummary};
use crate::domain::foundation::{TripId, UserId};
use crate::ports::{BudgetRepository, TripRepository};

/// Query for a budget summary.
#[derive(Debug, Clone)]
pub struct GetBudgetSummaryQuery {
    pub trip_id: TripId,
    pub user_id: UserId,
}

/// Handler for budget summaries.
///
/// Ledgers whose stored spend disagrees with their items are reported in
/// `anomalies` and logged; the read itself still succeeds.
pub struct GetBudgetSummaryHandler {
    trips: Arc<dyn TripRepository>,
    budgets: Arc<dyn BudgetRepository>,
}

impl GetBudgetSummaryHandler {
    pub fn new(trips: Arc<dyn TripRepository>, budgets: Arc<dyn BudgetRepository>) -> Self {
        Self { trips, budgets }
    }

    pub async fn handle(&self, query: GetBudgetSummaryQuery) -> Result<BudgetSummary, BudgetError> {
        owned_trip(self.trips.as_ref(), &query.trip_id, &query.user_id).await?;
        let budget = self
            .budgets
            .find_by_trip(&query.trip_id)
            .await?
            .ok_or(BudgetError::NotFound(query.trip_id))?;

        let summary = BudgetSummary::of(&budget);
        for anomaly in &summary.anomalies {
            tracing::warn!(
                trip_id = %query.trip_id,
                category = %anomaly.category,
                recorded_spent = %anomaly.recorded_spent,
                item_total = %anomaly.item_total,
                "Budget category spend does not match its items"
            );
        }
        Ok(summary)
    }
}
