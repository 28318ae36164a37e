//! GetExchangeRateHandler - Looks up and caches a conversion rate.

use chrono::Utc;
use std::sync::Arc;

use crate::application::handlers::access::owned_trip;
use crate::domain::budget::{BudgetError, ExchangeRateSnapshot};
use crate::domain::foundation::{CurrencyCode, DomainError, TripId, UserId};
use crate::ports::{BudgetRepository, ExchangeRateProvider, TripRepository};

/// Query for an exchange rate. Absent currencies fall back to defaults.
#[derive(Debug, Clone)]
pub struct GetExchangeRateQuery {
    pub trip_id: TripId,
    pub user_id: UserId,
    /// Defaults to the budget's currency.
    pub from: Option<String>,
    /// Defaults to the configured target currency.
    pub to: Option<String>,
}

/// Handler for exchange-rate lookups.
///
/// A successful lookup is cached on the budget. A failed one leaves the
/// budget exactly as it was.
pub struct GetExchangeRateHandler {
    trips: Arc<dyn TripRepository>,
    budgets: Arc<dyn BudgetRepository>,
    provider: Arc<dyn ExchangeRateProvider>,
    default_target: CurrencyCode,
}

impl GetExchangeRateHandler {
    pub fn new(
        trips: Arc<dyn TripRepository>,
        budgets: Arc<dyn BudgetRepository>,
        provider: Arc<dyn ExchangeRateProvider>,
        default_target: CurrencyCode,
    ) -> Self {
        Self {
            trips,
            budgets,
            provider,
            default_target,
        }
    }

    pub async fn handle(&self, query: GetExchangeRateQuery) -> Result<ExchangeRateSnapshot, BudgetError> {
        owned_trip(self.trips.as_ref(), &query.trip_id, &query.user_id).await?;
        let budget = self
            .budgets
            .find_by_trip(&query.trip_id)
            .await?
            .ok_or(BudgetError::NotFound(query.trip_id))?;

        let from = match query.from {
            Some(code) => parse_currency("from", &code)?,
            None => budget.currency().clone(),
        };
        let to = match query.to {
            Some(code) => parse_currency("to", &code)?,
            None => self.default_target.clone(),
        };

        let rate = self.provider.rate(&from, &to).await.map_err(|err| {
            tracing::error!(
                trip_id = %query.trip_id,
                from = %from,
                to = %to,
                error = %err,
                "Exchange rate lookup failed"
            );
            BudgetError::upstream(err.to_string())
        })?;

        let snapshot = ExchangeRateSnapshot {
            from,
            to,
            rate,
            fetched_at: Utc::now(),
        };
        self.budgets
            .record_exchange_rate(&query.trip_id, &snapshot)
            .await?;

        tracing::debug!(
            trip_id = %query.trip_id,
            from = %snapshot.from,
            to = %snapshot.to,
            rate = %snapshot.rate,
            "Exchange rate cached"
        );
        Ok(snapshot)
    }
}

fn parse_currency(field: &str, code: &str) -> Result<CurrencyCode, BudgetError> {
    CurrencyCode::new(code).map_err(|err| {
        BudgetError::from(DomainError::validation(field, err.to_string()))
    })
}
