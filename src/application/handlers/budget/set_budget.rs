//! SetBudgetHandler - Command handler for replacing budget settings.

use rust_decimal::Decimal;
use std::sync::Arc;

use crate::application::handlers::access::owned_trip;
use crate::domain::budget::{Budget, BudgetCategory, BudgetError, BudgetSettings};
use crate::domain::foundation::{CurrencyCode, DomainError, TripId, UserId};
use crate::ports::{BudgetRepository, TripRepository};

/// Command to set a trip's budget.
#[derive(Debug, Clone)]
pub struct SetBudgetCommand {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub total_budget: Decimal,
    /// Keeps the current currency when absent.
    pub currency: Option<String>,
    /// Category name to allocation. Unnamed categories keep theirs.
    pub allocations: Vec<(String, Decimal)>,
    pub savings: Option<Decimal>,
    pub emergency_fund: Option<Decimal>,
}

/// Handler for setting budget totals and allocations.
///
/// Allocations need not add up to the total; recorded spend and expense
/// items are never touched.
pub struct SetBudgetHandler {
    trips: Arc<dyn TripRepository>,
    budgets: Arc<dyn BudgetRepository>,
}

impl SetBudgetHandler {
    pub fn new(trips: Arc<dyn TripRepository>, budgets: Arc<dyn BudgetRepository>) -> Self {
        Self { trips, budgets }
    }

    pub async fn handle(&self, cmd: SetBudgetCommand) -> Result<Budget, BudgetError> {
        owned_trip(self.trips.as_ref(), &cmd.trip_id, &cmd.user_id).await?;

        let allocations = cmd
            .allocations
            .iter()
            .map(|(name, amount)| name.parse::<BudgetCategory>().map(|category| (category, *amount)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(DomainError::from)?;

        let currency = match cmd.currency {
            Some(code) => CurrencyCode::new(code).map_err(DomainError::from)?,
            None => self
                .budgets
                .find_by_trip(&cmd.trip_id)
                .await?
                .ok_or(BudgetError::NotFound(cmd.trip_id))?
                .currency()
                .clone(),
        };

        let settings = BudgetSettings {
            total_budget: cmd.total_budget,
            currency,
            allocations,
            savings: cmd.savings,
            emergency_fund: cmd.emergency_fund,
        };
        settings.validate()?;

        let budget = self.budgets.apply_settings(&cmd.trip_id, &settings).await?;
        tracing::info!(
            trip_id = %cmd.trip_id,
            total_budget = %budget.total_budget(),
            currency = %budget.currency(),
            "Budget set"
        );
        Ok(budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::application::handlers::testing::{intruder, owner, seed_trip};
    use rust_decimal_macros::dec;

    fn command(trip_id: TripId) -> SetBudgetCommand {
        SetBudgetCommand {
            trip_id,
            user_id: owner(),
            total_budget: dec!(2000),
            currency: Some("jpy".to_string()),
            allocations: vec![
                ("food".to_string(), dec!(400)),
                ("accommodation".to_string(), dec!(900)),
            ],
            savings: None,
            emergency_fund: Some(dec!(150)),
        }
    }

    #[tokio::test]
    async fn sets_total_currency_and_named_allocations() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = SetBudgetHandler::new(Arc::new(store.clone()), Arc::new(store));

        let budget = handler.handle(command(*trip.id())).await.unwrap();

        assert_eq!(budget.total_budget(), dec!(2000));
        assert_eq!(budget.currency().as_str(), "JPY");
        assert_eq!(budget.category(BudgetCategory::Food).allocated, dec!(400));
        assert_eq!(budget.category(BudgetCategory::Shopping).allocated, Decimal::ZERO);
        assert_eq!(budget.emergency_fund(), dec!(150));
    }

    #[tokio::test]
    async fn keeps_currency_when_omitted() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = SetBudgetHandler::new(Arc::new(store.clone()), Arc::new(store));
        handler.handle(command(*trip.id())).await.unwrap();

        let mut cmd = command(*trip.id());
        cmd.currency = None;
        cmd.allocations = vec![];
        let budget = handler.handle(cmd).await.unwrap();

        assert_eq!(budget.currency().as_str(), "JPY");
        assert_eq!(budget.category(BudgetCategory::Food).allocated, dec!(400));
    }

    #[tokio::test]
    async fn unknown_category_is_rejected() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = SetBudgetHandler::new(Arc::new(store.clone()), Arc::new(store));

        let mut cmd = command(*trip.id());
        cmd.allocations.push(("souvenirs".to_string(), dec!(10)));
        let err = handler.handle(cmd).await.unwrap_err();

        assert_eq!(err, BudgetError::InvalidCategory("souvenirs".to_string()));
    }

    #[tokio::test]
    async fn negative_total_is_rejected() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = SetBudgetHandler::new(Arc::new(store.clone()), Arc::new(store));

        let mut cmd = command(*trip.id());
        cmd.total_budget = dec!(-1);
        let err = handler.handle(cmd).await.unwrap_err();

        assert!(matches!(err, BudgetError::ValidationFailed { ref field, .. } if field == "total_budget"));
    }

    #[tokio::test]
    async fn other_users_are_forbidden() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = SetBudgetHandler::new(Arc::new(store.clone()), Arc::new(store));

        let mut cmd = command(*trip.id());
        cmd.user_id = intruder();

        assert_eq!(handler.handle(cmd).await.unwrap_err(), BudgetError::Forbidden);
    }
}
