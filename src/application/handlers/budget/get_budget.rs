//! GetBudgetHandler - Query handler for a trip's budget.

use std::sync::Arc;

use crate::application::handlers::access::owned_trip;
use crate::domain::budget::{Budget, BudgetError};
use crate::domain::foundation::{TripId, UserId};
use crate::ports::{BudgetRepository, TripRepository};

/// Query to get a trip's budget.
#[derive(Debug, Clone)]
pub struct GetBudgetQuery {
    pub trip_id: TripId,
    pub user_id: UserId,
}

pub struct GetBudgetHandler {
    trips: Arc<dyn TripRepository>,
    budgets: Arc<dyn BudgetRepository>,
}

impl GetBudgetHandler {
    pub fn new(trips: Arc<dyn TripRepository>, budgets: Arc<dyn BudgetRepository>) -> Self {
        Self { trips, budgets }
    }

    pub async fn handle(&self, query: GetBudgetQuery) -> Result<Budget, BudgetError> {
        owned_trip(self.trips.as_ref(), &query.trip_id, &query.user_id).await?;
        self.budgets
            .find_by_trip(&query.trip_id)
            .await?
            .ok_or(BudgetError::NotFound(query.trip_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::application::handlers::testing::{intruder, owner, seed_trip};

    #[tokio::test]
    async fn returns_budget_for_owner() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = GetBudgetHandler::new(Arc::new(store.clone()), Arc::new(store));

        let budget = handler
            .handle(GetBudgetQuery {
                trip_id: *trip.id(),
                user_id: owner(),
            })
            .await
            .unwrap();

        assert_eq!(budget.id(), trip.budget_id());
    }

    #[tokio::test]
    async fn missing_trip_is_trip_not_found() {
        let store = MemoryStore::new();
        let handler = GetBudgetHandler::new(Arc::new(store.clone()), Arc::new(store));
        let missing = TripId::new();

        let err = handler
            .handle(GetBudgetQuery {
                trip_id: missing,
                user_id: owner(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, BudgetError::TripNotFound(missing));
    }

    #[tokio::test]
    async fn other_users_are_forbidden() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = GetBudgetHandler::new(Arc::new(store.clone()), Arc::new(store));

        let err = handler
            .handle(GetBudgetQuery {
                trip_id: *trip.id(),
                user_id: intruder(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, BudgetError::Forbidden);
    }
}
