//! GetTripHandler - Query handler returning a trip with its dependents.

use std::sync::Arc;

use crate::application::handlers::access::owned_trip;
use crate::domain::activity::{sort_chronologically, Activity};
use crate::domain::budget::Budget;
use crate::domain::foundation::{TripId, UserId};
use crate::domain::packing::PackingList;
use crate::domain::trip::{Trip, TripError};
use crate::ports::{ActivityRepository, BudgetRepository, PackingRepository, TripRepository};

/// Query to get a trip by ID.
#[derive(Debug, Clone)]
pub struct GetTripQuery {
    pub trip_id: TripId,
    pub user_id: UserId,
}

/// A trip together with everything that belongs to it.
#[derive(Debug, Clone)]
pub struct TripDetails {
    pub trip: Trip,
    pub budget: Budget,
    pub packing_list: PackingList,
    pub activities: Vec<Activity>,
}

/// Handler for retrieving trip details.
///
/// A trip whose budget or packing list went missing (written before
/// creation was atomic) gets an empty default recreated on read.
pub struct GetTripHandler {
    trips: Arc<dyn TripRepository>,
    budgets: Arc<dyn BudgetRepository>,
    packing: Arc<dyn PackingRepository>,
    activities: Arc<dyn ActivityRepository>,
}

impl GetTripHandler {
    pub fn new(
        trips: Arc<dyn TripRepository>,
        budgets: Arc<dyn BudgetRepository>,
        packing: Arc<dyn PackingRepository>,
        activities: Arc<dyn ActivityRepository>,
    ) -> Self {
        Self {
            trips,
            budgets,
            packing,
            activities,
        }
    }

    pub async fn handle(&self, query: GetTripQuery) -> Result<TripDetails, TripError> {
        let trip = owned_trip(self.trips.as_ref(), &query.trip_id, &query.user_id).await?;

        let budget = match self.budgets.find_by_trip(trip.id()).await? {
            Some(budget) => budget,
            None => {
                tracing::warn!(trip_id = %trip.id(), "Trip has no budget, recreating empty default");
                self.budgets
                    .insert_default(&Budget::empty(*trip.budget_id(), *trip.id()))
                    .await?
            }
        };

        let packing_list = match self.packing.find_by_trip(trip.id()).await? {
            Some(list) => list,
            None => {
                tracing::warn!(
                    trip_id = %trip.id(),
                    "Trip has no packing list, recreating empty default"
                );
                self.packing
                    .insert_default(&PackingList::empty(*trip.packing_list_id(), *trip.id()))
                    .await?
            }
        };

        let mut activities = self.activities.find_by_trip(trip.id()).await?;
        sort_chronologically(&mut activities);

        tracing::debug!(trip_id = %trip.id(), activities = activities.len(), "Trip loaded");
        Ok(TripDetails {
            trip,
            budget,
            packing_list,
            activities,
        })
    }
}
