//! CreateTripHandler - Command handler for creating trips.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::budget::Budget;
use crate::domain::foundation::UserId;
use crate::domain::packing::PackingList;
use crate::domain::trip::{NewTrip, Trip, TripError};
use crate::ports::TripRepository;

/// Command to create a new trip.
#[derive(Debug, Clone)]
pub struct CreateTripCommand {
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub destinations: Vec<String>,
    pub tags: Vec<String>,
    pub is_public: bool,
}

/// Handler for creating trips.
///
/// The trip, its empty budget and its empty packing list are persisted by a
/// single repository call, so either all three exist afterwards or none do.
pub struct CreateTripHandler {
    trips: Arc<dyn TripRepository>,
}

impl CreateTripHandler {
    pub fn new(trips: Arc<dyn TripRepository>) -> Self {
        Self { trips }
    }

    pub async fn handle(&self, cmd: CreateTripCommand) -> Result<Trip, TripError> {
        let trip = Trip::create(
            cmd.user_id,
            NewTrip {
                title: cmd.title,
                description: cmd.description,
                start_date: cmd.start_date,
                end_date: cmd.end_date,
                destinations: cmd.destinations,
                tags: cmd.tags,
                is_public: cmd.is_public,
            },
        )?;
        let budget = Budget::empty(*trip.budget_id(), *trip.id());
        let packing_list = PackingList::empty(*trip.packing_list_id(), *trip.id());

        self.trips
            .create_with_dependents(&trip, &budget, &packing_list)
            .await?;

        tracing::info!(
            trip_id = %trip.id(),
            user_id = %trip.user_id(),
            "Trip created"
        );
        Ok(trip)
    }
}
