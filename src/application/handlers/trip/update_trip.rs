//! UpdateTripHandler - Command handler for editing a trip's scalar fields.

use std::sync::Arc;

use crate::application::handlers::access::owned_trip;
use crate::domain::foundation::{TripId, UserId};
use crate::domain::trip::{Trip, TripError, TripUpdate};
use crate::ports::TripRepository;

/// Command to update a trip.
#[derive(Debug, Clone)]
pub struct UpdateTripCommand {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub update: TripUpdate,
}

/// Handler for updating trips. Dependents are never touched.
pub struct UpdateTripHandler {
    trips: Arc<dyn TripRepository>,
}

impl UpdateTripHandler {
    pub fn new(trips: Arc<dyn TripRepository>) -> Self {
        Self { trips }
    }

    pub async fn handle(&self, cmd: UpdateTripCommand) -> Result<Trip, TripError> {
        let trip = owned_trip(self.trips.as_ref(), &cmd.trip_id, &cmd.user_id).await?;
        if cmd.update.is_empty() {
            return Ok(trip);
        }

        let trip = self.trips.apply_update(trip.id(), &cmd.update).await?;

        tracing::info!(trip_id = %trip.id(), status = %trip.status(), "Trip updated");
        Ok(trip)
    }
}
