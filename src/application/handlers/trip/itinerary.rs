//! ItineraryHandler - Adds and removes day-by-day itinerary entries.

use std::sync::Arc;

use crate::application::handlers::access::owned_trip;
use crate::domain::foundation::{ActivityId, DomainError, TripId, UserId};
use crate::domain::trip::{validate_day, Trip, TripError};
use crate::ports::TripRepository;

/// Command naming one `(day, activity)` itinerary entry.
#[derive(Debug, Clone)]
pub struct ItineraryCommand {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub day: u32,
    pub activity_id: ActivityId,
}

/// Result of an itinerary change.
#[derive(Debug, Clone)]
pub struct ItineraryResult {
    pub trip: Trip,
    /// False when the entry was already in the requested state.
    pub changed: bool,
}

/// Handler for itinerary edits. Both directions are idempotent.
pub struct ItineraryHandler {
    trips: Arc<dyn TripRepository>,
}

impl ItineraryHandler {
    pub fn new(trips: Arc<dyn TripRepository>) -> Self {
        Self { trips }
    }

    pub async fn add(&self, cmd: ItineraryCommand) -> Result<ItineraryResult, TripError> {
        validate_day(cmd.day).map_err(DomainError::from)?;
        owned_trip(self.trips.as_ref(), &cmd.trip_id, &cmd.user_id).await?;

        let changed = self
            .trips
            .add_itinerary_entry(&cmd.trip_id, cmd.day, &cmd.activity_id)
            .await?;
        tracing::debug!(
            trip_id = %cmd.trip_id,
            activity_id = %cmd.activity_id,
            day = cmd.day,
            changed,
            "Itinerary entry added"
        );
        self.result(&cmd.trip_id, changed).await
    }

    pub async fn remove(&self, cmd: ItineraryCommand) -> Result<ItineraryResult, TripError> {
        validate_day(cmd.day).map_err(DomainError::from)?;
        owned_trip(self.trips.as_ref(), &cmd.trip_id, &cmd.user_id).await?;

        let changed = self
            .trips
            .remove_itinerary_entry(&cmd.trip_id, cmd.day, &cmd.activity_id)
            .await?;
        tracing::debug!(
            trip_id = %cmd.trip_id,
            activity_id = %cmd.activity_id,
            day = cmd.day,
            changed,
            "Itinerary entry removed"
        );
        self.result(&cmd.trip_id, changed).await
    }

    async fn result(&self, trip_id: &TripId, changed: bool) -> Result<ItineraryResult, TripError> {
        let trip = self
            .trips
            .find_by_id(trip_id)
            .await?
            .ok_or(TripError::NotFound(*trip_id))?;
        Ok(ItineraryResult { trip, changed })
    }
}
