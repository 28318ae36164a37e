//! DeleteTripHandler - Command handler for cascade-deleting a trip.

use std::sync::Arc;

use crate::application::handlers::access::owned_trip;
use crate::domain::foundation::{TripId, UserId};
use crate::domain::trip::{CascadeReport, TripError};
use crate::ports::TripRepository;

/// Command to delete a trip and everything attached to it.
#[derive(Debug, Clone)]
pub struct DeleteTripCommand {
    pub trip_id: TripId,
    pub user_id: UserId,
}

/// Handler for deleting trips.
///
/// After the cascade the handler counts what is still attached to the trip
/// id. Anything left over is reported as `PartialCascadeFailure`.
pub struct DeleteTripHandler {
    trips: Arc<dyn TripRepository>,
}

impl DeleteTripHandler {
    pub fn new(trips: Arc<dyn TripRepository>) -> Self {
        Self { trips }
    }

    pub async fn handle(&self, cmd: DeleteTripCommand) -> Result<CascadeReport, TripError> {
        owned_trip(self.trips.as_ref(), &cmd.trip_id, &cmd.user_id).await?;

        let report = self.trips.delete_cascade(&cmd.trip_id).await?;
        let leftovers = self.trips.count_dependents(&cmd.trip_id).await?;
        if !leftovers.is_empty() {
            let remaining = leftovers.remaining();
            tracing::error!(
                trip_id = %cmd.trip_id,
                remaining = ?remaining,
                "Trip deleted but dependents remain"
            );
            return Err(TripError::PartialCascadeFailure {
                trip_id: cmd.trip_id,
                remaining,
            });
        }

        tracing::info!(
            trip_id = %cmd.trip_id,
            activities_removed = report.activities_removed,
            "Trip deleted"
        );
        Ok(report)
    }
}
