//! UpdateActivityHandler - Command handler for editing an activity.

use std::sync::Arc;

use crate::application::handlers::access::owned_trip;
use crate::domain::activity::{Activity, ActivityError, ActivityRules, ActivityUpdate};
use crate::domain::foundation::{ActivityId, TripId, UserId};
use crate::ports::{ActivityRepository, TripRepository};

/// Command to update an activity.
#[derive(Debug, Clone)]
pub struct UpdateActivityCommand {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub activity_id: ActivityId,
    pub update: ActivityUpdate,
}

/// Handler for activity edits.
///
/// Moving an activity to another day moves its itinerary entry with it.
pub struct UpdateActivityHandler {
    trips: Arc<dyn TripRepository>,
    activities: Arc<dyn ActivityRepository>,
    rules: ActivityRules,
}

impl UpdateActivityHandler {
    pub fn new(
        trips: Arc<dyn TripRepository>,
        activities: Arc<dyn ActivityRepository>,
        rules: ActivityRules,
    ) -> Self {
        Self {
            trips,
            activities,
            rules,
        }
    }

    pub async fn handle(&self, cmd: UpdateActivityCommand) -> Result<Activity, ActivityError> {
        owned_trip(self.trips.as_ref(), &cmd.trip_id, &cmd.user_id).await?;
        let current = self
            .activities
            .find_by_id(&cmd.trip_id, &cmd.activity_id)
            .await?
            .ok_or(ActivityError::NotFound(cmd.activity_id))?;

        let updated = current.updated(cmd.update, self.rules)?;
        self.activities.update(&updated).await?;

        tracing::info!(
            trip_id = %cmd.trip_id,
            activity_id = %cmd.activity_id,
            day = updated.day(),
            "Activity updated"
        );
        Ok(updated)
    }
}
