//! CreateActivityHandler - Command handler for scheduling a new activity.

use std::sync::Arc;

use crate::application::handlers::access::owned_trip;
use crate::domain::activity::{Activity, ActivityError, ActivityRules, NewActivity};
use crate::domain::foundation::{TripId, UserId};
use crate::ports::{ActivityRepository, TripRepository};

/// Command to create an activity on a trip.
#[derive(Debug, Clone)]
pub struct CreateActivityCommand {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub activity: NewActivity,
}

/// Handler for creating activities.
///
/// The activity is stored and appended to its itinerary day in one
/// repository call.
pub struct CreateActivityHandler {
    trips: Arc<dyn TripRepository>,
    activities: Arc<dyn ActivityRepository>,
    rules: ActivityRules,
}

impl CreateActivityHandler {
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

    pub async fn handle(&self, cmd: CreateActivityCommand) -> Result<Activity, ActivityError> {
        owned_trip(self.trips.as_ref(), &cmd.trip_id, &cmd.user_id).await?;

        let activity = Activity::create(cmd.trip_id, cmd.activity, self.rules)?;
        self.activities.create_scheduled(&activity).await?;

        tracing::info!(
            trip_id = %cmd.trip_id,
            activity_id = %activity.id(),
            day = activity.day(),
            "Activity created"
        );
        Ok(activity)
    }
}
