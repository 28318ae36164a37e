//! DeleteActivityHandler - Command handler for removing an activity.

use std::sync::Arc;

use crate::application::handlers::access::owned_trip;
use crate::domain::activity::ActivityError;
use crate::domain::foundation::{ActivityId, TripId, UserId};
use crate::ports::{ActivityRepository, TripRepository};

/// Command to delete an activity.
#[derive(Debug, Clone)]
pub struct DeleteActivityCommand {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub activity_id: ActivityId,
}

/// Handler for deleting activities and their itinerary entries.
pub struct DeleteActivityHandler {
    trips: Arc<dyn TripRepository>,
    activities: Arc<dyn ActivityRepository>,
}

impl DeleteActivityHandler {
    pub fn new(trips: Arc<dyn TripRepository>, activities: Arc<dyn ActivityRepository>) -> Self {
        Self { trips, activities }
    }

    pub async fn handle(&self, cmd: DeleteActivityCommand) -> Result<(), ActivityError> {
        owned_trip(self.trips.as_ref(), &cmd.trip_id, &cmd.user_id).await?;
        self.activities.delete(&cmd.trip_id, &cmd.activity_id).await?;

        tracing::info!(
            trip_id = %cmd.trip_id,
            activity_id = %cmd.activity_id,
            "Activity deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::application::handlers::testing::{owner, seed_trip, temple_visit};
    use crate::domain::activity::{Activity, ActivityRules};

    #[tokio::test]
    async fn deletes_activity_and_itinerary_references() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let activity = Activity::create(*trip.id(), temple_visit(2), ActivityRules::default()).unwrap();
        store.create_scheduled(&activity).await.unwrap();
        let handler = DeleteActivityHandler::new(Arc::new(store.clone()), Arc::new(store.clone()));

        handler
            .handle(DeleteActivityCommand {
                trip_id: *trip.id(),
                user_id: owner(),
                activity_id: *activity.id(),
            })
            .await
            .unwrap();

        let stored = TripRepository::find_by_id(&store, trip.id()).await.unwrap().unwrap();
        assert!(stored.itinerary().is_empty());
        assert!(store.find_by_trip(trip.id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_twice_is_not_found() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let activity = Activity::create(*trip.id(), temple_visit(2), ActivityRules::default()).unwrap();
        store.create_scheduled(&activity).await.unwrap();
        let handler = DeleteActivityHandler::new(Arc::new(store.clone()), Arc::new(store));
        let cmd = DeleteActivityCommand {
            trip_id: *trip.id(),
            user_id: owner(),
            activity_id: *activity.id(),
        };

        handler.handle(cmd.clone()).await.unwrap();
        let err = handler.handle(cmd).await.unwrap_err();

        assert_eq!(err, ActivityError::NotFound(*activity.id()));
    }
}
