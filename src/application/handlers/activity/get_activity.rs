//! GetActivityHandler - Query handler for one activity.

use std::sync::Arc;

use crate::application::handlers::access::owned_trip;
use crate::domain::activity::{Activity, ActivityError};
use crate::domain::foundation::{ActivityId, TripId, UserId};
use crate::ports::{ActivityRepository, TripRepository};

/// Query to get an activity of a trip.
#[derive(Debug, Clone)]
pub struct GetActivityQuery {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub activity_id: ActivityId,
}

pub struct GetActivityHandler {
    trips: Arc<dyn TripRepository>,
    activities: Arc<dyn ActivityRepository>,
}

impl GetActivityHandler {
    pub fn new(trips: Arc<dyn TripRepository>, activities: Arc<dyn ActivityRepository>) -> Self {
        Self { trips, activities }
    }

    pub async fn handle(&self, query: GetActivityQuery) -> Result<Activity, ActivityError> {
        owned_trip(self.trips.as_ref(), &query.trip_id, &query.user_id).await?;
        self.activities
            .find_by_id(&query.trip_id, &query.activity_id)
            .await?
            .ok_or(ActivityError::NotFound(query.activity_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::application::handlers::testing::{owner, seed_trip, temple_visit};
    use crate::domain::activity::ActivityRules;

    #[tokio::test]
    async fn returns_activity_of_trip() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let activity = Activity::create(*trip.id(), temple_visit(1), ActivityRules::default()).unwrap();
        store.create_scheduled(&activity).await.unwrap();
        let handler = GetActivityHandler::new(Arc::new(store.clone()), Arc::new(store));

        let found = handler
            .handle(GetActivityQuery {
                trip_id: *trip.id(),
                user_id: owner(),
                activity_id: *activity.id(),
            })
            .await
            .unwrap();

        assert_eq!(found, activity);
    }

    #[tokio::test]
    async fn activity_of_another_trip_is_not_found() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let other = seed_trip(&store).await;
        let activity = Activity::create(*other.id(), temple_visit(1), ActivityRules::default()).unwrap();
        store.create_scheduled(&activity).await.unwrap();
        let handler = GetActivityHandler::new(Arc::new(store.clone()), Arc::new(store));

        let err = handler
            .handle(GetActivityQuery {
                trip_id: *trip.id(),
                user_id: owner(),
                activity_id: *activity.id(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, ActivityError::NotFound(*activity.id()));
    }
}
