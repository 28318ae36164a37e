//! ListActivitiesHandler - Query handler for a trip's activities.

use std::sync::Arc;

use crate::application::handlers::access::owned_trip;
use crate::domain::activity::{validate_eco_rating, Activity, ActivityError, ActivityFilter};
use crate::domain::foundation::{DomainError, TripId, UserId};
use crate::ports::{ActivityRepository, TripRepository};

/// Query to list a trip's activities.
#[derive(Debug, Clone)]
pub struct ListActivitiesQuery {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub filter: ActivityFilter,
}

/// Handler for listing activities, ordered by day then start time.
pub struct ListActivitiesHandler {
    trips: Arc<dyn TripRepository>,
    activities: Arc<dyn ActivityRepository>,
}

impl ListActivitiesHandler {
    pub fn new(trips: Arc<dyn TripRepository>, activities: Arc<dyn ActivityRepository>) -> Self {
        Self { trips, activities }
    }

    pub async fn handle(&self, query: ListActivitiesQuery) -> Result<Vec<Activity>, ActivityError> {
        if let Some(rating) = query.filter.min_eco_rating {
            validate_eco_rating(rating).map_err(DomainError::from)?;
        }
        owned_trip(self.trips.as_ref(), &query.trip_id, &query.user_id).await?;

        let activities = self.activities.find_by_trip(&query.trip_id).await?;
        let selected = query.filter.apply(activities);
        tracing::debug!(trip_id = %query.trip_id, count = selected.len(), "Activities listed");
        Ok(selected)
    }
}
