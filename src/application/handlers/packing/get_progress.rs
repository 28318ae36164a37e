//! GetPackingProgressHandler - Query handler for packing completion.

use std::sync::Arc;

use crate::application::handlers::access::owned_trip;
use crate::domain::foundation::{TripId, UserId};
use crate::domain::packing::{PackingError, PackingProgress};
use crate::ports::{PackingRepository, TripRepository};

/// Query for packing progress.
#[derive(Debug, Clone)]
pub struct GetPackingProgressQuery {
    pub trip_id: TripId,
    pub user_id: UserId,
}

pub struct GetPackingProgressHandler {
    trips: Arc<dyn TripRepository>,
    packing: Arc<dyn PackingRepository>,
}

impl GetPackingProgressHandler {
    pub fn new(trips: Arc<dyn TripRepository>, packing: Arc<dyn PackingRepository>) -> Self {
        Self { trips, packing }
    }

    pub async fn handle(&self, query: GetPackingProgressQuery) -> Result<PackingProgress, PackingError> {
        owned_trip(self.trips.as_ref(), &query.trip_id, &query.user_id).await?;
        let list = self
            .packing
            .find_by_trip(&query.trip_id)
            .await?
            .ok_or(PackingError::NotFound(query.trip_id))?;
        Ok(PackingProgress::of(&list))
    }
}
