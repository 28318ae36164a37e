//! GetPackingListHandler - Query handler for a trip's packing list.

use std::sync::Arc;

use crate::application::handlers::access::owned_trip;
use crate::domain::foundation::{TripId, UserId};
use crate::domain::packing::{PackingError, PackingList};
use crate::ports::{PackingRepository, TripRepository};

/// Query to get a trip's packing list.
#[derive(Debug, Clone)]
pub struct GetPackingListQuery {
    pub trip_id: TripId,
    pub user_id: UserId,
}

pub struct GetPackingListHandler {
    trips: Arc<dyn TripRepository>,
    packing: Arc<dyn PackingRepository>,
}

impl GetPackingListHandler {
    pub fn new(trips: Arc<dyn TripRepository>, packing: Arc<dyn PackingRepository>) -> Self {
        Self { trips, packing }
    }

    pub async fn handle(&self, query: GetPackingListQuery) -> Result<PackingList, PackingError> {
        owned_trip(self.trips.as_ref(), &query.trip_id, &query.user_id).await?;
        self.packing
            .find_by_trip(&query.trip_id)
            .await?
            .ok_or(PackingError::NotFound(query.trip_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::application::handlers::testing::{intruder, owner, seed_trip};

    #[tokio::test]
    async fn returns_list_for_owner() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = GetPackingListHandler::new(Arc::new(store.clone()), Arc::new(store));

        let list = handler
            .handle(GetPackingListQuery {
                trip_id: *trip.id(),
                user_id: owner(),
            })
            .await
            .unwrap();

        assert_eq!(list.id(), trip.packing_list_id());
    }

    #[tokio::test]
    async fn missing_list_is_not_found() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        store.detach_packing_list(trip.id()).await;
        let handler = GetPackingListHandler::new(Arc::new(store.clone()), Arc::new(store));

        let err = handler
            .handle(GetPackingListQuery {
                trip_id: *trip.id(),
                user_id: owner(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, PackingError::NotFound(*trip.id()));
    }

    #[tokio::test]
    async fn other_users_are_forbidden() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = GetPackingListHandler::new(Arc::new(store.clone()), Arc::new(store));

        let err = handler
            .handle(GetPackingListQuery {
                trip_id: *trip.id(),
                user_id: intruder(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, PackingError::Forbidden);
    }
}
