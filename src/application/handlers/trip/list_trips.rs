//! ListTripsHandler - Query handler for a user's trips.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::trip::{Trip, TripError, TripFilter};
use crate::ports::TripRepository;

/// Query to list the caller's trips.
#[derive(Debug, Clone)]
pub struct ListTripsQuery {
    pub user_id: UserId,
    pub filter: TripFilter,
}

/// Handler for listing trips, ordered by start date.
pub struct ListTripsHandler {
    trips: Arc<dyn TripRepository>,
}

impl ListTripsHandler {
    pub fn new(trips: Arc<dyn TripRepository>) -> Self {
        Self { trips }
    }

    pub async fn handle(&self, query: ListTripsQuery) -> Result<Vec<Trip>, TripError> {
        if let (Some(from), Some(to)) = (query.filter.starts_on_or_after, query.filter.ends_on_or_before) {
            if to < from {
                return Err(TripError::validation(
                    "end_date",
                    "Range end must not be before range start",
                ));
            }
        }
        let trips = self.trips.find_by_owner(&query.user_id, &query.filter).await?;
        tracing::debug!(user_id = %query.user_id, count = trips.len(), "Trips listed");
        Ok(trips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::application::handlers::testing::{date, intruder, kyoto, owner, seed_trip};
    use crate::domain::budget::Budget;
    use crate::domain::packing::PackingList;
    use crate::domain::trip::{TripStatus, TripUpdate};

    async fn seed_with(store: &MemoryStore, start: (i32, u32, u32), status: TripStatus) -> Trip {
        let mut input = kyoto();
        input.start_date = date(start.0, start.1, start.2);
        input.end_date = input.start_date + chrono::Duration::days(3);
        let mut trip = Trip::create(owner(), input).unwrap();
        trip.apply_update(TripUpdate {
            status: Some(status),
            ..Default::default()
        })
        .unwrap();
        store
            .create_with_dependents(
                &trip,
                &Budget::empty(*trip.budget_id(), *trip.id()),
                &PackingList::empty(*trip.packing_list_id(), *trip.id()),
            )
            .await
            .unwrap();
        trip
    }

    #[tokio::test]
    async fn lists_only_own_trips_in_start_order() {
        let store = MemoryStore::new();
        let june = seed_with(&store, (2024, 6, 1), TripStatus::Planning).await;
        let april = seed_trip(&store).await;
        let handler = ListTripsHandler::new(Arc::new(store.clone()));

        let mine = handler
            .handle(ListTripsQuery {
                user_id: owner(),
                filter: TripFilter::default(),
            })
            .await
            .unwrap();
        let theirs = handler
            .handle(ListTripsQuery {
                user_id: intruder(),
                filter: TripFilter::default(),
            })
            .await
            .unwrap();

        let ids: Vec<_> = mine.iter().map(|t| *t.id()).collect();
        assert_eq!(ids, vec![*april.id(), *june.id()]);
        assert!(theirs.is_empty());
    }

    #[tokio::test]
    async fn filters_by_status_and_date_range() {
        let store = MemoryStore::new();
        seed_with(&store, (2024, 1, 10), TripStatus::Completed).await;
        let may = seed_with(&store, (2024, 5, 1), TripStatus::Planning).await;
        seed_with(&store, (2024, 9, 1), TripStatus::Planning).await;
        let handler = ListTripsHandler::new(Arc::new(store.clone()));

        let trips = handler
            .handle(ListTripsQuery {
                user_id: owner(),
                filter: TripFilter {
                    status: Some(TripStatus::Planning),
                    starts_on_or_after: Some(date(2024, 3, 1)),
                    ends_on_or_before: Some(date(2024, 6, 30)),
                },
            })
            .await
            .unwrap();

        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].id(), may.id());
    }

    #[tokio::test]
    async fn rejects_inverted_date_range() {
        let handler = ListTripsHandler::new(Arc::new(MemoryStore::new()));

        let err = handler
            .handle(ListTripsQuery {
                user_id: owner(),
                filter: TripFilter {
                    status: None,
                    starts_on_or_after: Some(date(2024, 6, 1)),
                    ends_on_or_before: Some(date(2024, 5, 1)),
                },
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), crate::domain::foundation::ErrorCode::ValidationFailed);
    }
}
