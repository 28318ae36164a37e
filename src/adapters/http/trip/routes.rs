//! HTTP routes for trip endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    add_itinerary_entry, create_trip, delete_trip, get_trip, list_trips, remove_itinerary_entry,
    update_trip, TripHandlers,
};

/// Creates the trip router. Paths are relative to `/api`.
///
/// Every path under `/trips` names its id `:trip_id` so it can be merged
/// with the activity routes.
pub fn trip_routes(handlers: TripHandlers) -> Router {
    Router::new()
        .route("/trips", post(create_trip).get(list_trips))
        .route(
            "/trips/:trip_id",
            get(get_trip).put(update_trip).delete(delete_trip),
        )
        .route(
            "/trips/:trip_id/itinerary",
            post(add_itinerary_entry).delete(remove_itinerary_entry),
        )
        .with_state(handlers)
}
