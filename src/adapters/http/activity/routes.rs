//! HTTP routes for activity endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    create_activity, delete_activity, get_activity, get_activity_weather, list_activities,
    update_activity, ActivityHandlers,
};

/// Creates the activity router. Paths are relative to `/api`.
pub fn activity_routes(handlers: ActivityHandlers) -> Router {
    Router::new()
        .route(
            "/trips/:trip_id/activities",
            get(list_activities).post(create_activity),
        )
        .route(
            "/trips/:trip_id/activities/:activity_id",
            get(get_activity).put(update_activity).delete(delete_activity),
        )
        .route(
            "/trips/:trip_id/activities/:activity_id/weather",
            get(get_activity_weather),
        )
        .with_state(handlers)
}
