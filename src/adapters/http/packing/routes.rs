//! HTTP routes for packing endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    add_item, delete_item, generate_suggestions, get_packing_list, get_progress, set_item_packed,
    update_packing_list, PackingHandlers,
};

/// Creates the packing router. Paths are relative to `/api`.
pub fn packing_routes(handlers: PackingHandlers) -> Router {
    Router::new()
        .route(
            "/packing/:trip_id",
            get(get_packing_list)
                .post(update_packing_list)
                .put(update_packing_list),
        )
        .route("/packing/:trip_id/items", post(add_item))
        .route(
            "/packing/:trip_id/items/:item_id",
            put(set_item_packed).delete(delete_item),
        )
        .route("/packing/:trip_id/progress", get(get_progress))
        .route("/packing/:trip_id/suggestions", post(generate_suggestions))
        .with_state(handlers)
}
