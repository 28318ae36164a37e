//! HTTP adapter for the packing tracker.

mod dto;
mod handlers;
mod routes;

pub use dto::{PackingItemResponse, PackingListResponse};
pub use handlers::PackingHandlers;
pub use routes::packing_routes;
