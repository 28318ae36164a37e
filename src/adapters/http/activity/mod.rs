//! HTTP adapter for the activity manager.

mod dto;
mod handlers;
mod routes;

pub use dto::ActivityResponse;
pub use handlers::ActivityHandlers;
pub use routes::activity_routes;
