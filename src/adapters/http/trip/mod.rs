//! HTTP adapter for the trip lifecycle.

mod dto;
mod handlers;
mod routes;

pub use handlers::TripHandlers;
pub use routes::trip_routes;
