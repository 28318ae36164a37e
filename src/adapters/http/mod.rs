//! HTTP adapters - REST API implementations.
//!
//! Each component has its own HTTP adapter (dto, handlers, routes). All
//! responses use the envelope in [`envelope`]; [`build_router`] mounts
//! everything under `/api`.

pub mod activity;
mod app;
pub mod budget;
pub mod envelope;
pub mod health;
pub mod middleware;
pub mod packing;
pub mod trip;

pub use app::{build_router, ApiSettings, AppServices};
