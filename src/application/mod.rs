//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers write through the repository ports; query handlers read
//! and compute views such as budget summaries and packing progress.

pub mod handlers;

pub use handlers::*;
