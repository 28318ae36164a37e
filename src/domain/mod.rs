//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, errors, auth, money, timestamps)
//! - `trip` - Trip aggregate, itinerary index and lifecycle errors
//! - `budget` - Budget ledger with per-category spend tracking
//! - `packing` - Packing list, progress and suggestions
//! - `activity` - Scheduled activities and their validation rules

pub mod activity;
pub mod budget;
pub mod foundation;
pub mod packing;
pub mod trip;
