//! Trip domain module.
//!
//! The trip is the root aggregate: it is created together with an empty
//! budget and packing list, owns the itinerary index of its activities,
//! and its deletion cascades to every dependent record.

mod aggregate;
mod errors;
mod filter;
mod itinerary;
mod status;

pub use aggregate::{NewTrip, Trip, TripUpdate, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};
pub use errors::TripError;
pub use filter::{CascadeReport, DependentCounts, TripFilter};
pub use itinerary::{validate_day, Itinerary};
pub use status::TripStatus;
