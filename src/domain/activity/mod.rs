//! Activity manager domain module.
//!
//! Activities are scheduled per trip day with an `HH:mm` time window.
//! Whether the end must follow the start is a deployment rule
//! (`ActivityRules`), off by default so overnight entries are accepted.

mod aggregate;
mod category;
mod errors;
mod filter;
mod time_of_day;

pub use aggregate::{
    validate_eco_rating, Activity, ActivityRules, ActivityUpdate, BookingInfo, Coordinates,
    Location, NewActivity, DEFAULT_ECO_RATING,
};
pub use category::ActivityCategory;
pub use errors::ActivityError;
pub use filter::{sort_chronologically, ActivityFilter};
pub use time_of_day::TimeOfDay;
