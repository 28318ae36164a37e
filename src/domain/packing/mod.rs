//! Packing tracker domain module.
//!
//! A packing list has six fixed categories of items. Items keep a stable
//! id so that toggles and deletes target the item itself, never a position.

mod aggregate;
mod category;
mod errors;
mod item;
mod progress;
mod suggestions;

pub use aggregate::{PackingList, PackingSection};
pub use category::{PackingCategory, WeatherCondition};
pub use errors::PackingError;
pub use item::{NewPackingItem, PackingItem, Priority};
pub use progress::{CategoryProgress, PackingProgress};
pub use suggestions::{
    generate_suggestions, CategorySuggestions, SuggestedItem, SuggestionRequest,
    MAX_SUGGESTION_DAYS,
};
