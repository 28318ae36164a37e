//! Packing tracker command and query handlers.

mod add_item;
mod delete_item;
mod generate_suggestions;
mod get_packing_list;
mod get_progress;
mod set_item_packed;
mod update_packing_list;

pub use add_item::{AddPackingItemCommand, AddPackingItemHandler};
pub use delete_item::{DeletePackingItemCommand, DeletePackingItemHandler};
pub use generate_suggestions::{GenerateSuggestionsHandler, GenerateSuggestionsQuery};
pub use get_packing_list::{GetPackingListHandler, GetPackingListQuery};
pub use get_progress::{GetPackingProgressHandler, GetPackingProgressQuery};
pub use set_item_packed::{SetItemPackedCommand, SetItemPackedHandler};
pub use update_packing_list::{UpdatePackingListCommand, UpdatePackingListHandler};

use crate::domain::foundation::{DomainError, UnknownCategory};
use crate::domain::packing::{PackingCategory, PackingError, WeatherCondition};

fn parse_category(name: &str) -> Result<PackingCategory, PackingError> {
    name.parse()
        .map_err(|err: UnknownCategory| PackingError::invalid_category(err.0))
}

fn parse_weather(tags: &[String]) -> Result<Vec<WeatherCondition>, PackingError> {
    tags.iter()
        .map(|tag| tag.trim().to_ascii_lowercase().parse::<WeatherCondition>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| PackingError::from(DomainError::from(err)))
}
