//! PackingList aggregate.

use serde::{Deserialize, Serialize};

use super::{PackingCategory, PackingItem, WeatherCondition};
use crate::domain::foundation::{
    DomainError, ErrorCode, PackingItemId, PackingListId, Timestamp, TripId,
};

/// Ordered items of one packing category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingSection {
    pub name: PackingCategory,
    pub items: Vec<PackingItem>,
}

/// PackingList aggregate.
///
/// # Invariants
///
/// - exactly one section per `PackingCategory`, in canonical order
/// - an item id appears in at most one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingList {
    id: PackingListId,
    trip_id: TripId,
    sections: Vec<PackingSection>,
    weather_considerations: Vec<WeatherCondition>,
    special_requirements: Vec<String>,
    last_updated: Timestamp,
}

impl PackingList {
    /// Empty list created alongside its trip.
    pub fn empty(id: PackingListId, trip_id: TripId) -> Self {
        Self {
            id,
            trip_id,
            sections: PackingCategory::ALL
                .into_iter()
                .map(|name| PackingSection {
                    name,
                    items: Vec::new(),
                })
                .collect(),
            weather_considerations: Vec::new(),
            special_requirements: Vec::new(),
            last_updated: Timestamp::now(),
        }
    }

    /// Reconstitute from persistence, grouping `(category, item)` rows in order.
    pub fn reconstitute(
        id: PackingListId,
        trip_id: TripId,
        items: impl IntoIterator<Item = (PackingCategory, PackingItem)>,
        weather_considerations: Vec<WeatherCondition>,
        special_requirements: Vec<String>,
        last_updated: Timestamp,
    ) -> Self {
        let mut list = Self::empty(id, trip_id);
        for (category, item) in items {
            list.sections[category.index()].items.push(item);
        }
        list.weather_considerations = weather_considerations;
        list.special_requirements = special_requirements;
        list.last_updated = last_updated;
        list
    }

    pub fn id(&self) -> &PackingListId {
        &self.id
    }

    pub fn trip_id(&self) -> &TripId {
        &self.trip_id
    }

    pub fn sections(&self) -> &[PackingSection] {
        &self.sections
    }

    pub fn section(&self, category: PackingCategory) -> &PackingSection {
        &self.sections[category.index()]
    }

    pub fn weather_considerations(&self) -> &[WeatherCondition] {
        &self.weather_considerations
    }

    pub fn special_requirements(&self) -> &[String] {
        &self.special_requirements
    }

    pub fn last_updated(&self) -> &Timestamp {
        &self.last_updated
    }

    /// Looks an item up by id within one category only.
    pub fn item(&self, category: PackingCategory, item_id: &PackingItemId) -> Option<&PackingItem> {
        self.section(category)
            .items
            .iter()
            .find(|item| &item.id == item_id)
    }

    /// Appends an item to the end of a category.
    pub fn add_item(&mut self, category: PackingCategory, item: PackingItem) {
        self.sections[category.index()].items.push(item);
        self.touch();
    }

    /// Sets the packed flag, or flips it when `packed` is `None`.
    ///
    /// # Errors
    ///
    /// - `PackingItemNotFound` if the id is not in the named category
    pub fn set_packed(
        &mut self,
        category: PackingCategory,
        item_id: &PackingItemId,
        packed: Option<bool>,
    ) -> Result<PackingItem, DomainError> {
        let item = self.sections[category.index()]
            .items
            .iter_mut()
            .find(|item| &item.id == item_id)
            .ok_or_else(|| item_not_found(item_id))?;
        item.is_packed = packed.unwrap_or(!item.is_packed);
        let updated = item.clone();
        self.touch();
        Ok(updated)
    }

    /// Removes an item from the named category.
    ///
    /// # Errors
    ///
    /// - `PackingItemNotFound` if the id is not in that category, even when
    ///   another category holds it
    pub fn remove_item(
        &mut self,
        category: PackingCategory,
        item_id: &PackingItemId,
    ) -> Result<PackingItem, DomainError> {
        let items = &mut self.sections[category.index()].items;
        let index = items
            .iter()
            .position(|item| &item.id == item_id)
            .ok_or_else(|| item_not_found(item_id))?;
        let removed = items.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Replaces weather considerations and/or special requirements.
    pub fn update_settings(
        &mut self,
        weather_considerations: Option<Vec<WeatherCondition>>,
        special_requirements: Option<Vec<String>>,
    ) {
        if let Some(mut weather) = weather_considerations {
            weather.sort();
            weather.dedup();
            self.weather_considerations = weather;
        }
        if let Some(requirements) = special_requirements {
            self.special_requirements = requirements
                .into_iter()
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect();
        }
        self.touch();
    }

    fn touch(&mut self) {
        self.last_updated = Timestamp::now();
    }
}

fn item_not_found(item_id: &PackingItemId) -> DomainError {
    DomainError::not_found(ErrorCode::PackingItemNotFound, "item_id", item_id)
}
