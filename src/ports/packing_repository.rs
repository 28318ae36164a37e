//! Packing list repository port.
//!
//! Item mutations are addressed by `(trip, category, item id)` and touch
//! only that item, so concurrent updates to sibling items cannot clobber
//! each other.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PackingItemId, TripId};
use crate::domain::packing::{PackingCategory, PackingItem, PackingList, WeatherCondition};

/// Repository port for PackingList persistence.
///
/// Mutations fail with `PackingListNotFound` (keyed by `trip_id`) when the
/// trip has no packing list.
#[async_trait]
pub trait PackingRepository: Send + Sync {
    /// Finds the packing list of a trip.
    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Option<PackingList>, DomainError>;

    /// Stores a default packing list for a trip that lacks one and returns
    /// the list now stored, which is an existing one if another writer won.
    ///
    /// # Errors
    ///
    /// - `TripNotFound` if the trip no longer exists
    async fn insert_default(&self, list: &PackingList) -> Result<PackingList, DomainError>;

    /// Replaces weather considerations and/or special requirements.
    async fn update_settings(
        &self,
        trip_id: &TripId,
        weather_considerations: Option<Vec<WeatherCondition>>,
        special_requirements: Option<Vec<String>>,
    ) -> Result<PackingList, DomainError>;

    /// Appends an item to a category.
    async fn add_item(
        &self,
        trip_id: &TripId,
        category: PackingCategory,
        item: &PackingItem,
    ) -> Result<(), DomainError>;

    /// Sets an item's packed flag, or flips it when `packed` is `None`.
    ///
    /// # Errors
    ///
    /// - `PackingItemNotFound` if the item is not in `category`
    async fn set_item_packed(
        &self,
        trip_id: &TripId,
        category: PackingCategory,
        item_id: &PackingItemId,
        packed: Option<bool>,
    ) -> Result<PackingItem, DomainError>;

    /// Deletes an item from a category.
    ///
    /// # Errors
    ///
    /// - `PackingItemNotFound` if the item is not in `category`
    async fn delete_item(
        &self,
        trip_id: &TripId,
        category: PackingCategory,
        item_id: &PackingItemId,
    ) -> Result<(), DomainError>;
}
