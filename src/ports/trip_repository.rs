//! Trip repository port.
//!
//! The trip repository is the only port allowed to create or destroy the
//! records that hang off a trip. Both directions are single atomic units:
//! a trip never exists without its budget and packing list, and a cascade
//! delete never leaves any of them behind.

use async_trait::async_trait;

use crate::domain::budget::Budget;
use crate::domain::foundation::{ActivityId, DomainError, TripId, UserId};
use crate::domain::packing::PackingList;
use crate::domain::trip::{CascadeReport, DependentCounts, Trip, TripFilter, TripUpdate};

/// Repository port for the Trip aggregate and its lifecycle.
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// Persists a trip together with its empty budget and packing list.
    ///
    /// Either all three records are stored or none are.
    async fn create_with_dependents(
        &self,
        trip: &Trip,
        budget: &Budget,
        packing_list: &PackingList,
    ) -> Result<(), DomainError>;

    /// Finds a trip by id, itinerary included. Returns `None` if absent.
    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, DomainError>;

    /// Trips owned by `owner` matching `filter`, ordered by start date ascending.
    async fn find_by_owner(
        &self,
        owner: &UserId,
        filter: &TripFilter,
    ) -> Result<Vec<Trip>, DomainError>;

    /// Applies `update` to the stored trip as one read-modify-write and
    /// returns the result. Fields the update leaves `None` keep whatever is
    /// stored at write time, and the itinerary is not touched.
    ///
    /// # Errors
    ///
    /// - `TripNotFound` if the trip no longer exists
    /// - `ValidationFailed` if the merged trip is invalid
    async fn apply_update(&self, id: &TripId, update: &TripUpdate) -> Result<Trip, DomainError>;

    /// Deletes the trip, its budget, packing list, activities and itinerary
    /// entries as one atomic unit.
    ///
    /// # Errors
    ///
    /// - `TripNotFound` if the trip does not exist
    async fn delete_cascade(&self, id: &TripId) -> Result<CascadeReport, DomainError>;

    /// Counts records still referencing a trip id.
    async fn count_dependents(&self, id: &TripId) -> Result<DependentCounts, DomainError>;

    /// Adds an activity to an itinerary day. Returns false if already present.
    ///
    /// # Errors
    ///
    /// - `TripNotFound` if the trip does not exist
    /// - `ActivityNotFound` if the activity does not belong to the trip
    async fn add_itinerary_entry(
        &self,
        trip_id: &TripId,
        day: u32,
        activity_id: &ActivityId,
    ) -> Result<bool, DomainError>;

    /// Removes an activity from an itinerary day. Returns false if absent.
    async fn remove_itinerary_entry(
        &self,
        trip_id: &TripId,
        day: u32,
        activity_id: &ActivityId,
    ) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn TripRepository) {}
    }
}
