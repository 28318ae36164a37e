//! Activity repository port.

use async_trait::async_trait;

use crate::domain::activity::Activity;
use crate::domain::foundation::{ActivityId, DomainError, TripId};

/// Repository port for Activity persistence.
///
/// The repository keeps the owning trip's itinerary index in step with the
/// activity records it writes.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Inserts an activity and appends it to its day in the itinerary, atomically.
    ///
    /// # Errors
    ///
    /// - `TripNotFound` if the trip does not exist (or was deleted)
    async fn create_scheduled(&self, activity: &Activity) -> Result<(), DomainError>;

    /// Finds an activity of a trip. Activities of other trips are not returned.
    async fn find_by_id(
        &self,
        trip_id: &TripId,
        id: &ActivityId,
    ) -> Result<Option<Activity>, DomainError>;

    /// All activities of a trip, in no particular order.
    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Vec<Activity>, DomainError>;

    /// Writes an activity. If its day changed, its itinerary references move
    /// to the new day in the same unit.
    ///
    /// # Errors
    ///
    /// - `ActivityNotFound` if the activity no longer exists
    async fn update(&self, activity: &Activity) -> Result<(), DomainError>;

    /// Deletes an activity and every itinerary reference to it, atomically.
    ///
    /// # Errors
    ///
    /// - `ActivityNotFound` if the activity does not exist for the trip
    async fn delete(&self, trip_id: &TripId, id: &ActivityId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ActivityRepository) {}
    }
}
