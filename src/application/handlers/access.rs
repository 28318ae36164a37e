//! Trip ownership gate shared by every handler.

use crate::domain::foundation::{DomainError, ErrorCode, OwnedByUser, TripId, UserId};
use crate::domain::trip::Trip;
use crate::ports::TripRepository;

/// Loads a trip and checks that `user_id` owns it.
///
/// # Errors
///
/// - `TripNotFound` (with a `trip_id` detail) if the trip is absent
/// - `Forbidden` if it belongs to someone else
pub(crate) async fn owned_trip(
    trips: &dyn TripRepository,
    trip_id: &TripId,
    user_id: &UserId,
) -> Result<Trip, DomainError> {
    let trip = trips
        .find_by_id(trip_id)
        .await?
        .ok_or_else(|| DomainError::not_found(ErrorCode::TripNotFound, "trip_id", trip_id))?;
    trip.check_ownership(user_id)?;
    Ok(trip)
}
