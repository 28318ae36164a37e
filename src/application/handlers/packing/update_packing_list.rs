//! UpdatePackingListHandler - Replaces packing list settings.

use std::sync::Arc;

use super::parse_weather;
use crate::application::handlers::access::owned_trip;
use crate::domain::foundation::{TripId, UserId};
use crate::domain::packing::{PackingError, PackingList};
use crate::ports::{PackingRepository, TripRepository};

/// Command to replace weather considerations and/or special requirements.
#[derive(Debug, Clone)]
pub struct UpdatePackingListCommand {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub weather_considerations: Option<Vec<String>>,
    pub special_requirements: Option<Vec<String>>,
}

/// Handler for packing list settings. Items are never touched.
pub struct UpdatePackingListHandler {
    trips: Arc<dyn TripRepository>,
    packing: Arc<dyn PackingRepository>,
}

impl UpdatePackingListHandler {
    pub fn new(trips: Arc<dyn TripRepository>, packing: Arc<dyn PackingRepository>) -> Self {
        Self { trips, packing }
    }

    pub async fn handle(&self, cmd: UpdatePackingListCommand) -> Result<PackingList, PackingError> {
        owned_trip(self.trips.as_ref(), &cmd.trip_id, &cmd.user_id).await?;
        let weather = cmd
            .weather_considerations
            .as_deref()
            .map(parse_weather)
            .transpose()?;

        let list = self
            .packing
            .update_settings(&cmd.trip_id, weather, cmd.special_requirements)
            .await?;

        tracing::info!(
            trip_id = %cmd.trip_id,
            weather = list.weather_considerations().len(),
            special_requirements = list.special_requirements().len(),
            "Packing list settings updated"
        );
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::application::handlers::testing::{owner, seed_trip};
    use crate::domain::packing::WeatherCondition;

    #[tokio::test]
    async fn replaces_weather_and_requirements() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = UpdatePackingListHandler::new(Arc::new(store.clone()), Arc::new(store));

        let list = handler
            .handle(UpdatePackingListCommand {
                trip_id: *trip.id(),
                user_id: owner(),
                weather_considerations: Some(vec!["Rainy".to_string(), "cold".to_string()]),
                special_requirements: Some(vec![" vegetarian ".to_string(), "".to_string()]),
            })
            .await
            .unwrap();

        assert_eq!(
            list.weather_considerations(),
            &[WeatherCondition::Cold, WeatherCondition::Rainy]
        );
        assert_eq!(list.special_requirements(), &["vegetarian".to_string()]);
    }

    #[tokio::test]
    async fn absent_fields_are_left_alone() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = UpdatePackingListHandler::new(Arc::new(store.clone()), Arc::new(store));
        handler
            .handle(UpdatePackingListCommand {
                trip_id: *trip.id(),
                user_id: owner(),
                weather_considerations: Some(vec!["hot".to_string()]),
                special_requirements: None,
            })
            .await
            .unwrap();

        let list = handler
            .handle(UpdatePackingListCommand {
                trip_id: *trip.id(),
                user_id: owner(),
                weather_considerations: None,
                special_requirements: Some(vec!["CPAP machine".to_string()]),
            })
            .await
            .unwrap();

        assert_eq!(list.weather_considerations(), &[WeatherCondition::Hot]);
        assert_eq!(list.special_requirements().len(), 1);
    }

    #[tokio::test]
    async fn unknown_weather_tag_is_rejected() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = UpdatePackingListHandler::new(Arc::new(store.clone()), Arc::new(store));

        let err = handler
            .handle(UpdatePackingListCommand {
                trip_id: *trip.id(),
                user_id: owner(),
                weather_considerations: Some(vec!["foggy".to_string()]),
                special_requirements: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PackingError::ValidationFailed { ref field, .. } if field == "weather"));
    }
}
