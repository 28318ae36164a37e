//! GenerateSuggestionsHandler - Suggests packing items for a trip.

use std::sync::Arc;

use super::parse_weather;
use crate::application::handlers::access::owned_trip;
use crate::domain::foundation::{DomainError, TripId, UserId};
use crate::domain::packing::{
    generate_suggestions, CategorySuggestions, PackingError, SuggestionRequest,
};
use crate::ports::TripRepository;

/// Query for packing suggestions.
#[derive(Debug, Clone)]
pub struct GenerateSuggestionsQuery {
    pub trip_id: TripId,
    pub user_id: UserId,
    /// Defaults to the trip's length in days.
    pub duration_days: Option<u32>,
    pub weather: Vec<String>,
    pub activities: Vec<String>,
}

/// Handler for suggestions. The stored packing list is never modified.
pub struct GenerateSuggestionsHandler {
    trips: Arc<dyn TripRepository>,
}

impl GenerateSuggestionsHandler {
    pub fn new(trips: Arc<dyn TripRepository>) -> Self {
        Self { trips }
    }

    pub async fn handle(
        &self,
        query: GenerateSuggestionsQuery,
    ) -> Result<Vec<CategorySuggestions>, PackingError> {
        let trip = owned_trip(self.trips.as_ref(), &query.trip_id, &query.user_id).await?;

        let request = SuggestionRequest {
            duration_days: query.duration_days.unwrap_or_else(|| trip.duration_days()),
            weather: parse_weather(&query.weather)?,
            activities: query.activities,
        };
        let suggestions = generate_suggestions(&request).map_err(DomainError::from)?;

        tracing::debug!(
            trip_id = %query.trip_id,
            duration_days = request.duration_days,
            "Packing suggestions generated"
        );
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::application::handlers::testing::{intruder, owner, seed_trip};
    use crate::domain::packing::PackingCategory;
    use crate::ports::PackingRepository;

    fn quantity_of(suggestions: &[CategorySuggestions], name: &str) -> Option<u32> {
        suggestions
            .iter()
            .flat_map(|c| c.items.iter())
            .find(|i| i.name == name)
            .map(|i| i.quantity)
    }

    #[tokio::test]
    async fn defaults_duration_to_trip_length() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = GenerateSuggestionsHandler::new(Arc::new(store));

        let suggestions = handler
            .handle(GenerateSuggestionsQuery {
                trip_id: *trip.id(),
                user_id: owner(),
                duration_days: None,
                weather: vec![],
                activities: vec![],
            })
            .await
            .unwrap();

        // Kyoto fixture runs April 1st to 5th inclusive.
        assert_eq!(trip.duration_days(), 5);
        assert_eq!(quantity_of(&suggestions, "Underwear"), Some(8));
        assert_eq!(suggestions.len(), PackingCategory::ALL.len());
    }

    #[tokio::test]
    async fn conditions_on_tags_and_leaves_list_alone() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = GenerateSuggestionsHandler::new(Arc::new(store.clone()));

        let suggestions = handler
            .handle(GenerateSuggestionsQuery {
                trip_id: *trip.id(),
                user_id: owner(),
                duration_days: Some(3),
                weather: vec!["rainy".to_string()],
                activities: vec!["Hiking".to_string()],
            })
            .await
            .unwrap();

        assert!(quantity_of(&suggestions, "Umbrella").is_some());
        assert!(quantity_of(&suggestions, "Hiking boots").is_some());
        let list = store.find_by_trip(trip.id()).await.unwrap().unwrap();
        assert!(list.sections().iter().all(|s| s.items.is_empty()));
    }

    #[tokio::test]
    async fn zero_days_is_rejected() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = GenerateSuggestionsHandler::new(Arc::new(store));

        let err = handler
            .handle(GenerateSuggestionsQuery {
                trip_id: *trip.id(),
                user_id: owner(),
                duration_days: Some(0),
                weather: vec![],
                activities: vec![],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PackingError::ValidationFailed { ref field, .. } if field == "duration_days"));
    }

    #[tokio::test]
    async fn other_users_are_forbidden() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = GenerateSuggestionsHandler::new(Arc::new(store));

        let err = handler
            .handle(GenerateSuggestionsQuery {
                trip_id: *trip.id(),
                user_id: intruder(),
                duration_days: Some(3),
                weather: vec![],
                activities: vec![],
            })
            .await
            .unwrap_err();

        assert_eq!(err, PackingError::Forbidden);
    }
}
