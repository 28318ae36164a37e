//! AddPackingItemHandler - Command handler for adding a packing item.

use std::sync::Arc;

use super::parse_category;
use crate::application::handlers::access::owned_trip;
use crate::domain::foundation::{DomainError, TripId, UserId};
use crate::domain::packing::{NewPackingItem, PackingError, PackingItem, Priority};
use crate::ports::{PackingRepository, TripRepository};

/// Command to add an item to one packing category.
#[derive(Debug, Clone)]
pub struct AddPackingItemCommand {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub category: String,
    pub name: String,
    pub quantity: u32,
    pub notes: Option<String>,
    pub priority: Priority,
}

pub struct AddPackingItemHandler {
    trips: Arc<dyn TripRepository>,
    packing: Arc<dyn PackingRepository>,
}

impl AddPackingItemHandler {
    pub fn new(trips: Arc<dyn TripRepository>, packing: Arc<dyn PackingRepository>) -> Self {
        Self { trips, packing }
    }

    pub async fn handle(&self, cmd: AddPackingItemCommand) -> Result<PackingItem, PackingError> {
        owned_trip(self.trips.as_ref(), &cmd.trip_id, &cmd.user_id).await?;
        let category = parse_category(&cmd.category)?;

        let item = PackingItem::create(NewPackingItem {
            name: cmd.name,
            quantity: cmd.quantity,
            notes: cmd.notes,
            priority: cmd.priority,
        })
        .map_err(DomainError::from)?;

        self.packing.add_item(&cmd.trip_id, category, &item).await?;

        tracing::info!(
            trip_id = %cmd.trip_id,
            item_id = %item.id,
            category = %category,
            "Packing item added"
        );
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::application::handlers::testing::{owner, seed_trip};
    use crate::domain::packing::PackingCategory;

    fn command(trip_id: TripId, category: &str, quantity: u32) -> AddPackingItemCommand {
        AddPackingItemCommand {
            trip_id,
            user_id: owner(),
            category: category.to_string(),
            name: "Passport".to_string(),
            quantity,
            notes: None,
            priority: Priority::Essential,
        }
    }

    #[tokio::test]
    async fn adds_unpacked_item_to_category() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = AddPackingItemHandler::new(Arc::new(store.clone()), Arc::new(store.clone()));

        let item = handler.handle(command(*trip.id(), "documents", 1)).await.unwrap();

        assert!(!item.is_packed);
        let list = store.find_by_trip(trip.id()).await.unwrap().unwrap();
        assert_eq!(list.section(PackingCategory::Documents).items, vec![item]);
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = AddPackingItemHandler::new(Arc::new(store.clone()), Arc::new(store));

        let err = handler.handle(command(*trip.id(), "documents", 0)).await.unwrap_err();

        assert!(matches!(err, PackingError::ValidationFailed { ref field, .. } if field == "quantity"));
    }

    #[tokio::test]
    async fn unknown_category_is_invalid_category() {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let handler = AddPackingItemHandler::new(Arc::new(store.clone()), Arc::new(store));

        let err = handler.handle(command(*trip.id(), "snacks", 1)).await.unwrap_err();

        assert_eq!(err, PackingError::InvalidCategory("snacks".to_string()));
    }
}
