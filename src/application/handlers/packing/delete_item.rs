//! DeletePackingItemHandler - Command handler for removing a packing item.

use std::sync::Arc;

use super::parse_category;
use crate::application::handlers::access::owned_trip;
use crate::domain::foundation::{PackingItemId, TripId, UserId};
use crate::domain::packing::PackingError;
use crate::ports::{PackingRepository, TripRepository};

/// Command to delete an item from a named category.
#[derive(Debug, Clone)]
pub struct DeletePackingItemCommand {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub category: String,
    pub item_id: PackingItemId,
}

/// Handler for item deletion.
///
/// An id that lives in a different category than the one named is
/// `ItemNotFound`, and nothing is removed.
pub struct DeletePackingItemHandler {
    trips: Arc<dyn TripRepository>,
    packing: Arc<dyn PackingRepository>,
}

impl DeletePackingItemHandler {
    pub fn new(trips: Arc<dyn TripRepository>, packing: Arc<dyn PackingRepository>) -> Self {
        Self { trips, packing }
    }

    pub async fn handle(&self, cmd: DeletePackingItemCommand) -> Result<(), PackingError> {
        owned_trip(self.trips.as_ref(), &cmd.trip_id, &cmd.user_id).await?;
        let category = parse_category(&cmd.category)?;

        self.packing
            .delete_item(&cmd.trip_id, category, &cmd.item_id)
            .await?;

        tracing::info!(
            trip_id = %cmd.trip_id,
            item_id = %cmd.item_id,
            category = %category,
            "Packing item deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::application::handlers::testing::{owner, seed_trip};
    use crate::domain::packing::{NewPackingItem, PackingCategory, PackingItem, Priority};

    async fn setup() -> (MemoryStore, TripId, PackingItem) {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let item = PackingItem::create(NewPackingItem {
            name: "Toothbrush".to_string(),
            quantity: 1,
            notes: None,
            priority: Priority::Important,
        })
        .unwrap();
        store
            .add_item(trip.id(), PackingCategory::Toiletries, &item)
            .await
            .unwrap();
        (store, *trip.id(), item)
    }

    #[tokio::test]
    async fn deletes_item_from_named_category() {
        let (store, trip_id, item) = setup().await;
        let handler = DeletePackingItemHandler::new(Arc::new(store.clone()), Arc::new(store.clone()));

        handler
            .handle(DeletePackingItemCommand {
                trip_id,
                user_id: owner(),
                category: "toiletries".to_string(),
                item_id: item.id,
            })
            .await
            .unwrap();

        let list = store.find_by_trip(&trip_id).await.unwrap().unwrap();
        assert!(list.section(PackingCategory::Toiletries).items.is_empty());
    }

    #[tokio::test]
    async fn item_in_other_category_is_not_found_and_kept() {
        let (store, trip_id, item) = setup().await;
        let handler = DeletePackingItemHandler::new(Arc::new(store.clone()), Arc::new(store.clone()));

        let err = handler
            .handle(DeletePackingItemCommand {
                trip_id,
                user_id: owner(),
                category: "clothing".to_string(),
                item_id: item.id,
            })
            .await
            .unwrap_err();

        assert_eq!(err, PackingError::ItemNotFound(item.id));
        let list = store.find_by_trip(&trip_id).await.unwrap().unwrap();
        assert_eq!(list.section(PackingCategory::Toiletries).items.len(), 1);
    }
}
