//! SetItemPackedHandler - Marks a packing item packed, unpacked, or flips it.

use std::sync::Arc;

use super::parse_category;
use crate::application::handlers::access::owned_trip;
use crate::domain::foundation::{PackingItemId, TripId, UserId};
use crate::domain::packing::{PackingError, PackingItem};
use crate::ports::{PackingRepository, TripRepository};

/// Command addressing one item by category and stable id.
#[derive(Debug, Clone)]
pub struct SetItemPackedCommand {
    pub trip_id: TripId,
    pub user_id: UserId,
    pub category: String,
    pub item_id: PackingItemId,
    /// `None` toggles the current flag.
    pub packed: Option<bool>,
}

/// Handler for packed-flag changes.
///
/// The repository updates only the addressed item, so changes to sibling
/// items made at the same time are kept.
pub struct SetItemPackedHandler {
    trips: Arc<dyn TripRepository>,
    packing: Arc<dyn PackingRepository>,
}

impl SetItemPackedHandler {
    pub fn new(trips: Arc<dyn TripRepository>, packing: Arc<dyn PackingRepository>) -> Self {
        Self { trips, packing }
    }

    pub async fn handle(&self, cmd: SetItemPackedCommand) -> Result<PackingItem, PackingError> {
        owned_trip(self.trips.as_ref(), &cmd.trip_id, &cmd.user_id).await?;
        let category = parse_category(&cmd.category)?;

        let item = self
            .packing
            .set_item_packed(&cmd.trip_id, category, &cmd.item_id, cmd.packed)
            .await?;

        tracing::debug!(
            trip_id = %cmd.trip_id,
            item_id = %item.id,
            is_packed = item.is_packed,
            "Packing item updated"
        );
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::application::handlers::testing::{owner, seed_trip};
    use crate::domain::packing::{NewPackingItem, PackingCategory, Priority};

    async fn setup() -> (MemoryStore, TripId, PackingItem) {
        let store = MemoryStore::new();
        let trip = seed_trip(&store).await;
        let item = PackingItem::create(NewPackingItem {
            name: "Charger".to_string(),
            quantity: 1,
            notes: None,
            priority: Priority::Important,
        })
        .unwrap();
        store
            .add_item(trip.id(), PackingCategory::Electronics, &item)
            .await
            .unwrap();
        (store, *trip.id(), item)
    }

    fn command(trip_id: TripId, item_id: PackingItemId, packed: Option<bool>) -> SetItemPackedCommand {
        SetItemPackedCommand {
            trip_id,
            user_id: owner(),
            category: "electronics".to_string(),
            item_id,
            packed,
        }
    }

    #[tokio::test]
    async fn toggling_twice_restores_state_and_keeps_id() {
        let (store, trip_id, item) = setup().await;
        let handler = SetItemPackedHandler::new(Arc::new(store.clone()), Arc::new(store));

        let first = handler.handle(command(trip_id, item.id, None)).await.unwrap();
        let second = handler.handle(command(trip_id, item.id, None)).await.unwrap();

        assert!(first.is_packed);
        assert!(!second.is_packed);
        assert_eq!(second.id, item.id);
    }

    #[tokio::test]
    async fn explicit_flag_is_idempotent() {
        let (store, trip_id, item) = setup().await;
        let handler = SetItemPackedHandler::new(Arc::new(store.clone()), Arc::new(store));

        handler.handle(command(trip_id, item.id, Some(true))).await.unwrap();
        let again = handler.handle(command(trip_id, item.id, Some(true))).await.unwrap();

        assert!(again.is_packed);
    }

    #[tokio::test]
    async fn unknown_item_is_not_found() {
        let (store, trip_id, _) = setup().await;
        let handler = SetItemPackedHandler::new(Arc::new(store.clone()), Arc::new(store));
        let stranger = PackingItemId::new();

        let err = handler.handle(command(trip_id, stranger, None)).await.unwrap_err();

        assert_eq!(err, PackingError::ItemNotFound(stranger));
    }
}
