use crate::core::item::{NewItem, ShoppingItem};
use crate::core::store::{ItemStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, watch};
use tracing::debug;

/// In-memory store implementation using HashMap and Mutex. Fulfils the same
/// contract as the fjall store, minus durability; used by tests and as an
/// ephemeral fallback.
pub struct MemoryItemStore {
    items: Mutex<HashMap<u64, ShoppingItem>>,
    next_id: AtomicU64,
    snapshot_tx: watch::Sender<Vec<ShoppingItem>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        let (snapshot_tx, _) = watch::channel(Vec::new());
        Self {
            items: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            snapshot_tx,
        }
    }

    /// Pushes the current full set to all subscribers. Called with the item
    /// lock held so the published snapshot matches the committed state.
    fn publish(&self, items: &HashMap<u64, ShoppingItem>) {
        let mut snapshot: Vec<ShoppingItem> = items.values().cloned().collect();
        snapshot.sort_by_key(|item| item.id);
        self.snapshot_tx.send_replace(snapshot);
    }
}

impl Default for MemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn insert(&self, draft: NewItem) -> Result<u64, StoreError> {
        let mut items = self.items.lock().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        items.insert(id, draft.into_item(id));
        self.publish(&items);
        debug!(id, "Inserted item");
        Ok(id)
    }

    async fn update(&self, item: ShoppingItem) -> Result<(), StoreError> {
        let mut items = self.items.lock().await;
        if !items.contains_key(&item.id) {
            return Err(StoreError::NotFound(item.id));
        }
        let id = item.id;
        items.insert(id, item);
        self.publish(&items);
        debug!(id, "Updated item");
        Ok(())
    }

    async fn delete_by_id(&self, id: u64) -> Result<(), StoreError> {
        let mut items = self.items.lock().await;
        items.remove(&id);
        self.publish(&items);
        debug!(id, "Deleted item");
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        let mut items = self.items.lock().await;
        items.clear();
        self.publish(&items);
        debug!("Deleted all items");
        Ok(())
    }

    async fn get_by_id(&self, id: u64) -> Result<Option<ShoppingItem>, StoreError> {
        let items = self.items.lock().await;
        Ok(items.get(&id).cloned())
    }

    fn subscribe_all(&self) -> watch::Receiver<Vec<ShoppingItem>> {
        self.snapshot_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milk() -> NewItem {
        NewItem::parse("Milk", "1L", "500", "Food", false).unwrap()
    }

    #[tokio::test]
    async fn test_insert_then_get_returns_input_with_assigned_id() {
        let store = MemoryItemStore::new();

        let id = store.insert(milk()).await.unwrap();
        let item = store.get_by_id(id).await.unwrap().unwrap();

        assert_eq!(id, 1);
        assert_eq!(item.name, "Milk");
        assert_eq!(item.description, "1L");
        assert_eq!(item.estimated_price, 500);
        assert_eq!(item.category, "Food");
        assert!(!item.is_bought);
    }

    #[tokio::test]
    async fn test_ids_are_assigned_in_ascending_order() {
        let store = MemoryItemStore::new();

        let first = store.insert(milk()).await.unwrap();
        let second = store.insert(milk()).await.unwrap();

        assert!(second > first);
    }

    #[tokio::test]
    async fn test_update_replaces_stored_record() {
        let store = MemoryItemStore::new();
        let id = store.insert(milk()).await.unwrap();

        let mut item = store.get_by_id(id).await.unwrap().unwrap();
        item.is_bought = true;
        store.update(item.clone()).await.unwrap();

        assert_eq!(store.get_by_id(id).await.unwrap(), Some(item));
    }

    #[tokio::test]
    async fn test_update_unknown_id_fails_with_not_found() {
        let store = MemoryItemStore::new();

        let err = store.update(milk().into_item(42)).await.unwrap_err();

        assert!(matches!(err, StoreError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_a_no_op() {
        let store = MemoryItemStore::new();
        let id = store.insert(milk()).await.unwrap();

        store.delete_by_id(id + 100).await.unwrap();

        assert!(store.get_by_id(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_all_empties_the_store() {
        let store = MemoryItemStore::new();
        store.insert(milk()).await.unwrap();
        store.insert(milk()).await.unwrap();

        store.delete_all().await.unwrap();

        assert!(store.subscribe_all().borrow().is_empty());
    }

    #[tokio::test]
    async fn test_subscriber_sees_current_set_immediately() {
        let store = MemoryItemStore::new();
        assert!(store.subscribe_all().borrow().is_empty());

        let id = store.insert(milk()).await.unwrap();

        let snapshot = store.subscribe_all().borrow().clone();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, id);
    }

    #[tokio::test]
    async fn test_subscription_tracks_insert_update_delete() {
        let store = MemoryItemStore::new();
        let rx = store.subscribe_all();

        let id = store.insert(milk()).await.unwrap();
        assert_eq!(rx.borrow().iter().filter(|i| i.id == id).count(), 1);
        assert!(!rx.borrow()[0].is_bought);

        let mut item = store.get_by_id(id).await.unwrap().unwrap();
        item.is_bought = true;
        store.update(item).await.unwrap();
        assert!(rx.borrow()[0].is_bought);

        store.delete_by_id(id).await.unwrap();
        assert!(rx.borrow().iter().all(|i| i.id != id));
    }

    #[tokio::test]
    async fn test_snapshots_are_in_insertion_order() {
        let store = MemoryItemStore::new();
        for name in ["Milk", "Bread", "Cheese"] {
            let draft = NewItem::parse(name, "some", "100", "Food", false).unwrap();
            store.insert(draft).await.unwrap();
        }

        let names: Vec<String> = store
            .subscribe_all()
            .borrow()
            .iter()
            .map(|i| i.name.clone())
            .collect();

        assert_eq!(names, vec!["Milk", "Bread", "Cheese"]);
    }
}
