use crate::core::item::{NewItem, ShoppingItem};
use crate::core::store::{ItemStore, StoreError};
use async_trait::async_trait;
use fjall::{PartitionCreateOptions, PartitionHandle};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, watch};
use tracing::debug;

/// Persistent store on a fjall keyspace: a single `items` partition keyed
/// by the big-endian id bytes, values JSON-encoded, so a full scan yields
/// the records in insertion order.
pub struct FjallItemStore {
    // Keeps the keyspace (journal, flush workers) alive for the handle.
    _keyspace: fjall::Keyspace,
    items: PartitionHandle,
    next_id: AtomicU64,
    write_lock: Mutex<()>,
    snapshot_tx: watch::Sender<Vec<ShoppingItem>>,
}

fn read_all(items: &PartitionHandle) -> Result<Vec<ShoppingItem>, StoreError> {
    let mut all = Vec::new();
    for kv in items.iter() {
        let (_, value) = kv?;
        all.push(serde_json::from_slice(&value)?);
    }
    Ok(all)
}

impl FjallItemStore {
    /// Opens (or creates) the item database at the given directory. The id
    /// counter resumes above the highest stored id.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let keyspace = fjall::Config::new(path.as_ref()).open()?;
        let items = keyspace.open_partition("items", PartitionCreateOptions::default())?;

        let snapshot = read_all(&items)?;
        let next_id = snapshot.last().map_or(1, |item| item.id + 1);
        debug!(items = snapshot.len(), next_id, "Opened item store");
        let (snapshot_tx, _) = watch::channel(snapshot);

        Ok(Self {
            _keyspace: keyspace,
            items,
            next_id: AtomicU64::new(next_id),
            write_lock: Mutex::new(()),
            snapshot_tx,
        })
    }

    /// Re-reads the committed set and pushes it to all subscribers. Called
    /// with the write lock held, after the mutation succeeded; a failed
    /// write never reaches this point, so subscribers only ever observe
    /// committed state.
    fn publish(&self) -> Result<(), StoreError> {
        let snapshot = read_all(&self.items)?;
        self.snapshot_tx.send_replace(snapshot);
        Ok(())
    }
}

#[async_trait]
impl ItemStore for FjallItemStore {
    async fn insert(&self, draft: NewItem) -> Result<u64, StoreError> {
        let _guard = self.write_lock.lock().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let item = draft.into_item(id);
        self.items.insert(id.to_be_bytes(), serde_json::to_vec(&item)?)?;
        self.publish()?;
        debug!(id, "Inserted item");
        Ok(id)
    }

    async fn update(&self, item: ShoppingItem) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        if !self.items.contains_key(item.id.to_be_bytes())? {
            return Err(StoreError::NotFound(item.id));
        }
        self.items
            .insert(item.id.to_be_bytes(), serde_json::to_vec(&item)?)?;
        self.publish()?;
        debug!(id = item.id, "Updated item");
        Ok(())
    }

    async fn delete_by_id(&self, id: u64) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.items.remove(id.to_be_bytes())?;
        self.publish()?;
        debug!(id, "Deleted item");
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let keys = self
            .items
            .iter()
            .map(|kv| kv.map(|(key, _)| key))
            .collect::<Result<Vec<_>, fjall::Error>>()?;
        for key in keys {
            self.items.remove(key)?;
        }
        self.publish()?;
        debug!("Deleted all items");
        Ok(())
    }

    async fn get_by_id(&self, id: u64) -> Result<Option<ShoppingItem>, StoreError> {
        match self.items.get(id.to_be_bytes())? {
            Some(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
            None => Ok(None),
        }
    }

    fn subscribe_all(&self) -> watch::Receiver<Vec<ShoppingItem>> {
        self.snapshot_tx.subscribe()
    }
}
