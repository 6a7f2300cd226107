//! Storage abstractions for shopping items.

use crate::core::item::{NewItem, ShoppingItem};
use async_trait::async_trait;
use tokio::sync::watch;

/// Errors surfaced by [`ItemStore`] operations. A failed write leaves the
/// store's visible state and the subscription stream unchanged.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no item with id {0}")]
    NotFound(u64),
    #[error("storage backend failure: {0}")]
    Storage(#[from] fjall::Error),
    #[error("stored record could not be encoded or decoded: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Durable CRUD access to shopping items; the single source of truth.
///
/// All operations take `&self` and are safe to call from concurrent tasks;
/// implementations serialize mutations internally, last committed write
/// wins. Every committed mutation publishes a fresh full snapshot to the
/// receivers handed out by [`subscribe_all`](ItemStore::subscribe_all).
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Persists a new item under a freshly assigned id and returns the id.
    async fn insert(&self, draft: NewItem) -> Result<u64, StoreError>;

    /// Replaces the stored record with the same id. Fails with
    /// [`StoreError::NotFound`] if the id was never inserted.
    async fn update(&self, item: ShoppingItem) -> Result<(), StoreError>;

    /// Removes the record with the given id. Deleting an absent id is a
    /// successful no-op.
    async fn delete_by_id(&self, id: u64) -> Result<(), StoreError>;

    /// Removes every record unconditionally.
    async fn delete_all(&self) -> Result<(), StoreError>;

    /// Point lookup, no side effects.
    async fn get_by_id(&self, id: u64) -> Result<Option<ShoppingItem>, StoreError>;

    /// Subscribes to the live sequence of full snapshots, in id order.
    ///
    /// The receiver's current value is immediately readable and reflects
    /// the last committed write; rapid writes may coalesce at a slow
    /// reader, but each observed value is a complete, current set.
    fn subscribe_all(&self) -> watch::Receiver<Vec<ShoppingItem>>;
}
