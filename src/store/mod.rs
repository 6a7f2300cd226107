pub mod disk;
pub mod memory;

// Re-export the implementations alongside the trait they fulfil
pub use crate::core::store::{ItemStore, StoreError};
pub use disk::FjallItemStore;
pub use memory::MemoryItemStore;
