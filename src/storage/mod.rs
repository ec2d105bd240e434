//! Device-local durable key-value storage backing the tracker.
//!
//! The tracker writes its working set here on every mutation and reads it
//! once at session start. Only the tracker touches these keys.

pub mod error;
pub mod file;
pub mod memory;

pub use error::*;
pub use file::FileStore;
pub use memory::MemoryStore;

/// A string key-value store private to this device.
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
