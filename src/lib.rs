//! keyval — JSON-file key-value storage located through a config pointer

pub mod storage;

// Re-export commonly used types
pub use storage::{ConfigStore, KeyValueStore, StorageError, StorageResolver};
