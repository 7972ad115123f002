pub mod config;
pub mod error;
pub mod json;
pub mod kv;
pub mod resolver;

#[cfg(test)]
mod config_tests;

pub use config::{ConfigStore, PathData};
pub use error::{JsonFileError, Result, StorageError};
pub use kv::KeyValueStore;
pub use resolver::{FixedFolder, FolderSource, PromptFolder, ResolverConfig, StorageResolver};

/// Key under which a storage file records its own path, and under which the
/// pointer file records where the storage file lives.
pub const STORAGE_PATH_KEY: &str = "storage_path";

/// Pointer file name inside the config folder.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Storage file name inside the chosen data folder.
pub const STORAGE_FILE_NAME: &str = "storage.json";
