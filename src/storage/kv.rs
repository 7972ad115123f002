use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::{JsonFileError, Result, StorageError};
use super::json::{ensure_folder_exists, load_json, save_json};

/// String-keyed JSON values persisted to a single file.
///
/// Every mutation rewrites the whole file before returning. If the write
/// fails the in-memory map is put back the way it was, so memory never holds
/// a change the disk does not.
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl KeyValueStore {
    /// Load the store persisted at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = load_json(&path).map_err(|source| {
            tracing::error!(path = %path.display(), error = %source, "error when loading storage file");
            StorageError::StorageRead {
                path: path.clone(),
                source,
            }
        })?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "storage file loaded");
        Ok(Self { path, entries })
    }

    /// Write `initial` to `path` as a fresh store, creating parent folders.
    ///
    /// An existing file at `path` is replaced.
    pub fn create(path: impl Into<PathBuf>, initial: Map<String, Value>) -> Result<Self> {
        let path = path.into();
        let store = Self {
            path,
            entries: initial,
        };
        if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_folder_exists(parent).map_err(|e| store.write_error(e))?;
        }
        store.persist()?;
        tracing::info!(path = %store.path.display(), "storage file created");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value stored under `key`, `None` when absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// String value stored under `key`, `None` when absent or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Deserialize the value under `key` into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<serde_json::Result<T>> {
        self.entries
            .get(key)
            .map(|v| serde_json::from_value(v.clone()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Sorted keys, optionally restricted to a prefix, at most `limit` of them.
    pub fn keys(&self, prefix: Option<&str>, limit: usize) -> Vec<String> {
        let mut keys: Vec<&String> = self
            .entries
            .keys()
            .filter(|k| prefix.is_none_or(|p| k.starts_with(p)))
            .collect();
        keys.sort();
        keys.into_iter().take(limit).cloned().collect()
    }

    /// Store `value` under `key` and persist. Returns the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<Option<Value>> {
        let key = key.into();
        let previous = self.entries.insert(key.clone(), value.into());

        if let Err(e) = self.persist() {
            match previous {
                Some(old) => self.entries.insert(key, old),
                None => self.entries.remove(&key),
            };
            return Err(e);
        }
        Ok(previous)
    }

    /// Remove `key` and persist. Absent keys leave the file untouched.
    pub fn delete(&mut self, key: &str) -> Result<Option<Value>> {
        let Some(previous) = self.entries.remove(key) else {
            return Ok(None);
        };

        if let Err(e) = self.persist() {
            self.entries.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(Some(previous))
    }

    fn persist(&self) -> Result<()> {
        save_json(&self.path, &self.entries).map_err(|e| self.write_error(e))
    }

    fn write_error(&self, source: JsonFileError) -> StorageError {
        tracing::error!(path = %self.path.display(), error = %source, "error when saving storage file");
        StorageError::StorageWrite {
            path: self.path.clone(),
            source,
        }
    }
}
