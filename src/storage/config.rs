use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::error::{JsonFileError, Result, StorageError};
use super::json::{ensure_folder_exists, load_json, save_json};

/// Where the pointer file lives.
#[derive(Debug, Clone)]
pub struct PathData {
    pub config_folder_path: PathBuf,
    pub config_file_name: String,
}

/// Reads and writes the small pointer document that records where the
/// storage file lives. It does not look at what the pointer references.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    folder_path: PathBuf,
    full_path: PathBuf,
}

impl ConfigStore {
    pub fn new(path_data: PathData) -> Self {
        let full_path = path_data
            .config_folder_path
            .join(&path_data.config_file_name);
        Self {
            folder_path: path_data.config_folder_path,
            full_path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.full_path
    }

    /// Parsed pointer document, or `None` when the file does not exist.
    pub fn load_pointer(&self) -> Result<Option<Map<String, Value>>> {
        match load_json(&self.full_path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.is_not_found() => {
                tracing::debug!(path = %self.full_path.display(), "no config file");
                Ok(None)
            }
            Err(e) => Err(self.read_error(e)),
        }
    }

    /// Merge `data` into the existing pointer document (or start a new one)
    /// and persist it.
    pub fn save_pointer(&self, data: Map<String, Value>) -> Result<()> {
        let mut merged = self.load_pointer()?.unwrap_or_default();
        merged.extend(data);
        self.write(&merged)
    }

    /// Write `data` as the whole pointer document, discarding whatever the
    /// file held before, readable or not.
    pub fn replace_pointer(&self, data: Map<String, Value>) -> Result<()> {
        self.write(&data)
    }

    fn write(&self, data: &Map<String, Value>) -> Result<()> {
        ensure_folder_exists(&self.folder_path).map_err(|e| self.write_error(e))?;
        save_json(&self.full_path, data).map_err(|e| self.write_error(e))?;

        tracing::info!(path = %self.full_path.display(), "config file saved");
        Ok(())
    }

    pub(crate) fn read_error(&self, source: JsonFileError) -> StorageError {
        tracing::error!(path = %self.full_path.display(), error = %source, "error when loading config file");
        StorageError::ConfigRead {
            path: self.full_path.clone(),
            source,
        }
    }

    fn write_error(&self, source: JsonFileError) -> StorageError {
        tracing::error!(path = %self.full_path.display(), error = %source, "error when saving config file");
        StorageError::ConfigWrite {
            path: self.full_path.clone(),
            source,
        }
    }
}
