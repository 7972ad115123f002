//! Locating the storage file on startup.
//!
//! The pointer file names a storage file, and the storage file names itself
//! under the same key. [`StorageResolver::resolve`] loads the store when both
//! agree and creates a new one only when there is no pointer at all. A pointer
//! that leads to an unreadable or disagreeing store is reported, never papered
//! over with a fresh store.

use std::path::{Path, PathBuf};

use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;
use serde_json::{Map, Value};

use super::config::{ConfigStore, PathData};
use super::error::{Result, StorageError};
use super::json::{ensure_folder_exists, string_entry};
use super::kv::KeyValueStore;
use super::{CONFIG_FILE_NAME, STORAGE_FILE_NAME, STORAGE_PATH_KEY};

/// Supplies the folder a new storage file is created in.
pub trait FolderSource {
    fn target_folder(&self) -> Result<PathBuf>;
}

/// Asks the operator on the terminal.
#[derive(Debug, Clone)]
pub struct PromptFolder {
    pub prompt: String,
}

impl Default for PromptFolder {
    fn default() -> Self {
        Self {
            prompt: "Provide PATH for keyval DATA FOLDER:>".to_string(),
        }
    }
}

impl FolderSource for PromptFolder {
    fn target_folder(&self) -> Result<PathBuf> {
        let answer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(&self.prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| StorageError::FolderUnavailable(e.to_string()))?;

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(StorageError::FolderUnavailable(
                "empty folder path".to_string(),
            ));
        }
        Ok(PathBuf::from(answer))
    }
}

/// Always answers with the same folder.
#[derive(Debug, Clone)]
pub struct FixedFolder(pub PathBuf);

impl FolderSource for FixedFolder {
    fn target_folder(&self) -> Result<PathBuf> {
        Ok(self.0.clone())
    }
}

/// Parameters that must stay the same across runs of one installation.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub config_dir: PathBuf,
    pub config_file_name: String,
    pub storage_file_name: String,
    pub storage_path_key: String,
}

impl ResolverConfig {
    /// Default file names and key, pointer file inside `config_dir`.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            config_file_name: CONFIG_FILE_NAME.to_string(),
            storage_file_name: STORAGE_FILE_NAME.to_string(),
            storage_path_key: STORAGE_PATH_KEY.to_string(),
        }
    }
}

pub struct StorageResolver {
    config: ResolverConfig,
    pointer: ConfigStore,
    folders: Box<dyn FolderSource>,
}

impl StorageResolver {
    pub fn new(config: ResolverConfig, folders: impl FolderSource + 'static) -> Self {
        let pointer = ConfigStore::new(PathData {
            config_folder_path: config.config_dir.clone(),
            config_file_name: config.config_file_name.clone(),
        });
        Self {
            config,
            pointer,
            folders: Box::new(folders),
        }
    }

    pub fn config_path(&self) -> &Path {
        self.pointer.path()
    }

    pub fn storage_path_key(&self) -> &str {
        &self.config.storage_path_key
    }

    /// Open the configured store, creating one if no pointer file exists yet.
    pub fn resolve(&self) -> Result<KeyValueStore> {
        match self.load_existing()? {
            Some(store) => Ok(store),
            None => self.create_new(),
        }
    }

    /// Follow the pointer file to its store and check that the store records
    /// the same path. `None` when there is no pointer file.
    pub fn load_existing(&self) -> Result<Option<KeyValueStore>> {
        let Some(pointer) = self.pointer.load_pointer()? else {
            return Ok(None);
        };
        let recorded = string_entry(&pointer, &self.config.storage_path_key)
            .map_err(|e| self.pointer.read_error(e))?;

        let store = KeyValueStore::open(&recorded)?;
        self.verify(&store, &recorded)?;
        Ok(Some(store))
    }

    /// Create a store in a folder from the [`FolderSource`] and point the
    /// config file at it, merging into any pointer document already there.
    ///
    /// A storage file already sitting in the folder is adopted when it
    /// records its own path and rejected otherwise; it is never overwritten.
    pub fn create_new(&self) -> Result<KeyValueStore> {
        // Fail on a malformed pointer before anything is written.
        self.pointer.load_pointer()?;
        let store = self.create_in_folder()?;
        self.pointer.save_pointer(self.self_reference(self.recorded_path(store.path())?))?;
        Ok(store)
    }

    /// Like [`create_new`](Self::create_new), but replaces the pointer
    /// document wholesale, so a malformed pointer file does not block it.
    pub fn recreate(&self) -> Result<KeyValueStore> {
        let store = self.create_in_folder()?;
        self.pointer
            .replace_pointer(self.self_reference(self.recorded_path(store.path())?))?;
        Ok(store)
    }

    /// Point the config file at an existing store, provided that store
    /// records its own location.
    pub fn repoint(&self, storage_file: &Path) -> Result<KeyValueStore> {
        let storage_path = storage_file
            .canonicalize()
            .map_err(|e| StorageError::StorageRead {
                path: storage_file.to_path_buf(),
                source: e.into(),
            })?;
        let recorded = self.recorded_path(&storage_path)?;

        let store = KeyValueStore::open(&storage_path)?;
        self.verify(&store, recorded)?;
        self.pointer.save_pointer(self.self_reference(recorded))?;
        Ok(store)
    }

    fn create_in_folder(&self) -> Result<KeyValueStore> {
        let folder = self.folders.target_folder()?;
        ensure_folder_exists(&folder).map_err(|source| StorageError::StorageWrite {
            path: folder.clone(),
            source,
        })?;
        let folder = folder
            .canonicalize()
            .map_err(|e| StorageError::StorageWrite {
                path: folder.clone(),
                source: e.into(),
            })?;

        let storage_path = folder.join(&self.config.storage_file_name);
        let recorded = self.recorded_path(&storage_path)?;

        if storage_path.exists() {
            let store = KeyValueStore::open(&storage_path)?;
            self.verify(&store, recorded)?;
            tracing::info!(path = recorded, "adopting existing storage file");
            return Ok(store);
        }
        KeyValueStore::create(&storage_path, self.self_reference(recorded))
    }

    fn recorded_path<'a>(&self, path: &'a Path) -> Result<&'a str> {
        path.to_str()
            .ok_or_else(|| StorageError::NonUtf8Path(path.to_path_buf()))
    }

    fn verify(&self, store: &KeyValueStore, expected: &str) -> Result<()> {
        match store.get_str(&self.config.storage_path_key) {
            Some(found) if found == expected => Ok(()),
            found => {
                tracing::error!(
                    path = expected,
                    recorded = ?found,
                    "error when loading storage file: storage failed data check"
                );
                Err(StorageError::IntegrityMismatch {
                    expected: PathBuf::from(expected),
                    recorded: found.map(str::to_string),
                })
            }
        }
    }

    fn self_reference(&self, path: &str) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert(
            self.config.storage_path_key.clone(),
            Value::String(path.to_string()),
        );
        data
    }
}
