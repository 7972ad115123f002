//! Error types for the storage layer.
//!
//! Raw filesystem and JSON failures are wrapped in [`JsonFileError`] by the
//! file primitives, then tagged with the failing path and the component that
//! hit them as a [`StorageError`].

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Failures of the JSON file primitives.
#[derive(Error, Debug)]
pub enum JsonFileError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("expected a JSON object at the top level")]
    NotAnObject,

    #[error("missing key `{0}`")]
    MissingKey(String),

    #[error("value under `{0}` is not a string")]
    NotAString(String),
}

impl JsonFileError {
    /// True when the underlying cause is a file that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, JsonFileError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Main error type for storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Storage file missing, unreadable or not a JSON object
    #[error("failed to read storage file {}: {source}", .path.display())]
    StorageRead {
        path: PathBuf,
        #[source]
        source: JsonFileError,
    },

    /// Storage file could not be written
    #[error("failed to write storage file {}: {source}", .path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: JsonFileError,
    },

    /// Pointer file exists but is malformed
    #[error("failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: JsonFileError,
    },

    /// Pointer file could not be written
    #[error("failed to write config file {}: {source}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: JsonFileError,
    },

    /// Pointer and storage file disagree about where the storage lives
    #[error(
        "storage file {} failed data check: it records {}",
        .expected.display(),
        describe_recorded(.recorded)
    )]
    IntegrityMismatch {
        expected: PathBuf,
        recorded: Option<String>,
    },

    /// Path cannot be recorded as a JSON string without loss
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// No data folder could be obtained for a new storage file
    #[error("no data folder available: {0}")]
    FolderUnavailable(String),
}

fn describe_recorded(recorded: &Option<String>) -> String {
    match recorded {
        Some(path) => format!("path {path}"),
        None => "no path".to_string(),
    }
}
