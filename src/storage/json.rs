//! JSON document primitives shared by the storage and config files.

use std::path::Path;

use serde_json::{Map, Value};

use super::error::JsonFileError;

/// Read a JSON document whose top level must be an object.
pub fn load_json(path: &Path) -> Result<Map<String, Value>, JsonFileError> {
    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str(&content)? {
        Value::Object(map) => Ok(map),
        _ => Err(JsonFileError::NotAnObject),
    }
}

/// Write `data` as pretty JSON, replacing the whole file.
///
/// Goes through a sibling `.tmp` file and a rename so a failed write leaves
/// the previous document in place.
pub fn save_json(path: &Path, data: &Map<String, Value>) -> Result<(), JsonFileError> {
    let content = serde_json::to_string_pretty(data)?;
    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, content)?;

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e.into());
    }
    Ok(())
}

/// Create `path` and any missing parents.
pub fn ensure_folder_exists(path: &Path) -> Result<(), JsonFileError> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Extract the string stored under `key`.
pub fn string_entry(data: &Map<String, Value>, key: &str) -> Result<String, JsonFileError> {
    match data.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(JsonFileError::NotAString(key.to_string())),
        None => Err(JsonFileError::MissingKey(key.to_string())),
    }
}
