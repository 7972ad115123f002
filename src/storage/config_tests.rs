//! Unit tests for the pointer file

use serde_json::{Map, Value, json};

use super::config::{ConfigStore, PathData};
use super::error::{JsonFileError, StorageError};

fn store_in(dir: &std::path::Path) -> ConfigStore {
    ConfigStore::new(PathData {
        config_folder_path: dir.join("cfg"),
        config_file_name: "config.json".into(),
    })
}

fn pointer(key: &str, value: Value) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert(key.to_string(), value);
    data
}

#[test]
fn load_missing_is_none() {
    let dir = tempfile::tempdir().unwrap();
    assert!(store_in(dir.path()).load_pointer().unwrap().is_none());
}

#[test]
fn save_creates_folder_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = store_in(dir.path());

    config
        .save_pointer(pointer("storage_path", json!("/data/storage.json")))
        .unwrap();

    assert_eq!(config.path(), dir.path().join("cfg").join("config.json"));
    let loaded = config.load_pointer().unwrap().unwrap();
    assert_eq!(loaded["storage_path"], json!("/data/storage.json"));
}

#[test]
fn save_merges_into_existing_document() {
    let dir = tempfile::tempdir().unwrap();
    let config = store_in(dir.path());

    config.save_pointer(pointer("theme", json!("dark"))).unwrap();
    config.save_pointer(pointer("storage_path", json!("/a"))).unwrap();
    config.save_pointer(pointer("storage_path", json!("/b"))).unwrap();

    let loaded = config.load_pointer().unwrap().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded["theme"], json!("dark"));
    assert_eq!(loaded["storage_path"], json!("/b"));
}

#[test]
fn load_malformed_is_config_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = store_in(dir.path());
    std::fs::create_dir_all(dir.path().join("cfg")).unwrap();
    std::fs::write(config.path(), "{ broken").unwrap();

    let err = config.load_pointer().unwrap_err();
    assert!(matches!(
        err,
        StorageError::ConfigRead {
            source: JsonFileError::Parse(_),
            ..
        }
    ));
}

#[test]
fn save_refuses_to_merge_into_malformed_document() {
    let dir = tempfile::tempdir().unwrap();
    let config = store_in(dir.path());
    std::fs::create_dir_all(dir.path().join("cfg")).unwrap();
    std::fs::write(config.path(), "\"just a string\"").unwrap();

    let err = config
        .save_pointer(pointer("storage_path", json!("/a")))
        .unwrap_err();
    assert!(matches!(err, StorageError::ConfigRead { .. }));
    assert_eq!(
        std::fs::read_to_string(config.path()).unwrap(),
        "\"just a string\""
    );
}

#[test]
fn save_into_unwritable_location_is_config_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = store_in(dir.path());
    // A directory squatting on the temp file name makes the write fail.
    std::fs::create_dir_all(dir.path().join("cfg").join("config.tmp")).unwrap();

    let err = config
        .save_pointer(pointer("storage_path", json!("/a")))
        .unwrap_err();
    assert!(matches!(err, StorageError::ConfigWrite { .. }));
    assert!(config.load_pointer().unwrap().is_none());
}
