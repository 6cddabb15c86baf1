//! Small durable key-value store
//!
//! Holds the last target URL and the devtools theme. Reads and writes never
//! fail at the call site: unavailable storage (read-only home, corrupt file,
//! quota) is logged and the caller falls back to its in-memory default.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::{PreviewError, ResultExt};

/// Key under which the editor remembers the last applied target URL
pub const TARGET_URL_KEY: &str = "theme-editor-target-url";

/// Default target when nothing is stored (the editor's built-in preview page)
pub const DEFAULT_TARGET_URL: &str = "/preview";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Volatile store for tests and for sessions with persistence disabled
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// Flat string map persisted as pretty JSON
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store, starting empty if the file is missing or unreadable
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = Self::read(&path).map_err(|e| e.log()).unwrap_or_default();
        JsonFileStore { path, values }
    }

    /// Open at the configured `storagePath`, or the default location
    pub fn for_settings(settings: &Settings) -> Self {
        Self::open(
            settings
                .resolved_storage_path()
                .unwrap_or_else(Self::default_path),
        )
    }

    /// `~/.previewcn/storage.json`
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".previewcn"))
            .unwrap_or_else(|| std::env::temp_dir().join("previewcn"))
            .join("storage.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> crate::error::Result<BTreeMap<String, String>> {
        if !path.exists() {
            debug!(path = %path.display(), "Storage file not found, starting empty");
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path).map_err(|source| PreviewError::Storage {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| PreviewError::StorageFormat {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn save(&self) -> crate::error::Result<()> {
        let storage_err = |source| PreviewError::Storage {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(storage_err)?;
        }
        let json =
            serde_json::to_string_pretty(&self.values).map_err(|e| PreviewError::StorageFormat {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        fs::write(&self.path, json).map_err(storage_err)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        if let Err(e) = self.save() {
            e.log();
        }
    }

    fn remove(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            if let Err(e) = self.save() {
                e.log();
            }
        }
    }
}

/// Last applied target URL, or `default` when nothing usable is stored
pub fn get_stored_url(store: &dyn KeyValueStore, default: &str) -> String {
    match store.get(TARGET_URL_KEY) {
        Some(url) if !url.is_empty() => url,
        _ => default.to_string(),
    }
}

pub fn set_stored_url(store: &mut dyn KeyValueStore, url: &str) {
    store.set(TARGET_URL_KEY, url);
}

/// Load a JSON value stored under `key`; corrupt entries read as absent
pub fn get_json<T: serde::de::DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key = %key, error = %e, "Ignoring corrupt stored value");
            None
        }
    }
}

pub fn set_json<T: serde::Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
    if let Some(json) = serde_json::to_string(value).warn_on_err() {
        store.set(key, &json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Storage that is never available (private browsing, quota exceeded)
    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn set(&mut self, _key: &str, _value: &str) {}
        fn remove(&mut self, _key: &str) {}
    }

    #[test]
    fn test_stored_url_defaults_when_unavailable() {
        let mut store = FailingStore;
        set_stored_url(&mut store, "http://localhost:3000");
        assert_eq!(get_stored_url(&store, DEFAULT_TARGET_URL), "/preview");
    }

    #[test]
    fn test_stored_url_ignores_empty_value() {
        let mut store = MemoryStore::new();
        set_stored_url(&mut store, "");
        assert_eq!(get_stored_url(&store, DEFAULT_TARGET_URL), "/preview");
        set_stored_url(&mut store, "http://localhost:3000");
        assert_eq!(get_stored_url(&store, DEFAULT_TARGET_URL), "http://localhost:3000");
    }

    #[test]
    fn test_json_file_store_persists_across_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = JsonFileStore::open(&path);
        store.set(TARGET_URL_KEY, "http://localhost:4000");

        let reopened = JsonFileStore::open(&path);
        assert_eq!(
            reopened.get(TARGET_URL_KEY).as_deref(),
            Some("http://localhost:4000")
        );
    }

    #[test]
    fn test_json_file_store_writes_a_json_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = JsonFileStore::open(&path);
        store.set(TARGET_URL_KEY, "/preview");

        let written: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.get(TARGET_URL_KEY).map(String::as_str), Some("/preview"));
    }

    #[test]
    fn test_json_file_store_survives_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.get(TARGET_URL_KEY), None);

        store.set("k", "v");
        assert_eq!(JsonFileStore::open(&path).get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_json_file_store_unwritable_path_is_silent() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        // Parent "directory" is a regular file, so every save fails
        let mut store = JsonFileStore::open(blocker.join("storage.json"));
        store.set("k", "v");
        store.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_json_helpers_ignore_corrupt_entries() {
        let mut store = MemoryStore::new();
        store.set("theme", "[[[");
        assert_eq!(get_json::<Vec<String>>(&store, "theme"), None);

        set_json(&mut store, "theme", &vec!["a".to_string()]);
        assert_eq!(get_json::<Vec<String>>(&store, "theme"), Some(vec!["a".into()]));
    }
}
