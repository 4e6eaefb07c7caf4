use crate::models::Property;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Key the favourites list is stored under
pub const FAVOURITES_KEY: &str = "favouriteProperties";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("stored favourites are malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Persistence port for the favourites list
pub trait FavouritesStore {
    /// Read the saved list. `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Vec<Property>>, StoreError>;

    /// Replace the saved list with `favourites`.
    fn save(&self, favourites: &[Property]) -> Result<(), StoreError>;
}

/// In-memory store holding the serialized list as text, the same shape a
/// browser's local storage would hold.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw stored value, which need not be valid JSON.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(Some(raw.into())),
        }
    }

    /// The currently stored text.
    pub fn raw(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl FavouritesStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<Property>>, StoreError> {
        match self.value.borrow().as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, favourites: &[Property]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(favourites)?;
        *self.value.borrow_mut() = Some(raw);
        Ok(())
    }
}

/// Local-storage style key-value file.
///
/// The file is a JSON object mapping keys to string values. The favourites
/// list lives under one key as serialized JSON text; other keys are left alone.
#[derive(Debug, Clone)]
pub struct LocalStorageFile {
    path: PathBuf,
    key: String,
}

impl LocalStorageFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_key(path, FAVOURITES_KEY)
    }

    pub fn with_key(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_entries(&self) -> Result<Option<Map<String, Value>>, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }
}

impl FavouritesStore for LocalStorageFile {
    fn load(&self) -> Result<Option<Vec<Property>>, StoreError> {
        let Some(entries) = self.read_entries()? else {
            debug!("No storage file at {}", self.path.display());
            return Ok(None);
        };

        match entries.get(&self.key) {
            Some(Value::String(raw)) => Ok(Some(serde_json::from_str(raw)?)),
            // A list written inline rather than as text is accepted as well.
            Some(value) if value.is_array() => Ok(Some(serde_json::from_value(value.clone())?)),
            Some(other) => Err(StoreError::Malformed(<serde_json::Error as serde::de::Error>::custom(
                format!("expected a JSON string under '{}', found {}", self.key, other),
            ))),
            None => Ok(None),
        }
    }

    fn save(&self, favourites: &[Property]) -> Result<(), StoreError> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries.unwrap_or_default(),
            Err(StoreError::Malformed(e)) => {
                warn!("Overwriting unreadable storage file {}: {}", self.path.display(), e);
                Map::new()
            }
            Err(e) => return Err(e),
        };

        entries.insert(
            self.key.clone(),
            Value::String(serde_json::to_string(favourites)?),
        );

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(&Value::Object(entries))?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))?;

        debug!("Saved {} favourites to {}", favourites.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::tests::catalogue;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&catalogue()).unwrap();
        assert_eq!(store.load().unwrap(), Some(catalogue()));
        assert!(store.raw().unwrap().starts_with('['));
    }

    #[test]
    fn test_memory_store_malformed() {
        let store = MemoryStore::with_raw("{not json");
        assert!(matches!(store.load(), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = LocalStorageFile::new(dir.path().join("storage.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let store = LocalStorageFile::new(&path);
        store.save(&catalogue()[..1]).unwrap();

        let entries: Map<String, Value> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(entries["theme"], "dark");
        assert!(entries[FAVOURITES_KEY].is_string());
        assert_eq!(store.load().unwrap(), Some(catalogue()[..1].to_vec()));
    }

    #[test]
    fn test_file_store_custom_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let a = LocalStorageFile::with_key(&path, "a");
        let b = LocalStorageFile::with_key(&path, "b");

        a.save(&catalogue()).unwrap();
        assert!(b.load().unwrap().is_none());
        assert_eq!(a.load().unwrap().map(|f| f.len()), Some(3));
    }

    #[test]
    fn test_file_store_malformed_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"favouriteProperties":"[{\"id\":"}"#).unwrap();
        let store = LocalStorageFile::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Malformed(_))));

        std::fs::write(&path, r#"{"favouriteProperties":7}"#).unwrap();
        assert!(matches!(store.load(), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_file_store_recovers_from_corrupt_file_on_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "garbage").unwrap();

        let store = LocalStorageFile::new(&path);
        assert!(store.load().is_err());
        store.save(&[]).unwrap();
        assert_eq!(store.load().unwrap(), Some(vec![]));
    }
}
