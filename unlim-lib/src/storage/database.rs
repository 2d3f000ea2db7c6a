use log::debug;
use sled::{Db, Tree};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::sync::Mutex;

const SETTINGS_TREE: &str = "settings";

#[derive(Debug)]
pub enum StoreError {
    DatabaseFailure(String),
    InvalidValue(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DatabaseFailure(msg) => write!(f, "Database error: {}", msg),
            StoreError::InvalidValue(msg) => write!(f, "Invalid stored value: {}", msg),
        }
    }
}

impl Error for StoreError {}

impl From<sled::Error> for StoreError {
    fn from(e: sled::Error) -> Self {
        StoreError::DatabaseFailure(e.to_string())
    }
}

/// String key/value storage that survives between runs.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct SledStore {
    _db: Db,
    tree: Tree,
}

impl SledStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    /// A throwaway database, removed when dropped.
    pub fn temporary() -> Result<Self, StoreError> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> Result<Self, StoreError> {
        let tree = db.open_tree(SETTINGS_TREE)?;
        Ok(Self { _db: db, tree })
    }

    /// Open the store if the environment allows it.
    ///
    /// Returns `None` when the database cannot be opened (another instance holds
    /// the lock, bad permissions, corrupted files).
    pub fn detect(path: &Path) -> Option<Self> {
        match Self::open(path) {
            Ok(store) => Some(store),
            Err(e) => {
                debug!("Local storage unavailable at {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.tree.get(key)? {
            Some(value) => String::from_utf8(value.to_vec())
                .map(Some)
                .map_err(|e| StoreError::InvalidValue(e.to_string())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.tree.insert(key, value.as_bytes())?;
        self.tree.flush()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.tree.remove(key)?;
        self.tree.flush()?;
        Ok(())
    }
}

/// Process-local store, mostly useful in tests.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        store
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.values
            .lock()
            .map_err(|e| StoreError::DatabaseFailure(e.to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sled_store_roundtrip() {
        let store = SledStore::temporary().unwrap();
        assert_eq!(store.get("snooze").unwrap(), None);

        store.set("snooze", "1700000000000").unwrap();
        assert_eq!(store.get("snooze").unwrap().as_deref(), Some("1700000000000"));

        store.remove("snooze").unwrap();
        assert_eq!(store.get("snooze").unwrap(), None);
    }

    #[test]
    fn test_sled_store_overwrites() {
        let store = SledStore::temporary().unwrap();
        store.set("snooze", "1").unwrap();
        store.set("snooze", "2").unwrap();
        assert_eq!(store.get("snooze").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_detect_unusable_path() {
        let file = std::env::temp_dir().join(format!("unlim-not-a-dir-{}", std::process::id()));
        std::fs::write(&file, b"plain file").unwrap();
        assert!(SledStore::detect(&file.join("db")).is_none());
        std::fs::remove_file(&file).unwrap();
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::with_value("key", "value");
        assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));
        store.remove("key").unwrap();
        assert!(store.get("key").unwrap().is_none());
    }
}
