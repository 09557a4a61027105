use log::warn;
use thiserror::Error;

use super::Timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Key-value capability backing the submission ledger.
#[cfg_attr(test, mockall::automock)]
pub trait LedgerStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`, looked up on every access so a storage that
/// appears or disappears mid-session is picked up.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StorageError::Unavailable),
            Err(e) => Err(StorageError::Backend(format!("{:?}", e))),
        }
    }
}

impl LedgerStore for LocalStorageStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }
}

#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

#[cfg(test)]
impl LedgerStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads the ledger and drops entries older than `window_ms`.
/// Any fault yields an empty ledger.
pub fn load(store: &dyn LedgerStore, key: &str, now: Timestamp, window_ms: i64) -> Vec<Timestamp> {
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("Submission ledger unreadable, treating as empty: {}", e);
            return Vec::new();
        }
    };

    let entries: Vec<Timestamp> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Submission ledger corrupt, treating as empty: {}", e);
            return Vec::new();
        }
    };

    prune(entries, now, window_ms)
}

pub fn prune(entries: Vec<Timestamp>, now: Timestamp, window_ms: i64) -> Vec<Timestamp> {
    entries
        .into_iter()
        .filter(|t| now.saturating_sub(*t) < window_ms)
        .collect()
}

/// Persists the ledger. Failures are logged and otherwise ignored.
pub fn save(store: &mut dyn LedgerStore, key: &str, entries: &[Timestamp]) {
    let encoded = match serde_json::to_string(entries) {
        Ok(encoded) => encoded,
        Err(e) => {
            warn!("Could not encode submission ledger: {}", e);
            return;
        }
    };
    if let Err(e) = store.write(key, &encoded) {
        warn!("Submission ledger not persisted: {}", e);
    }
}
