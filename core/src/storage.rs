//! Key/value storage shared by every store.
//!
//! The browser exposes `sessionStorage` and `localStorage` as synchronous
//! string maps. Stores talk to them through [`StorageBackend`] so the same
//! code runs against [`MemoryStorage`] in tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::{RepairError, Result};

/// Storage keys used by the site.
pub mod keys {
    pub const USER_ADDRESSES: &str = "userAddresses";
    pub const USER_BOOKINGS: &str = "userBookings";
    pub const USER_PROFILE: &str = "userProfile";
    pub const CURRENT_USER: &str = "currentUser";
    pub const USER: &str = "user";
    pub const REPAIR_BOOKINGS: &str = "repairBookings";
    pub const CURRENT_WORKER: &str = "currentWorker";
    pub const THEME: &str = "theme";
}

/// A synchronous string map, e.g. `window.sessionStorage`.
pub trait StorageBackend: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

pub type SharedStorage = Arc<dyn StorageBackend>;

/// In-process storage backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStorage {
        Arc::new(Self::new())
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self
            .items
            .lock()
            .map_err(|e| RepairError::Storage(format!("memory storage poisoned: {}", e)))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|e| RepairError::Storage(format!("memory storage poisoned: {}", e)))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|e| RepairError::Storage(format!("memory storage poisoned: {}", e)))?;
        items.remove(key);
        Ok(())
    }
}

/// Read a JSON value, falling back to `T::default()` when the key is
/// missing, unreadable or holds malformed JSON.
pub fn read_json_or_default<T>(storage: &dyn StorageBackend, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    read_json(storage, key).unwrap_or_default()
}

/// Read a JSON value. Missing keys and parse failures both yield `None`.
pub fn read_json<T>(storage: &dyn StorageBackend, key: &str) -> Option<T>
where
    T: DeserializeOwned,
{
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Failed to read '{}': {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Discarding malformed JSON under '{}': {}", key, e);
            None
        }
    }
}

/// Serialize `value` and write it under `key`, replacing what was there.
pub fn write_json<T>(storage: &dyn StorageBackend, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    storage.set_item(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_default() {
        let storage = MemoryStorage::new();
        let values: Vec<u32> = read_json_or_default(&storage, "nothing");
        assert!(values.is_empty());
    }

    #[test]
    fn test_malformed_json_reads_default() {
        let storage = MemoryStorage::new();
        storage.set_item("broken", "[{not json").unwrap();
        let values: Vec<u32> = read_json_or_default(&storage, "broken");
        assert!(values.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let storage = MemoryStorage::new();
        write_json(&storage, "numbers", &vec![3, 1, 2]).unwrap();
        let values: Vec<u32> = read_json_or_default(&storage, "numbers");
        assert_eq!(values, vec![3, 1, 2]);
    }

    #[test]
    fn test_remove_item() {
        let storage = MemoryStorage::new();
        storage.set_item("k", "\"v\"").unwrap();
        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }
}
