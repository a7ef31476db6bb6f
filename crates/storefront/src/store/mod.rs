//! Persisted local state.
//!
//! A small string key/value store standing in for browser local storage.
//! Values that are structured (the signed-in user, the registered user list)
//! are stored as JSON strings.
//!
//! # Keys
//!
//! See [`keys`]. Keys match the names the storefront has always persisted
//! under, so existing state files keep working.
//!
//! # Corrupt state
//!
//! [`load_json`] treats unparsable JSON as absent: the bad value is logged,
//! removed, and `None` is returned. Nothing in this module is fatal to a
//! session.

mod file;

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

pub use file::FileStore;

/// Keys for persisted storefront state.
pub mod keys {
    /// Key for the remote Shopify cart ID.
    pub const CART_ID: &str = "shopifyCartId";

    /// Key for the signed-in user record (JSON).
    pub const USER: &str = "user";

    /// Key for the mock-mode registered user list (JSON array).
    pub const REGISTERED_USERS: &str = "registeredUsers";

    /// Key for the preview-mode mock data toggle (`"true"` / `"false"`).
    pub const SHOW_MOCK_DATA: &str = "showMockData";
}

/// Errors that can occur when persisting state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a value failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A previous writer panicked while holding the lock.
    #[error("store lock poisoned")]
    Poisoned,
}

/// String key/value storage.
///
/// Implementations must be thread-safe (`Send + Sync`); the cart sync worker
/// writes the cart ID from a background task.
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a value. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store, used when no state file is configured and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .remove(key);
        Ok(())
    }
}

/// Read and decode a JSON value.
///
/// Malformed JSON is logged, removed from the store, and reported as absent.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "Discarding malformed persisted state");
            if let Err(e) = store.remove(key) {
                warn!(key, error = %e, "Failed to remove malformed persisted state");
            }
            None
        }
    }
}

/// Encode and write a JSON value.
///
/// # Errors
///
/// Returns an error if encoding or persisting fails.
pub fn save_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Read the preview-mode mock data toggle.
///
/// Anything other than `"true"` counts as off; an unset key is `None`.
pub fn show_mock_data(store: &dyn KeyValueStore) -> Option<bool> {
    store.get(keys::SHOW_MOCK_DATA).map(|v| v == "true")
}

/// Write the preview-mode mock data toggle. Read again at next startup.
///
/// # Errors
///
/// Returns an error if the value cannot be persisted.
pub fn set_show_mock_data(store: &dyn KeyValueStore, show: bool) -> Result<(), StoreError> {
    store.set(keys::SHOW_MOCK_DATA, if show { "true" } else { "false" })
}
