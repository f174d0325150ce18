//! Key/value storage backing the durable mirrors of the cart and wishlist.
//!
//! # Architecture
//!
//! ```text
//! CartStore ──► reduce() ──► in-memory Cart (authoritative)
//!                                 │
//!                                 └──► Slot<Cart>::save() ──► KeyValueStore
//!                                          (fire and forget)
//!
//! On startup: KeyValueStore ──► Slot::load() ──► rehydrated collection
//! ```
//!
//! Each store owns one named [`Slot`]. Values are JSON text with no version
//! field; anything that does not deserialize is discarded and the store starts
//! empty.

mod file;
mod memory;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error, warn};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Slot name holding the serialized cart.
pub const CART_SLOT: &str = "cart";
/// Slot name holding the serialized wishlist.
pub const WISHLIST_SLOT: &str = "wishlist";

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("I/O error on key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key cannot be used as a storage name.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// An in-memory backend's lock was poisoned by a panicking writer.
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// A string key/value store, the desktop stand-in for browser local storage.
///
/// Methods take `&self` so implementations can use interior mutability.
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    /// Retrieve a value by key. Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite a value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Succeeds even if the key did not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// One named slot in a [`KeyValueStore`] holding a serialized `T`.
pub struct Slot<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    _value: PhantomData<fn() -> T>,
}

impl<T> Slot<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Bind a slot name to a store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _value: PhantomData,
        }
    }

    /// Slot name.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the slot, falling back to `T::default()`.
    ///
    /// A missing value, an unreadable backend and a structurally incompatible
    /// value all yield the default. The latter two are logged, never raised.
    #[must_use]
    pub fn load(&self) -> T {
        let text = match self.store.get(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!(slot = %self.key, "No persisted value, starting empty");
                return T::default();
            }
            Err(e) => {
                warn!(slot = %self.key, error = %e, "Failed to read persisted value, starting empty");
                return T::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                warn!(slot = %self.key, error = %e, "Discarding malformed persisted value");
                T::default()
            }
        }
    }

    /// Serialize and write `value`, reporting failures to the caller.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or the backend write fails.
    pub fn try_save(&self, value: &T) -> Result<(), StorageError> {
        let text = serde_json::to_string(value)?;
        self.store.set(&self.key, &text)
    }

    /// Write `value`, logging and swallowing any failure.
    ///
    /// The in-memory value stays authoritative; a failed write only means the
    /// mirror lags until the next successful save.
    pub fn save(&self, value: &T) {
        if let Err(e) = self.try_save(value) {
            error!(slot = %self.key, error = %e, "Failed to persist value");
        }
    }
}

impl<T> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("key", &self.key)
            .field("store", &self.store)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    /// Backend whose reads and writes always fail.
    #[derive(Debug)]
    pub(crate) struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk unplugged"),
            })
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk unplugged"),
            })
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_load_missing_is_default() {
        let slot: Slot<Vec<u32>> = Slot::new(Arc::new(MemoryStore::new()), "numbers");
        assert!(slot.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = Arc::new(MemoryStore::new());
        let slot: Slot<Vec<u32>> = Slot::new(store.clone(), "numbers");
        slot.save(&vec![3, 1, 2]);

        assert_eq!(store.get("numbers").unwrap().as_deref(), Some("[3,1,2]"));
        assert_eq!(slot.load(), vec![3, 1, 2]);
    }

    #[test]
    fn test_load_malformed_is_default() {
        let store = Arc::new(MemoryStore::new());
        store.set("numbers", "{not json").unwrap();
        let slot: Slot<Vec<u32>> = Slot::new(store.clone(), "numbers");
        assert!(slot.load().is_empty());

        // structurally incompatible, not partially parsed
        store.set("numbers", "[1, \"two\", 3]").unwrap();
        assert!(slot.load().is_empty());
    }

    #[test]
    fn test_broken_backend_is_not_raised() {
        let slot: Slot<Vec<u32>> = Slot::new(Arc::new(BrokenStore), "numbers");
        assert!(slot.load().is_empty());
        slot.save(&vec![1]);
        assert!(matches!(
            slot.try_save(&vec![1]),
            Err(StorageError::Io { .. })
        ));
    }
}
