//! Cache trait definition

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

use crate::domain::interception::{decode_payload, encode_payload};
use crate::domain::DomainError;

/// Process-wide key-value store shared by memoizing services
///
/// Values are stored as JSON strings to keep the trait dyn-compatible; use
/// [`CacheExt`] for typed access. There is no expiry or eviction parameter: entries
/// live until the store is cleared or dropped, and a write always replaces an
/// existing entry for the same key.
pub trait Cache: Send + Sync + Debug {
    /// Gets a raw JSON value from the cache
    fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Stores a raw JSON value, overwriting any previous entry
    fn set_raw(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Checks if a key exists in the cache
    fn exists(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.get_raw(key)?.is_some())
    }

    /// Clears all entries from the cache
    fn clear(&self) -> Result<(), DomainError>;

    /// Returns approximate number of entries in the cache
    fn size(&self) -> Result<usize, DomainError>;
}

/// Extension trait providing typed get/set operations
pub trait CacheExt: Cache {
    /// Gets a typed value from the cache
    fn get<V>(&self, key: &str) -> Result<Option<V>, DomainError>
    where
        V: DeserializeOwned,
    {
        self.get_raw(key)?
            .map(|data| decode_payload(&data))
            .transpose()
    }

    /// Sets a typed value in the cache
    fn set<V>(&self, key: &str, value: &V) -> Result<(), DomainError>
    where
        V: Serialize + ?Sized,
    {
        self.set_raw(key, &encode_payload(value)?)
    }
}

// Blanket implementation for all types implementing Cache
impl<T: Cache + ?Sized> CacheExt for T {}
