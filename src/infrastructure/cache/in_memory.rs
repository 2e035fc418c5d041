//! In-memory cache implementation using moka

use std::sync::Arc;

use moka::sync::Cache as MokaCache;

use crate::domain::cache::Cache;
use crate::domain::DomainError;
use crate::infrastructure::container::{Activate, ServiceProvider};

/// Process-wide in-memory cache backed by moka
///
/// The store is unbounded and entries never expire; they stay until [`Cache::clear`]
/// or until the cache is dropped. Clones share the same entries.
#[derive(Debug, Clone)]
pub struct InMemoryCache {
    cache: MokaCache<String, Arc<str>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            cache: MokaCache::builder().build(),
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Activate for InMemoryCache {
    fn activate(_provider: &ServiceProvider) -> Result<Self, DomainError> {
        Ok(Self::new())
    }
}

impl Cache for InMemoryCache {
    fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.cache.get(key).map(|data| data.to_string()))
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.cache.insert(key.to_string(), Arc::from(value));
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.cache.contains_key(key))
    }

    fn clear(&self) -> Result<(), DomainError> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
        Ok(())
    }

    fn size(&self) -> Result<usize, DomainError> {
        self.cache.run_pending_tasks();
        Ok(self.cache.entry_count() as usize)
    }
}
