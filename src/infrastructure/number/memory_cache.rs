use std::sync::Arc;

use crate::domain::cache::{Cache, CacheExt};
use crate::domain::number::math::{add_terms, nth_prime};
use crate::domain::number::NumberService;
use crate::domain::DomainError;
use crate::infrastructure::container::{Activate, ServiceProvider};

fn fibonacci_key(n: u32) -> String {
    format!("Fibonacci-{}", n)
}

fn prime_key(n: u32) -> String {
    format!("Prime-{}", n)
}

/// Memoizes terms in the shared cache under `Fibonacci-<n>` and `Prime-<n>`
#[derive(Debug, Clone)]
pub struct NumberServiceMemoryCache {
    cache: Arc<dyn Cache>,
}

impl NumberServiceMemoryCache {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self { cache }
    }
}

impl Activate for NumberServiceMemoryCache {
    fn activate(provider: &ServiceProvider) -> Result<Self, DomainError> {
        Ok(Self::new(provider.get_required::<dyn Cache>()?))
    }
}

impl NumberService for NumberServiceMemoryCache {
    fn n_fibonacci(&self, n: u32) -> Result<u64, DomainError> {
        let key = fibonacci_key(n);
        if let Some(known) = self.cache.get::<u64>(&key)? {
            return Ok(known);
        }

        let value = match n {
            0 => 0,
            1 => 1,
            _ => add_terms(n, self.n_fibonacci(n - 1)?, self.n_fibonacci(n - 2)?)?,
        };
        self.cache.set(&key, &value)?;
        Ok(value)
    }

    fn n_prime(&self, n: u32) -> Result<u64, DomainError> {
        let key = prime_key(n);
        if let Some(known) = self.cache.get::<u64>(&key)? {
            return Ok(known);
        }

        let value = nth_prime(n);
        self.cache.set(&key, &value)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::MockCache;
    use crate::infrastructure::cache::InMemoryCache;

    #[test]
    fn test_terms_are_stored_under_named_keys() {
        let cache = Arc::new(InMemoryCache::new());
        let service = NumberServiceMemoryCache::new(cache.clone());

        assert_eq!(service.n_fibonacci(10).unwrap(), 55);
        assert_eq!(service.n_prime(4).unwrap(), 7);

        assert_eq!(cache.get::<u64>("Fibonacci-10").unwrap(), Some(55));
        assert_eq!(cache.get::<u64>("Fibonacci-0").unwrap(), Some(0));
        assert_eq!(cache.get::<u64>("Prime-4").unwrap(), Some(7));
        assert_eq!(cache.size().unwrap(), 12);
    }

    #[test]
    fn test_stored_terms_are_reused() {
        let cache = Arc::new(MockCache::new().with_raw_entry("Prime-3", "999"));
        let service = NumberServiceMemoryCache::new(cache);

        assert_eq!(service.n_prime(3).unwrap(), 999);
    }

    #[test]
    fn test_cache_errors_propagate() {
        let cache = Arc::new(MockCache::new().with_error("offline"));
        let service = NumberServiceMemoryCache::new(cache);

        let error = service.n_fibonacci(3).unwrap_err();
        assert!(matches!(error, DomainError::Cache { .. }));
    }

    #[test]
    fn test_activation_requires_cache() {
        use crate::infrastructure::container::ServiceCollection;

        let provider = ServiceCollection::new().build();
        let error = NumberServiceMemoryCache::activate(&provider).unwrap_err();
        assert!(matches!(error, DomainError::NotFound { .. }));
    }
}
