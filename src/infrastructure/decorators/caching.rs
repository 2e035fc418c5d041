//! Memoizing decorator backed by the shared cache

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture};
use futures::FutureExt;
use tracing::{debug, warn};

use crate::domain::cache::{Cache, CacheKeyGenerator, FirstArgumentKeyGenerator};
use crate::domain::interception::{CallOutput, InterceptHook, InterceptedCall, Interceptable};
use crate::domain::DomainError;
use crate::infrastructure::container::{Decorator, DecoratorFactory};

/// Serves repeated calls from the cache, keyed `<method>--<first argument>`
///
/// A miss runs the target and stores its result; target errors are returned as-is
/// and never stored. Results whose type is not storable always come from the target.
/// A failing cache is logged and treated as a miss. Two callers missing the same key
/// at once may both run the target; the later write wins.
#[derive(Debug, Clone)]
pub struct CachingDecorator {
    cache: Arc<dyn Cache>,
    keys: FirstArgumentKeyGenerator,
}

impl CachingDecorator {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self {
            cache,
            keys: FirstArgumentKeyGenerator::new(),
        }
    }

    /// Wraps `decorated` in a caching proxy
    pub fn create<S: Interceptable + ?Sized>(
        decorated: Arc<S>,
        cache: Arc<dyn Cache>,
    ) -> Result<Arc<S>, DomainError> {
        Ok(S::intercept_with(decorated, Self::new(cache)))
    }

    fn lookup<R: CallOutput>(&self, key: &str) -> Option<R> {
        let stored = self
            .cache
            .get_raw(key)
            .and_then(|raw| raw.map(|payload| R::from_payload(&payload)).transpose());

        match stored {
            Ok(Some(value)) => {
                debug!(key, "Cache hit");
                Some(value)
            }
            Ok(None) => {
                debug!(key, "Cache miss");
                None
            }
            Err(e) => {
                warn!(key, error = %e, "Cache read failed, invoking target");
                None
            }
        }
    }

    fn store<R: CallOutput>(&self, key: &str, value: &R) {
        let stored = value
            .to_payload()
            .and_then(|payload| self.cache.set_raw(key, &payload));
        if let Err(e) = stored {
            warn!(key, error = %e, "Cache write failed, result not stored");
        }
    }
}

impl InterceptHook for CachingDecorator {
    fn intercept<R, E, F>(&self, call: &InterceptedCall, proceed: F) -> Result<R, E>
    where
        R: CallOutput,
        E: Display,
        F: FnOnce() -> Result<R, E>,
    {
        if !R::STORABLE {
            return proceed();
        }

        let key = self.keys.generate(call);
        if let Some(cached) = self.lookup(&key) {
            return Ok(cached);
        }

        let result = proceed()?;
        self.store(&key, &result);
        Ok(result)
    }

    fn intercept_async<'a, R, E, F, Fut>(
        &'a self,
        call: InterceptedCall,
        proceed: F,
    ) -> BoxFuture<'a, Result<R, E>>
    where
        R: CallOutput,
        E: Display + Send + 'a,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, E>> + Send + 'a,
    {
        if !R::STORABLE {
            return proceed().boxed();
        }

        let key = self.keys.generate(&call);
        if let Some(cached) = self.lookup(&key) {
            return future::ready(Ok(cached)).boxed();
        }

        let pending = proceed();
        Box::pin(async move {
            let result = pending.await?;
            self.store(&key, &result);
            Ok(result)
        })
    }
}

impl<S: Interceptable + ?Sized> Decorator<S> for CachingDecorator {
    fn factories() -> Vec<DecoratorFactory> {
        vec![DecoratorFactory::new::<S, (Arc<S>, Arc<dyn Cache>), _>(
            Self::create::<S>,
        )]
    }
}
