//! Cache domain - Shared store abstraction and key strategies

mod key;
mod repository;

pub use key::{CacheKeyGenerator, FirstArgumentKeyGenerator, KEY_SEPARATOR};
pub use repository::{Cache, CacheExt};

#[cfg(test)]
pub use repository::mock::MockCache;
