//! Cache infrastructure - Cache implementations

mod in_memory;

use std::sync::Arc;

use crate::domain::cache::Cache;
use crate::infrastructure::container::Implements;

pub use in_memory::InMemoryCache;

impl<T: Cache + 'static> Implements<dyn Cache> for T {
    fn upcast(self: Arc<Self>) -> Arc<dyn Cache> {
        self
    }
}
