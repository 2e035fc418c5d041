//! Number service implementations

mod memento;
mod memory_cache;
mod pure;

use std::sync::Arc;

use crate::domain::number::NumberService;
use crate::infrastructure::container::Implements;

pub use memento::NumberServiceMemento;
pub use memory_cache::NumberServiceMemoryCache;
pub use pure::NumberServicePure;

impl<T: NumberService + 'static> Implements<dyn NumberService> for T {
    fn upcast(self: Arc<Self>) -> Arc<dyn NumberService> {
        self
    }
}
