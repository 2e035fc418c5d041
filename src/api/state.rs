//! Application state shared across handlers

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::infrastructure::container::ServiceProvider;

use super::numbers::NumberRoute;

/// Shared state: the built service provider and one request counter per number route
#[derive(Debug, Clone)]
pub struct AppState {
    pub services: ServiceProvider,
    counters: Arc<[AtomicU32; NumberRoute::ALL.len()]>,
}

impl AppState {
    pub fn new(services: ServiceProvider) -> Self {
        Self {
            services,
            counters: Arc::new(Default::default()),
        }
    }

    /// Bumps the route's counter and returns the new value, starting at 1
    pub fn next_term(&self, route: NumberRoute) -> u32 {
        self.counters[route.index()].fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::container::ServiceCollection;

    #[test]
    fn test_counters_are_per_route_and_shared_by_clones() {
        let state = AppState::new(ServiceCollection::new().build());
        let clone = state.clone();

        assert_eq!(state.next_term(NumberRoute::Pure), 1);
        assert_eq!(clone.next_term(NumberRoute::Pure), 2);
        assert_eq!(state.next_term(NumberRoute::Memento), 1);
    }
}
