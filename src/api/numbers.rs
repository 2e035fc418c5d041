//! Number endpoints, one per registered service variant

use tracing::debug;

use crate::domain::number::NumberService;
use crate::domain::DomainError;

use super::state::AppState;
use super::types::ApiError;

/// Number routes; each resolves the service registered under its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberRoute {
    Pure,
    Memento,
    Memory,
    PureStopwatch,
    PureCache,
    MementoDecorated,
    MemoryDecorated,
}

impl NumberRoute {
    pub const ALL: [NumberRoute; 7] = [
        Self::Pure,
        Self::Memento,
        Self::Memory,
        Self::PureStopwatch,
        Self::PureCache,
        Self::MementoDecorated,
        Self::MemoryDecorated,
    ];

    /// Route segment, also the registration name of its service
    pub fn name(self) -> &'static str {
        match self {
            Self::Pure => "pure",
            Self::Memento => "memento",
            Self::Memory => "memory",
            Self::PureStopwatch => "pure-sw-decorated",
            Self::PureCache => "pure-cache-decorated",
            Self::MementoDecorated => "memento-decorated",
            Self::MemoryDecorated => "memory-decorated",
        }
    }

    pub fn path(self) -> String {
        format!("/{}", self.name())
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

pub fn summary(n: u32, fibonacci: u64, prime: u64) -> String {
    format!(
        "Calculating {}-nth: Fibonacci: {} // Prime: {}",
        n, fibonacci, prime
    )
}

/// Computes the next term pair for `route` on the blocking pool
pub async fn calculate(state: AppState, route: NumberRoute) -> Result<String, ApiError> {
    let n = state.next_term(route);
    let service = state.services.get_keyed::<dyn NumberService>(route.name())?;

    debug!(route = route.name(), n, "Calculating terms");

    let result = tokio::task::spawn_blocking(move || -> Result<String, DomainError> {
        let fibonacci = service.n_fibonacci(n)?;
        let prime = service.n_prime(n)?;
        Ok(summary(n, fibonacci, prime))
    })
    .await
    .map_err(|e| ApiError::internal(format!("Calculation task failed: {}", e)))?;

    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_route_names_are_unique_paths() {
        let names: HashSet<&str> = NumberRoute::ALL.iter().map(|r| r.name()).collect();
        assert_eq!(names.len(), NumberRoute::ALL.len());

        assert_eq!(NumberRoute::PureStopwatch.path(), "/pure-sw-decorated");
        assert_eq!(NumberRoute::MemoryDecorated.path(), "/memory-decorated");
    }

    #[test]
    fn test_index_matches_position() {
        for (position, route) in NumberRoute::ALL.iter().enumerate() {
            assert_eq!(route.index(), position);
        }
    }

    #[test]
    fn test_summary_format() {
        assert_eq!(
            summary(3, 2, 5),
            "Calculating 3-nth: Fibonacci: 2 // Prime: 5"
        );
    }
}
