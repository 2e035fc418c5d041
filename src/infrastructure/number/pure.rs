use crate::domain::number::math::{add_terms, nth_prime};
use crate::domain::number::NumberService;
use crate::domain::DomainError;
use crate::infrastructure::container::{Activate, ServiceProvider};

/// Recomputes every term from scratch
///
/// Recursion goes through `self`, never through a decorating proxy, so wrapping
/// this service only observes the outermost call.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumberServicePure;

impl NumberServicePure {
    pub fn new() -> Self {
        Self
    }
}

impl Activate for NumberServicePure {
    fn activate(_provider: &ServiceProvider) -> Result<Self, DomainError> {
        Ok(Self::new())
    }
}

impl NumberService for NumberServicePure {
    fn n_fibonacci(&self, n: u32) -> Result<u64, DomainError> {
        match n {
            0 => Ok(0),
            1 => Ok(1),
            _ => add_terms(n, self.n_fibonacci(n - 1)?, self.n_fibonacci(n - 2)?),
        }
    }

    fn n_prime(&self, n: u32) -> Result<u64, DomainError> {
        Ok(nth_prime(n))
    }
}
