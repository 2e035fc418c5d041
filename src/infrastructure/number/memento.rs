use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::number::math::{add_terms, nth_prime};
use crate::domain::number::NumberService;
use crate::domain::DomainError;
use crate::infrastructure::container::{Activate, ServiceProvider};

type History = RwLock<HashMap<u32, u64>>;

fn recall(history: &History, n: u32) -> Result<Option<u64>, DomainError> {
    let entries = history
        .read()
        .map_err(|_| DomainError::internal("Number history lock poisoned"))?;
    Ok(entries.get(&n).copied())
}

fn remember(history: &History, n: u32, value: u64) -> Result<u64, DomainError> {
    let mut entries = history
        .write()
        .map_err(|_| DomainError::internal("Number history lock poisoned"))?;
    entries.insert(n, value);
    Ok(value)
}

/// Remembers every term it has computed, per instance
#[derive(Debug, Default)]
pub struct NumberServiceMemento {
    fibonacci_history: History,
    prime_history: History,
}

impl NumberServiceMemento {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Activate for NumberServiceMemento {
    fn activate(_provider: &ServiceProvider) -> Result<Self, DomainError> {
        Ok(Self::new())
    }
}

impl NumberService for NumberServiceMemento {
    fn n_fibonacci(&self, n: u32) -> Result<u64, DomainError> {
        if let Some(known) = recall(&self.fibonacci_history, n)? {
            return Ok(known);
        }

        // Locks are released before recursing
        let value = match n {
            0 => 0,
            1 => 1,
            _ => add_terms(n, self.n_fibonacci(n - 1)?, self.n_fibonacci(n - 2)?)?,
        };
        remember(&self.fibonacci_history, n, value)
    }

    fn n_prime(&self, n: u32) -> Result<u64, DomainError> {
        if let Some(known) = recall(&self.prime_history, n)? {
            return Ok(known);
        }
        remember(&self.prime_history, n, nth_prime(n))
    }
}
