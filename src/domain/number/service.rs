//! Number service interface

use std::sync::Arc;

use crate::domain::interception::{DispatchProxy, InterceptHook, InterceptedCall, Interceptable};
use crate::domain::DomainError;

/// Name used for this interface in intercepted calls
pub const NUMBER_SERVICE: &str = "NumberService";

/// Computes terms of well-known integer sequences
pub trait NumberService: Send + Sync {
    /// Returns the n-th Fibonacci number (`0, 1, 1, 2, 3, 5, ...`)
    fn n_fibonacci(&self, n: u32) -> Result<u64, DomainError>;

    /// Returns the n-th prime, starting at `n_prime(1) == 2`
    fn n_prime(&self, n: u32) -> Result<u64, DomainError>;
}

impl<H: InterceptHook> NumberService for DispatchProxy<dyn NumberService, H> {
    fn n_fibonacci(&self, n: u32) -> Result<u64, DomainError> {
        let call = InterceptedCall::new(NUMBER_SERVICE, "n_fibonacci").with_arg(n);
        self.dispatch(call, |target| target.n_fibonacci(n))
    }

    fn n_prime(&self, n: u32) -> Result<u64, DomainError> {
        let call = InterceptedCall::new(NUMBER_SERVICE, "n_prime").with_arg(n);
        self.dispatch(call, |target| target.n_prime(n))
    }
}

impl Interceptable for dyn NumberService {
    fn intercept_with<H: InterceptHook>(target: Arc<Self>, hook: H) -> Arc<Self> {
        Arc::new(DispatchProxy::new(target, hook))
    }
}
