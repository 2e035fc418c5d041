//! Decorators - Timing and caching hooks plus registration helpers

mod caching;
mod timing;

pub use caching::CachingDecorator;
pub use timing::TimingDecorator;

use crate::domain::interception::Interceptable;
use crate::domain::DomainError;
use crate::infrastructure::container::{Activate, Implements, ServiceCollection};

/// Shorthands for decorating registrations with the built-in decorators
pub trait DecorationExt {
    fn decorate_with_timing<S: Interceptable + ?Sized>(&mut self) -> Result<&mut Self, DomainError>;

    fn decorate_with_cache<S: Interceptable + ?Sized>(&mut self) -> Result<&mut Self, DomainError>;

    fn decorate_keyed_with_timing<S: Interceptable + ?Sized>(
        &mut self,
        name: &'static str,
    ) -> Result<&mut Self, DomainError>;

    fn decorate_keyed_with_cache<S: Interceptable + ?Sized>(
        &mut self,
        name: &'static str,
    ) -> Result<&mut Self, DomainError>;

    /// Registers `I` as a named singleton `S` and wraps it with timing in one step
    fn add_keyed_singleton_with_timing<S, I>(
        &mut self,
        name: &'static str,
    ) -> Result<&mut Self, DomainError>
    where
        S: Interceptable + ?Sized,
        I: Activate + Implements<S>;

    /// Registers `I` as a named singleton `S` and wraps it with caching in one step
    fn add_keyed_singleton_with_cache<S, I>(
        &mut self,
        name: &'static str,
    ) -> Result<&mut Self, DomainError>
    where
        S: Interceptable + ?Sized,
        I: Activate + Implements<S>;
}

impl DecorationExt for ServiceCollection {
    fn decorate_with_timing<S: Interceptable + ?Sized>(&mut self) -> Result<&mut Self, DomainError> {
        self.decorate::<S, TimingDecorator>()
    }

    fn decorate_with_cache<S: Interceptable + ?Sized>(&mut self) -> Result<&mut Self, DomainError> {
        self.decorate::<S, CachingDecorator>()
    }

    fn decorate_keyed_with_timing<S: Interceptable + ?Sized>(
        &mut self,
        name: &'static str,
    ) -> Result<&mut Self, DomainError> {
        self.decorate_keyed::<S, TimingDecorator>(name)
    }

    fn decorate_keyed_with_cache<S: Interceptable + ?Sized>(
        &mut self,
        name: &'static str,
    ) -> Result<&mut Self, DomainError> {
        self.decorate_keyed::<S, CachingDecorator>(name)
    }

    fn add_keyed_singleton_with_timing<S, I>(
        &mut self,
        name: &'static str,
    ) -> Result<&mut Self, DomainError>
    where
        S: Interceptable + ?Sized,
        I: Activate + Implements<S>,
    {
        self.add_keyed_singleton::<S, I>(name)
            .decorate_keyed_with_timing::<S>(name)
    }

    fn add_keyed_singleton_with_cache<S, I>(
        &mut self,
        name: &'static str,
    ) -> Result<&mut Self, DomainError>
    where
        S: Interceptable + ?Sized,
        I: Activate + Implements<S>,
    {
        self.add_keyed_singleton::<S, I>(name)
            .decorate_keyed_with_cache::<S>(name)
    }
}
