//! Decoration of existing registrations

use std::any::type_name;
use std::sync::Arc;

use tracing::info;

use crate::domain::DomainError;

use super::descriptor::{ResolutionRule, ServiceDescriptor, ServiceKey};
use super::factory::{DecoratorFactory, Parameter};
use super::{ServiceCollection, ServiceProvider};

/// Types that can wrap registrations of service `S`
///
/// A decorator lists its factories; exactly one of them must return `S`. That
/// factory receives the original `S` through its parameter of type `S`, and every
/// other parameter is resolved from the container by type.
pub trait Decorator<S: ?Sized>: 'static {
    fn factories() -> Vec<DecoratorFactory>;
}

/// The factory chosen to decorate service `S`
#[derive(Debug, Clone)]
pub struct DecoratorBinding {
    service: Parameter,
    decorator: &'static str,
    factory: DecoratorFactory,
}

impl DecoratorBinding {
    /// Picks the single factory of `D` producing `S`
    pub fn discover<S, D>() -> Result<Self, DomainError>
    where
        S: ?Sized + Send + Sync + 'static,
        D: Decorator<S>,
    {
        let service = Parameter::of::<S>();
        let decorator = type_name::<D>();

        let mut candidates: Vec<DecoratorFactory> = D::factories()
            .into_iter()
            .filter(|factory| factory.returns() == service)
            .collect();

        match candidates.len() {
            1 => Ok(Self {
                service,
                decorator,
                factory: candidates.remove(0),
            }),
            0 => Err(DomainError::configuration(format!(
                "No factory in '{}' creates an instance of '{}'",
                decorator,
                service.type_name()
            ))),
            count => Err(DomainError::configuration(format!(
                "Found {} factories in '{}' creating '{}', expected exactly one",
                count,
                decorator,
                service.type_name()
            ))),
        }
    }

    pub fn decorator(&self) -> &'static str {
        self.decorator
    }

    /// Wraps `original` so resolving it yields the decorated service
    fn decorate_rule(&self, original: ResolutionRule) -> ResolutionRule {
        let service = self.service;
        let factory = self.factory.clone();

        ResolutionRule::Factory(Arc::new(move |provider: &ServiceProvider| {
            let arguments = factory
                .parameters()
                .iter()
                .map(|parameter| {
                    if *parameter == service {
                        provider.create_instance(&original)
                    } else {
                        provider.resolve_required(&parameter.key())
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;

            factory.call(arguments)
        }))
    }
}

impl ServiceCollection {
    /// Replaces every unnamed registration of `S` with one decorated by `D`
    ///
    /// Each replacement keeps the position and lifetime of the registration it
    /// wraps. On error the collection is left untouched.
    pub fn decorate<S, D>(&mut self) -> Result<&mut Self, DomainError>
    where
        S: ?Sized + Send + Sync + 'static,
        D: Decorator<S>,
    {
        self.decorate_key::<S, D>(ServiceKey::of::<S>())
    }

    /// Like [`decorate`](Self::decorate) for registrations of `S` under `name`
    pub fn decorate_keyed<S, D>(&mut self, name: &'static str) -> Result<&mut Self, DomainError>
    where
        S: ?Sized + Send + Sync + 'static,
        D: Decorator<S>,
    {
        self.decorate_key::<S, D>(ServiceKey::named::<S>(name))
    }

    fn decorate_key<S, D>(&mut self, key: ServiceKey) -> Result<&mut Self, DomainError>
    where
        S: ?Sized + Send + Sync + 'static,
        D: Decorator<S>,
    {
        let binding = DecoratorBinding::discover::<S, D>()?;

        let positions = self.positions(&key);
        if positions.is_empty() {
            return Err(DomainError::configuration(format!(
                "Attempted to decorate services of type '{}', but no such services are registered",
                key
            )));
        }

        for &index in &positions {
            let original = &self.descriptors()[index];
            let decorated = ServiceDescriptor::new(
                key,
                binding.decorate_rule(original.rule().clone()),
                original.lifetime(),
            );
            self.replace(index, decorated);
        }

        info!(
            service = %key,
            decorator = binding.decorator(),
            registrations = positions.len(),
            "Decorated service registrations"
        );
        Ok(self)
    }
}
