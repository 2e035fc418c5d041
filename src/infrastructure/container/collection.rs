//! Mutable list of service registrations

use std::sync::Arc;

use tracing::debug;

use crate::domain::DomainError;

use super::descriptor::{
    Activate, Implements, ResolutionRule, ServiceDescriptor, ServiceKey, ServiceLifetime,
};
use super::ServiceProvider;

/// Ordered service registrations, frozen into a [`ServiceProvider`] by [`build`](Self::build)
///
/// Several registrations may share a key; the provider hands out the last one and
/// `get_all` returns every one in registration order.
#[derive(Debug, Default, Clone)]
pub struct ServiceCollection {
    descriptors: Vec<ServiceDescriptor>,
}

impl ServiceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn descriptors(&self) -> &[ServiceDescriptor] {
        &self.descriptors
    }

    pub fn contains(&self, key: &ServiceKey) -> bool {
        self.descriptors.iter().any(|d| d.key() == key)
    }

    pub fn register(
        &mut self,
        key: ServiceKey,
        rule: ResolutionRule,
        lifetime: ServiceLifetime,
    ) -> &mut Self {
        debug!(service = %key, rule = rule.kind(), %lifetime, "Registering service");
        self.descriptors
            .push(ServiceDescriptor::new(key, rule, lifetime));
        self
    }

    pub fn add<S, I>(&mut self, lifetime: ServiceLifetime) -> &mut Self
    where
        S: ?Sized + Send + Sync + 'static,
        I: Activate + Implements<S>,
    {
        self.register(ServiceKey::of::<S>(), ResolutionRule::activate::<S, I>(), lifetime)
    }

    pub fn add_keyed<S, I>(&mut self, name: &'static str, lifetime: ServiceLifetime) -> &mut Self
    where
        S: ?Sized + Send + Sync + 'static,
        I: Activate + Implements<S>,
    {
        self.register(
            ServiceKey::named::<S>(name),
            ResolutionRule::activate::<S, I>(),
            lifetime,
        )
    }

    pub fn add_singleton<S, I>(&mut self) -> &mut Self
    where
        S: ?Sized + Send + Sync + 'static,
        I: Activate + Implements<S>,
    {
        self.add::<S, I>(ServiceLifetime::Singleton)
    }

    pub fn add_scoped<S, I>(&mut self) -> &mut Self
    where
        S: ?Sized + Send + Sync + 'static,
        I: Activate + Implements<S>,
    {
        self.add::<S, I>(ServiceLifetime::Scoped)
    }

    pub fn add_transient<S, I>(&mut self) -> &mut Self
    where
        S: ?Sized + Send + Sync + 'static,
        I: Activate + Implements<S>,
    {
        self.add::<S, I>(ServiceLifetime::Transient)
    }

    pub fn add_keyed_singleton<S, I>(&mut self, name: &'static str) -> &mut Self
    where
        S: ?Sized + Send + Sync + 'static,
        I: Activate + Implements<S>,
    {
        self.add_keyed::<S, I>(name, ServiceLifetime::Singleton)
    }

    /// Registers an existing instance; instances are always singletons
    pub fn add_instance<S: ?Sized + Send + Sync + 'static>(&mut self, instance: Arc<S>) -> &mut Self {
        self.register(
            ServiceKey::of::<S>(),
            ResolutionRule::instance(instance),
            ServiceLifetime::Singleton,
        )
    }

    pub fn add_keyed_instance<S: ?Sized + Send + Sync + 'static>(
        &mut self,
        name: &'static str,
        instance: Arc<S>,
    ) -> &mut Self {
        self.register(
            ServiceKey::named::<S>(name),
            ResolutionRule::instance(instance),
            ServiceLifetime::Singleton,
        )
    }

    pub fn add_factory<S, F>(&mut self, lifetime: ServiceLifetime, factory: F) -> &mut Self
    where
        S: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<Arc<S>, DomainError> + Send + Sync + 'static,
    {
        self.register(ServiceKey::of::<S>(), ResolutionRule::factory(factory), lifetime)
    }

    pub(crate) fn positions(&self, key: &ServiceKey) -> Vec<usize> {
        self.descriptors
            .iter()
            .enumerate()
            .filter(|(_, d)| d.key() == key)
            .map(|(index, _)| index)
            .collect()
    }

    pub(crate) fn replace(&mut self, index: usize, descriptor: ServiceDescriptor) {
        if let Some(slot) = self.descriptors.get_mut(index) {
            *slot = descriptor;
        }
    }

    pub fn build(self) -> ServiceProvider {
        debug!(registrations = self.descriptors.len(), "Building service provider");
        ServiceProvider::new(self.descriptors)
    }
}
