//! Service registrations: keys, lifetimes and resolution rules

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::domain::DomainError;

use super::ServiceProvider;

/// Type-erased service instance; always holds an `Arc<S>` for the registered `S`
pub type AnyService = Arc<dyn Any + Send + Sync>;

/// Factory producing a type-erased service from the provider
pub type ServiceFactory =
    Arc<dyn Fn(&ServiceProvider) -> Result<AnyService, DomainError> + Send + Sync>;

pub(crate) fn erase<S: ?Sized + Send + Sync + 'static>(service: Arc<S>) -> AnyService {
    Arc::new(service)
}

pub(crate) fn downcast<S: ?Sized + Send + Sync + 'static>(
    service: &AnyService,
) -> Result<Arc<S>, DomainError> {
    service.downcast_ref::<Arc<S>>().cloned().ok_or_else(|| {
        DomainError::configuration(format!(
            "Resolved value is not an instance of '{}'",
            type_name::<S>()
        ))
    })
}

/// Identifies a registration: the service type plus an optional registration name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceKey {
    type_id: TypeId,
    type_name: &'static str,
    name: Option<&'static str>,
}

impl ServiceKey {
    pub fn of<S: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<S>(),
            type_name: type_name::<S>(),
            name: None,
        }
    }

    pub fn named<S: ?Sized + 'static>(name: &'static str) -> Self {
        Self {
            name: Some(name),
            ..Self::of::<S>()
        }
    }

    pub(crate) fn from_parts(
        type_id: TypeId,
        type_name: &'static str,
        name: Option<&'static str>,
    ) -> Self {
        Self {
            type_id,
            type_name,
            name,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn name(&self) -> Option<&'static str> {
        self.name
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "{} ('{}')", self.type_name, name),
            None => write!(f, "{}", self.type_name),
        }
    }
}

/// How long a resolved instance is reused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceLifetime {
    /// One instance per provider
    Singleton,
    /// One instance per scope
    Scoped,
    /// A new instance on every resolution
    Transient,
}

impl fmt::Display for ServiceLifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singleton => write!(f, "singleton"),
            Self::Scoped => write!(f, "scoped"),
            Self::Transient => write!(f, "transient"),
        }
    }
}

/// Implementation types the container can construct on demand
pub trait Activate: Sized + Send + Sync + 'static {
    fn activate(provider: &ServiceProvider) -> Result<Self, DomainError>;
}

/// Conversion from an implementation to the service interface `S` it is registered as
pub trait Implements<S: ?Sized> {
    fn upcast(self: Arc<Self>) -> Arc<S>;
}

/// Activates implementation `I` and exposes it as service `S`
#[derive(Clone, Copy)]
pub struct Activator {
    implementation: &'static str,
    activate: fn(&ServiceProvider) -> Result<AnyService, DomainError>,
}

impl Activator {
    pub fn of<S, I>() -> Self
    where
        S: ?Sized + Send + Sync + 'static,
        I: Activate + Implements<S>,
    {
        Self {
            implementation: type_name::<I>(),
            activate: activate_as::<S, I>,
        }
    }

    pub fn implementation(&self) -> &'static str {
        self.implementation
    }

    pub fn activate(&self, provider: &ServiceProvider) -> Result<AnyService, DomainError> {
        (self.activate)(provider)
    }
}

fn activate_as<S, I>(provider: &ServiceProvider) -> Result<AnyService, DomainError>
where
    S: ?Sized + Send + Sync + 'static,
    I: Activate + Implements<S>,
{
    let instance = Arc::new(I::activate(provider)?);
    Ok(erase::<S>(Implements::<S>::upcast(instance)))
}

/// How the container satisfies a request for a service
#[derive(Clone)]
pub enum ResolutionRule {
    /// Reuse an existing instance
    Instance(AnyService),
    /// Call a factory
    Factory(ServiceFactory),
    /// Activate an implementation type
    Type(Activator),
}

impl ResolutionRule {
    pub fn instance<S: ?Sized + Send + Sync + 'static>(instance: Arc<S>) -> Self {
        Self::Instance(erase(instance))
    }

    pub fn factory<S, F>(factory: F) -> Self
    where
        S: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<Arc<S>, DomainError> + Send + Sync + 'static,
    {
        Self::Factory(Arc::new(move |provider| factory(provider).map(erase::<S>)))
    }

    pub fn activate<S, I>() -> Self
    where
        S: ?Sized + Send + Sync + 'static,
        I: Activate + Implements<S>,
    {
        Self::Type(Activator::of::<S, I>())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Instance(_) => "instance",
            Self::Factory(_) => "factory",
            Self::Type(_) => "type",
        }
    }
}

impl fmt::Debug for ResolutionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(_) => f.write_str("Instance"),
            Self::Factory(_) => f.write_str("Factory"),
            Self::Type(activator) => f
                .debug_tuple("Type")
                .field(&activator.implementation())
                .finish(),
        }
    }
}

/// A single registration in a [`ServiceCollection`](super::ServiceCollection)
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    key: ServiceKey,
    rule: ResolutionRule,
    lifetime: ServiceLifetime,
}

impl ServiceDescriptor {
    pub fn new(key: ServiceKey, rule: ResolutionRule, lifetime: ServiceLifetime) -> Self {
        Self {
            key,
            rule,
            lifetime,
        }
    }

    pub fn key(&self) -> &ServiceKey {
        &self.key
    }

    pub fn rule(&self) -> &ResolutionRule {
        &self.rule
    }

    pub fn lifetime(&self) -> ServiceLifetime {
        self.lifetime
    }
}
