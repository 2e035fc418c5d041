//! Service container - Registrations, resolution and decoration

mod collection;
mod descriptor;
mod factory;
mod provider;
mod registrar;

pub use collection::ServiceCollection;
pub use descriptor::{
    Activate, Activator, AnyService, Implements, ResolutionRule, ServiceDescriptor, ServiceFactory,
    ServiceKey, ServiceLifetime,
};
pub use factory::{DecoratorFactory, FactoryFn, Parameter};
pub use provider::ServiceProvider;
pub use registrar::{Decorator, DecoratorBinding};
