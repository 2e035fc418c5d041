//! Method interception for container-registered services
//!
//! Wraps interface implementations in a dispatch proxy so cross-cutting behavior runs
//! around every call without touching the implementations:
//! - Timing decorator logging start, completion and elapsed time
//! - Caching decorator memoizing results in a shared store
//! - Service container with in-place decoration of existing registrations

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::{AppState, NumberRoute};
use domain::cache::Cache;
use domain::logging::LogSink;
use domain::number::NumberService;
use domain::DomainError;
use infrastructure::cache::InMemoryCache;
use infrastructure::container::ServiceCollection;
use infrastructure::decorators::DecorationExt;
use infrastructure::logging::TracingLogSink;
use infrastructure::number::{NumberServiceMemento, NumberServiceMemoryCache, NumberServicePure};

/// Registers the shared cache, the log sink and one number service per route
pub fn create_service_collection() -> Result<ServiceCollection, DomainError> {
    let mut services = ServiceCollection::new();

    services
        .add_singleton::<dyn Cache, InMemoryCache>()
        .add_instance::<dyn LogSink>(Arc::new(TracingLogSink));

    services
        .add_keyed_singleton::<dyn NumberService, NumberServicePure>(NumberRoute::Pure.name())
        .add_keyed_singleton::<dyn NumberService, NumberServiceMemento>(
            NumberRoute::Memento.name(),
        )
        .add_keyed_singleton::<dyn NumberService, NumberServiceMemoryCache>(
            NumberRoute::Memory.name(),
        );

    services
        .add_keyed_singleton_with_timing::<dyn NumberService, NumberServicePure>(
            NumberRoute::PureStopwatch.name(),
        )?
        .add_keyed_singleton_with_cache::<dyn NumberService, NumberServicePure>(
            NumberRoute::PureCache.name(),
        )?
        .add_keyed_singleton_with_timing::<dyn NumberService, NumberServiceMemoryCache>(
            NumberRoute::MemoryDecorated.name(),
        )?;

    // Registered plainly first, then decorated as a separate step
    services
        .add_keyed_singleton::<dyn NumberService, NumberServiceMemento>(
            NumberRoute::MementoDecorated.name(),
        )
        .decorate_keyed_with_timing::<dyn NumberService>(NumberRoute::MementoDecorated.name())?;

    Ok(services)
}

/// Builds the service provider and wraps it in the shared API state
pub fn create_app_state() -> anyhow::Result<AppState> {
    let services = create_service_collection()?.build();
    Ok(AppState::new(services))
}
