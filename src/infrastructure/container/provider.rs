//! Service provider resolving registrations by lifetime

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;
use tracing::trace;

use crate::domain::DomainError;

use super::descriptor::{downcast, AnyService, ResolutionRule, ServiceDescriptor, ServiceKey, ServiceLifetime};

struct ProviderRoot {
    descriptors: Vec<ServiceDescriptor>,
    singletons: Vec<OnceCell<AnyService>>,
    root_scope: Arc<ScopeState>,
}

#[derive(Default)]
struct ScopeState {
    instances: Mutex<HashMap<usize, AnyService>>,
}

impl ScopeState {
    fn get(&self, index: usize) -> Result<Option<AnyService>, DomainError> {
        let instances = self
            .instances
            .lock()
            .map_err(|_| DomainError::internal("Service scope lock poisoned"))?;
        Ok(instances.get(&index).cloned())
    }

    /// Stores `service` unless another resolution got there first; returns the stored one
    fn get_or_insert(&self, index: usize, service: AnyService) -> Result<AnyService, DomainError> {
        let mut instances = self
            .instances
            .lock()
            .map_err(|_| DomainError::internal("Service scope lock poisoned"))?;
        Ok(instances.entry(index).or_insert(service).clone())
    }
}

thread_local! {
    /// Registrations currently being built on this thread, as (provider root, index)
    static RESOLVING: RefCell<Vec<(usize, usize)>> = const { RefCell::new(Vec::new()) };
}

/// Marks a registration as under construction until dropped
struct ResolutionGuard {
    frame: (usize, usize),
}

impl ResolutionGuard {
    fn enter(root: &Arc<ProviderRoot>, index: usize, key: &ServiceKey) -> Result<Self, DomainError> {
        let frame = (Arc::as_ptr(root) as usize, index);
        RESOLVING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.contains(&frame) {
                return Err(DomainError::configuration(format!(
                    "Circular dependency detected while resolving '{}'",
                    key
                )));
            }
            stack.push(frame);
            Ok(Self { frame })
        })
    }
}

impl Drop for ResolutionGuard {
    fn drop(&mut self) {
        RESOLVING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(position) = stack.iter().rposition(|frame| *frame == self.frame) {
                stack.remove(position);
            }
        });
    }
}

/// Resolves services from a frozen set of registrations
///
/// Cloning is cheap and shares both the singleton cache and the current scope.
/// Singletons are always built against the root scope so they never capture
/// scoped instances from a child scope. A registration that depends on itself,
/// directly or through others, fails with a configuration error.
#[derive(Clone)]
pub struct ServiceProvider {
    root: Arc<ProviderRoot>,
    scope: Arc<ScopeState>,
}

impl ServiceProvider {
    pub(crate) fn new(descriptors: Vec<ServiceDescriptor>) -> Self {
        let singletons = descriptors.iter().map(|_| OnceCell::new()).collect();
        let root_scope = Arc::new(ScopeState::default());

        Self {
            root: Arc::new(ProviderRoot {
                descriptors,
                singletons,
                root_scope: Arc::clone(&root_scope),
            }),
            scope: root_scope,
        }
    }

    /// Opens a child scope with its own scoped instances
    pub fn create_scope(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
            scope: Arc::new(ScopeState::default()),
        }
    }

    /// Returns the last registration of `S`, if any
    pub fn get<S: ?Sized + Send + Sync + 'static>(&self) -> Result<Option<Arc<S>>, DomainError> {
        self.resolve(&ServiceKey::of::<S>())?
            .map(|service| downcast::<S>(&service))
            .transpose()
    }

    pub fn get_required<S: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<S>, DomainError> {
        let service = self.resolve_required(&ServiceKey::of::<S>())?;
        downcast::<S>(&service)
    }

    /// Returns the last registration of `S` under `name`
    pub fn get_keyed<S: ?Sized + Send + Sync + 'static>(
        &self,
        name: &'static str,
    ) -> Result<Arc<S>, DomainError> {
        let service = self.resolve_required(&ServiceKey::named::<S>(name))?;
        downcast::<S>(&service)
    }

    /// Returns every unnamed registration of `S` in registration order
    pub fn get_all<S: ?Sized + Send + Sync + 'static>(&self) -> Result<Vec<Arc<S>>, DomainError> {
        let key = ServiceKey::of::<S>();
        self.root
            .descriptors
            .iter()
            .enumerate()
            .filter(|(_, descriptor)| *descriptor.key() == key)
            .map(|(index, _)| self.resolve_index(index).and_then(|service| downcast::<S>(&service)))
            .collect()
    }

    pub fn contains(&self, key: &ServiceKey) -> bool {
        self.root.descriptors.iter().any(|d| d.key() == key)
    }

    pub(crate) fn resolve(&self, key: &ServiceKey) -> Result<Option<AnyService>, DomainError> {
        match self.root.descriptors.iter().rposition(|d| d.key() == key) {
            Some(index) => self.resolve_index(index).map(Some),
            None => Ok(None),
        }
    }

    pub(crate) fn resolve_required(&self, key: &ServiceKey) -> Result<AnyService, DomainError> {
        self.resolve(key)?
            .ok_or_else(|| DomainError::not_found(format!("No service registered for '{}'", key)))
    }

    fn resolve_index(&self, index: usize) -> Result<AnyService, DomainError> {
        let descriptor = self.root.descriptors.get(index).ok_or_else(|| {
            DomainError::internal(format!("Registration index {} out of range", index))
        })?;
        let _guard = ResolutionGuard::enter(&self.root, index, descriptor.key())?;

        match descriptor.lifetime() {
            ServiceLifetime::Singleton => self.root.singletons[index]
                .get_or_try_init(|| self.root_provider().create_instance(descriptor.rule()))
                .cloned(),
            ServiceLifetime::Scoped => {
                if let Some(existing) = self.scope.get(index)? {
                    return Ok(existing);
                }
                // Built outside the lock so scoped factories may resolve other scoped services
                let created = self.create_instance(descriptor.rule())?;
                self.scope.get_or_insert(index, created)
            }
            ServiceLifetime::Transient => self.create_instance(descriptor.rule()),
        }
    }

    /// Applies a resolution rule without any lifetime caching
    pub(crate) fn create_instance(&self, rule: &ResolutionRule) -> Result<AnyService, DomainError> {
        trace!(rule = rule.kind(), "Creating service instance");
        match rule {
            ResolutionRule::Instance(instance) => Ok(Arc::clone(instance)),
            ResolutionRule::Factory(factory) => factory(self),
            ResolutionRule::Type(activator) => activator.activate(self),
        }
    }

    fn root_provider(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
            scope: Arc::clone(&self.root.root_scope),
        }
    }
}

impl fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("registrations", &self.root.descriptors.len())
            .finish()
    }
}
