//! Decorator factory functions with container-resolved parameters

use std::any::{type_name, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::domain::DomainError;

use super::descriptor::{downcast, erase, AnyService, ServiceKey};

/// Type of a factory parameter or return value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    type_id: TypeId,
    type_name: &'static str,
}

impl Parameter {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Unnamed registration key a parameter of this type resolves from
    pub fn key(&self) -> ServiceKey {
        ServiceKey::from_parts(self.type_id, self.type_name, None)
    }
}

/// Functions taking container services as `Arc` parameters and producing an `Arc<S>`
///
/// Implemented for plain functions and closures of one to four parameters.
pub trait FactoryFn<S: ?Sized, Args>: Send + Sync + 'static {
    fn parameters(&self) -> Vec<Parameter>;

    fn invoke(&self, arguments: Vec<AnyService>) -> Result<Arc<S>, DomainError>;
}

macro_rules! impl_factory_fn {
    ($($ty:ident),+) => {
        #[allow(non_snake_case)]
        impl<F, S, $($ty,)+> FactoryFn<S, ($(Arc<$ty>,)+)> for F
        where
            F: Fn($(Arc<$ty>),+) -> Result<Arc<S>, DomainError> + Send + Sync + 'static,
            S: ?Sized + Send + Sync + 'static,
            $($ty: ?Sized + Send + Sync + 'static,)+
        {
            fn parameters(&self) -> Vec<Parameter> {
                vec![$(Parameter::of::<$ty>()),+]
            }

            fn invoke(&self, arguments: Vec<AnyService>) -> Result<Arc<S>, DomainError> {
                let mut arguments = arguments.into_iter();
                $(
                    let $ty = match arguments.next() {
                        Some(argument) => downcast::<$ty>(&argument)?,
                        None => {
                            return Err(DomainError::configuration(format!(
                                "Missing factory argument of type '{}'",
                                type_name::<$ty>()
                            )))
                        }
                    };
                )+
                (self)($($ty),+)
            }
        }
    };
}

impl_factory_fn!(T1);
impl_factory_fn!(T1, T2);
impl_factory_fn!(T1, T2, T3);
impl_factory_fn!(T1, T2, T3, T4);

type ErasedFactory = Arc<dyn Fn(Vec<AnyService>) -> Result<AnyService, DomainError> + Send + Sync>;

/// A type-erased factory a decorator exposes for discovery
#[derive(Clone)]
pub struct DecoratorFactory {
    returns: Parameter,
    parameters: Vec<Parameter>,
    invoke: ErasedFactory,
}

impl DecoratorFactory {
    pub fn new<S, Args, F>(factory: F) -> Self
    where
        S: ?Sized + Send + Sync + 'static,
        Args: 'static,
        F: FactoryFn<S, Args>,
    {
        let parameters = factory.parameters();
        Self {
            returns: Parameter::of::<S>(),
            parameters,
            invoke: Arc::new(move |arguments| factory.invoke(arguments).map(erase::<S>)),
        }
    }

    pub fn returns(&self) -> Parameter {
        self.returns
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Calls the factory with arguments ordered like [`parameters`](Self::parameters)
    pub fn call(&self, arguments: Vec<AnyService>) -> Result<AnyService, DomainError> {
        (self.invoke)(arguments)
    }
}

impl fmt::Debug for DecoratorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoratorFactory")
            .field("returns", &self.returns.type_name())
            .field(
                "parameters",
                &self.parameters.iter().map(|p| p.type_name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
