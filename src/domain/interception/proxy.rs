//! Dispatch proxy routing every interface call through an intercept hook

use std::fmt;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use super::{CallOutput, InterceptHook, InterceptedCall};

/// Stand-in for a target object that routes each call through `hook`
///
/// The proxy implements an interface `T` through that interface's [`Interceptable`]
/// impl; every method there forwards via [`dispatch`](Self::dispatch) or
/// [`dispatch_async`](Self::dispatch_async), so the hook runs exactly once per call.
pub struct DispatchProxy<T: ?Sized, H> {
    target: Arc<T>,
    hook: H,
}

impl<T: ?Sized, H: InterceptHook> DispatchProxy<T, H> {
    pub fn new(target: Arc<T>, hook: H) -> Self {
        Self { target, hook }
    }

    /// Routes a call with an immediately available result through the hook
    pub fn dispatch<R, E>(
        &self,
        call: InterceptedCall,
        invoke: impl FnOnce(&T) -> Result<R, E>,
    ) -> Result<R, E>
    where
        R: CallOutput,
        E: Display,
    {
        let target = self.target.as_ref();
        self.hook.intercept(&call, || invoke(target))
    }

    /// Routes a call returning an in-flight result through the hook
    ///
    /// The target is invoked by the hook, so work the target does before handing
    /// back its future also runs inside the interception.
    pub fn dispatch_async<'a, R, E, Fut>(
        &'a self,
        call: InterceptedCall,
        invoke: impl FnOnce(&'a T) -> Fut,
    ) -> BoxFuture<'a, Result<R, E>>
    where
        R: CallOutput,
        E: Display + Send + 'a,
        Fut: Future<Output = Result<R, E>> + Send + 'a,
    {
        let target = self.target.as_ref();
        self.hook.intercept_async(call, move || invoke(target))
    }
}

impl<T: ?Sized, H> fmt::Debug for DispatchProxy<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchProxy")
            .field("target", &std::any::type_name::<T>())
            .field("hook", &std::any::type_name::<H>())
            .finish()
    }
}

/// Interfaces whose calls can be routed through a [`DispatchProxy`]
///
/// Implemented once per interface, next to the interface itself, by writing out an
/// impl of the interface for `DispatchProxy<dyn Interface, H>`.
pub trait Interceptable: Send + Sync + 'static {
    /// Wraps `target` so each call goes through `hook`
    fn intercept_with<H: InterceptHook>(target: Arc<Self>, hook: H) -> Arc<Self>;
}
