//! Intercept hook contract

use std::fmt::Display;
use std::future::Future;

use futures::future::BoxFuture;
use serde::{de::DeserializeOwned, Serialize};

use super::InterceptedCall;
use crate::domain::DomainError;

/// Values an intercepted method may return
///
/// Any owned `Send` value can pass through a proxy. Memoizing hooks only store
/// results whose type is [`STORABLE`](Self::STORABLE); every other result always
/// comes from the target. [`storable_output!`](crate::storable_output) implements
/// the storable form with JSON payloads for serializable types.
pub trait CallOutput: Send + Sized + 'static {
    const STORABLE: bool = false;

    /// Encodes the value as an opaque payload
    fn to_payload(&self) -> Result<String, DomainError> {
        Err(not_storable::<Self>())
    }

    /// Restores a value from a payload produced by [`to_payload`](Self::to_payload)
    fn from_payload(_payload: &str) -> Result<Self, DomainError> {
        Err(not_storable::<Self>())
    }
}

fn not_storable<T>() -> DomainError {
    DomainError::cache(format!(
        "Values of type '{}' cannot be stored",
        std::any::type_name::<T>()
    ))
}

pub fn encode_payload<T: Serialize + ?Sized>(value: &T) -> Result<String, DomainError> {
    serde_json::to_string(value)
        .map_err(|e| DomainError::cache(format!("Failed to serialize cache value: {}", e)))
}

pub fn decode_payload<T: DeserializeOwned>(payload: &str) -> Result<T, DomainError> {
    serde_json::from_str(payload)
        .map_err(|e| DomainError::cache(format!("Failed to deserialize cache value: {}", e)))
}

/// Implements [`CallOutput`] with JSON payloads for serializable types
#[macro_export]
macro_rules! storable_output {
    ($($output:ty),+ $(,)?) => {$(
        impl $crate::domain::interception::CallOutput for $output {
            const STORABLE: bool = true;

            fn to_payload(&self) -> ::std::result::Result<String, $crate::domain::DomainError> {
                $crate::domain::interception::encode_payload(self)
            }

            fn from_payload(
                payload: &str,
            ) -> ::std::result::Result<Self, $crate::domain::DomainError> {
                $crate::domain::interception::decode_payload(payload)
            }
        }
    )+};
}

crate::storable_output!(
    (), bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
    String,
);

impl<T> CallOutput for Vec<T>
where
    T: Serialize + DeserializeOwned + Send + 'static,
{
    const STORABLE: bool = true;

    fn to_payload(&self) -> Result<String, DomainError> {
        encode_payload(self)
    }

    fn from_payload(payload: &str) -> Result<Self, DomainError> {
        decode_payload(payload)
    }
}

impl<T> CallOutput for Option<T>
where
    T: Serialize + DeserializeOwned + Send + 'static,
{
    const STORABLE: bool = true;

    fn to_payload(&self) -> Result<String, DomainError> {
        encode_payload(self)
    }

    fn from_payload(payload: &str) -> Result<Self, DomainError> {
        decode_payload(payload)
    }
}

/// Shared handles, such as other services, pass through but are never stored
impl<T: ?Sized + Send + Sync + 'static> CallOutput for std::sync::Arc<T> {}

impl<T: ?Sized + Send + 'static> CallOutput for Box<T> {}

/// Behavior wrapped around every call of a proxied interface
///
/// A hook receives the call identity and a way to proceed to the target. It decides
/// whether the target runs; whatever the target returns, errors included, must reach
/// the caller unchanged unless the hook replaces it with a stored result.
pub trait InterceptHook: Send + Sync + 'static {
    /// Intercepts a call whose result is available as soon as `proceed` returns
    fn intercept<R, E, F>(&self, call: &InterceptedCall, proceed: F) -> Result<R, E>
    where
        R: CallOutput,
        E: Display,
        F: FnOnce() -> Result<R, E>;

    /// Intercepts a call whose result is still in flight
    ///
    /// `proceed` invokes the target and yields its pending result. Implementations
    /// call it at most once and hand back a future without waiting on it.
    fn intercept_async<'a, R, E, F, Fut>(
        &'a self,
        call: InterceptedCall,
        proceed: F,
    ) -> BoxFuture<'a, Result<R, E>>
    where
        R: CallOutput,
        E: Display + Send + 'a,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, E>> + Send + 'a;
}
