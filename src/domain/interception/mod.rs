//! Interception domain - Proxies that route interface calls through hooks

mod call;
mod hook;
mod proxy;

pub use call::InterceptedCall;
pub use hook::{decode_payload, encode_payload, CallOutput, InterceptHook};
pub use proxy::{DispatchProxy, Interceptable};

#[cfg(test)]
pub use hook::mock;
