//! Cache key generation strategies

use std::fmt::Debug;

use crate::domain::interception::InterceptedCall;

/// Separator between the method name and the argument text
pub const KEY_SEPARATOR: &str = "--";

/// Trait for generating cache keys from intercepted calls
pub trait CacheKeyGenerator: Send + Sync + Debug {
    /// Generates a cache key for the given call
    fn generate(&self, call: &InterceptedCall) -> String;
}

/// Keys a call by method name and the text of its first argument: `<method>--<arg>`
///
/// Only the first argument participates. Calls that differ only in later arguments
/// share a key, and zero-argument methods all map to `<method>--`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstArgumentKeyGenerator;

impl FirstArgumentKeyGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CacheKeyGenerator for FirstArgumentKeyGenerator {
    fn generate(&self, call: &InterceptedCall) -> String {
        format!(
            "{}{}{}",
            call.method(),
            KEY_SEPARATOR,
            call.first_argument().unwrap_or_default()
        )
    }
}
