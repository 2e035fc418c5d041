//! Domain layer - Interception contracts, shared stores and sample services

pub mod cache;
pub mod error;
pub mod interception;
pub mod logging;
pub mod number;

pub use cache::{Cache, CacheExt, CacheKeyGenerator, FirstArgumentKeyGenerator};
pub use error::DomainError;
pub use interception::{CallOutput, DispatchProxy, InterceptHook, InterceptedCall, Interceptable};
pub use logging::{LogEntry, LogLevel, LogSink};
pub use number::NumberService;
