//! Number domain - Sample payload services for the interception layer

pub mod math;
mod service;

pub use service::{NumberService, NUMBER_SERVICE};
