//! Infrastructure layer - Container, decorators and concrete services

pub mod cache;
pub mod container;
pub mod decorators;
pub mod logging;
pub mod number;
