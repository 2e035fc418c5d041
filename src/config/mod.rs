//! Application configuration

mod app_config;

pub use app_config::{AppConfig, LoadTestConfig, LogFormat, LoggingConfig, ServerConfig};
