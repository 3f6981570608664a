//! Configuration module

pub mod config;
pub mod loader;

pub use config::AppConfig;
pub use loader::ConfigLoader;
