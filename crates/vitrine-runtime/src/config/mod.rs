//! Configuration module for the Vitrine runtime.
//!
//! Configuration is layered with figment (defaults, files, `VITRINE_*`
//! environment variables, programmatic overrides) and validated before use.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile};
pub use schema::{
    CacheConfig, LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig, NavigationConfig,
    PluginList, SpanEventConfig, VitrineConfig, parse_plugin_ids,
};
pub use validation::validate_config;
