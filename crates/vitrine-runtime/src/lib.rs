//! Vitrine Runtime - loading, caching and configuration for Vitrine extensions.
//!
//! This crate provides:
//! - Plugin resolution through the compile-time registry (`LoaderTable`,
//!   `ExtensionLoader`) with per-plugin failure isolation
//! - A TTL cache of loaded sets that shares in-flight loads
//! - Layered configuration (`VitrineConfig`) and logging setup
//! - The `Vitrine` facade used by the admin shell
//!
//! ```ignore
//! use vitrine_runtime::Vitrine;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let vitrine = Vitrine::builder().init_logging().build()?;
//!     let set = vitrine.load_server().await;
//!     let hooks = vitrine.data_hooks("products/edit", &set);
//!     let data = hooks.run_on_load(serde_json::json!({})).await?;
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod loader;
pub mod logging;
pub mod runtime;
pub mod snapshot;

pub use cache::{CachePolicy, LoadCache, SectionCache};
pub use config::{ConfigError, ConfigLoader, ConfigResult, PluginList, Profile, VitrineConfig};
pub use loader::{ExtensionLoader, ExtensionSource, LoaderTable, resolve_all};
pub use logging::{LoggingBuilder, SpanEvents};
pub use runtime::{Vitrine, VitrineBuilder};
pub use snapshot::{ExtensionSet, LoadReport};
