//! # Vitrine
//!
//! Extension system for the Vitrine commerce admin.
//!
//! Plugins contribute navigation entries, page sections and data hooks to the
//! admin shell without touching its code. The shell loads the configured
//! plugins once, then composes each surface from the loaded set:
//!
//! ```text
//! ┌──────────────┐     ┌────────────────┐     ┌───────────────────────────────┐
//! │ VITRINE_     │────▶│ ExtensionLoader│────▶│ ExtensionSet (priority order) │
//! │ PLUGINS      │     │  (TTL cache)   │     └──┬──────────┬──────────┬──────┘
//! └──────────────┘     └────────────────┘        │          │          │
//!                                           NavComposer  Sections  DataHooks
//! ```
//!
//! - **Extensions**: immutable descriptors built by a plugin's loader
//! - **Navigation**: hide, replace and insert menu nodes by id
//! - **Page sections**: hide, replace and add components around a page's defaults
//! - **Data hooks**: ordered load and save transforms plus post-save side effects
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vitrine::prelude::*;
//!
//! #[register_extension("freight")]
//! fn freight() -> Extension {
//!     Extension::new("freight")
//!         .nav(NavExtension::after("orders", [MenuNode::new("freight", "Freight")]))
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let vitrine = Vitrine::builder().init_logging().build()?;
//!     let set = vitrine.load_server().await;
//!     let nav = vitrine.navigation(&base_menu(), &set);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config` (default): read `vitrine.toml`
//! - `yaml-config`: read `vitrine.yaml`
//! - `json-log`: JSON log lines

pub use vitrine_core as core;
pub use vitrine_framework as framework;
pub use vitrine_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use vitrine::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use vitrine_runtime::{ExtensionSet, Profile, Vitrine, VitrineConfig};

    // Declaring extensions
    pub use vitrine_framework::define_extension;
    pub use vitrine_macros::register_extension;

    // Descriptor model
    pub use vitrine_core::{
        BoxError, Component, Condition, DataHookExtension, Enabled, Extension, HookResult,
        MenuNode, NavExtension, PageSectionExtension, Position, SaveContext,
    };

    // Composed output
    pub use vitrine_framework::{DataHooks, PageSections, RenderedSection, SectionSlot};
}
