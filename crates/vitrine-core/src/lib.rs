//! # Vitrine Core
//!
//! Data model shared by every layer of the Vitrine extension system.
//!
//! An [`Extension`] is an independently authored bundle of contributions to
//! the admin host:
//!
//! - [`NavExtension`]s hide, replace or insert navigation items.
//! - [`PageSectionExtension`]s hide, replace or add sections on a page.
//! - [`DataHookExtension`]s transform page data around load and save.
//!
//! Extensions carry a numeric priority ([`DEFAULT_PRIORITY`] when absent);
//! higher values are applied first and win conflicts.  Every ordering in the
//! system goes through [`sort_by_priority`], which is stable, so equal
//! priorities keep their resolution order.
//!
//! Plugins make themselves loadable by contributing an [`ExtensionEntry`] to
//! the [`EXTENSION_REGISTRY`] slice, usually through the
//! `#[register_extension("id")]` attribute from `vitrine-macros`.

pub mod error;
pub mod model;
pub mod predicate;
pub mod priority;
pub mod registry;

pub use error::{BoxError, ExtensionError, ExtensionResult};
pub use model::{
    AfterSaveFn, Component, DataHookExtension, Extension, ExtensionMetadata, HookResult,
    MenuNode, NavExtension, OnLoadFn, OnSaveFn, PageSectionExtension, Position, SaveContext,
    TransformFn,
};
pub use predicate::{Condition, Enabled, PredicateFn};
pub use priority::{DEFAULT_PRIORITY, Prioritized, sort_by_priority, sorted_by_priority};
pub use registry::{EXTENSION_REGISTRY, ExtensionEntry, IntoLoadResult, LoadFn};

// Used by `#[register_extension]` expansions.
#[doc(hidden)]
pub use futures as __futures;
#[doc(hidden)]
pub use linkme;
