//! # Vitrine Framework
//!
//! Pure composition over a loaded set of extensions.
//!
//! - [`navigation`]: hide, replace and insert items in the navigation tree.
//! - [`sections`]: decide which sections of a page render and with what.
//! - [`hooks`]: fold page data through registered load/save hooks.
//! - [`defaults`]: the baseline section list of every admin page.
//!
//! None of the composers hold state or mutate their inputs; every call
//! derives fresh output from `(extensions, target)`.  Caching is left to the
//! caller (see `vitrine-runtime`).

pub mod defaults;
pub mod hooks;
pub mod macros;
pub mod navigation;
pub mod sections;

pub use defaults::DefaultSections;
pub use hooks::DataHooks;
pub use navigation::{NavComposer, apply_nav_extensions};
pub use sections::{
    PageSections, RenderedSection, SectionComposer, SectionSlot, SectionSource, render_section,
    resolve_page_sections,
};

pub use vitrine_core::{
    BoxError, Component, Condition, DataHookExtension, DEFAULT_PRIORITY, Enabled, Extension,
    HookResult, MenuNode, NavExtension, PageSectionExtension, Position, SaveContext,
};
