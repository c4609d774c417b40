//! Extension descriptors and the contributions they carry.

mod extension;
mod hook;
mod menu;
mod nav;
mod section;

pub use extension::{Extension, ExtensionMetadata};
pub use hook::{
    AfterSaveFn, DataHookExtension, HookResult, OnLoadFn, OnSaveFn, SaveContext, TransformFn,
};
pub use menu::MenuNode;
pub use nav::NavExtension;
pub use section::{Component, PageSectionExtension};

use serde::{Deserialize, Serialize};

/// Where a contribution acts relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Insert before the target.
    Before,
    /// Insert after the target.
    After,
    /// Substitute the target entirely.
    Replace,
    /// Remove the target.
    Hide,
}

impl Position {
    /// Returns the lowercase name used in configuration and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
            Self::Replace => "replace",
            Self::Hide => "hide",
        }
    }

    /// `true` for `before` and `after`.
    pub fn is_insertion(&self) -> bool {
        matches!(self, Self::Before | Self::After)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
