//! Error types for the extension system.

use thiserror::Error;

/// Boxed error returned by plugin loaders and data hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Reasons an extension is left out of a loaded set.
///
/// None of these are fatal to the host: the loader logs them, records them in
/// its report and continues with the remaining identifiers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtensionError {
    /// No loader is registered for the identifier.
    #[error("unknown plugin '{id}'")]
    UnknownPlugin {
        /// The requested identifier.
        id: String,
    },

    /// The loader function returned an error.
    #[error("plugin '{id}' failed to load: {reason}")]
    LoadFailed {
        /// The plugin identifier.
        id: String,
        /// Rendered loader error.
        reason: String,
    },

    /// The descriptor violates a structural invariant.
    #[error("plugin '{id}' has a malformed descriptor: {reason}")]
    Malformed {
        /// The plugin identifier.
        id: String,
        /// Which invariant was violated.
        reason: String,
    },
}

impl ExtensionError {
    /// Creates an unknown-plugin error.
    pub fn unknown(id: impl Into<String>) -> Self {
        Self::UnknownPlugin { id: id.into() }
    }

    /// Creates a load failure from any displayable error.
    pub fn load_failed(id: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::LoadFailed {
            id: id.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a malformed-descriptor error.
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// The plugin identifier this error refers to.
    pub fn plugin_id(&self) -> &str {
        match self {
            Self::UnknownPlugin { id } | Self::LoadFailed { id, .. } | Self::Malformed { id, .. } => {
                id
            }
        }
    }
}

/// Result type for extension operations.
pub type ExtensionResult<T> = Result<T, ExtensionError>;
