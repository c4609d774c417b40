//! Compile-time plugin registration table.
//!
//! Plugins are not discovered at runtime.  Each plugin crate contributes an
//! [`ExtensionEntry`] to [`EXTENSION_REGISTRY`] (a `linkme` distributed slice)
//! and the loader resolves configured identifiers against it.
//!
//! ```rust,ignore
//! use vitrine_macros::register_extension;
//!
//! #[register_extension("freight")]
//! async fn freight() -> Extension {
//!     Extension::new("freight").priority(150)
//! }
//! ```

use futures::future::BoxFuture;
use linkme::distributed_slice;

use crate::error::BoxError;
use crate::model::Extension;

/// Loader function resolving one plugin identifier to its descriptor.
pub type LoadFn = fn() -> BoxFuture<'static, Result<Extension, BoxError>>;

/// One row of the registration table.
#[derive(Debug, Clone, Copy)]
pub struct ExtensionEntry {
    /// Identifier referenced from configuration.
    pub id: &'static str,
    /// Produces the descriptor.
    pub load: LoadFn,
}

/// Every plugin linked into the binary.
#[distributed_slice]
pub static EXTENSION_REGISTRY: [ExtensionEntry];

/// Return types accepted from a registered loader function.
pub trait IntoLoadResult {
    fn into_load_result(self) -> Result<Extension, BoxError>;
}

impl IntoLoadResult for Extension {
    fn into_load_result(self) -> Result<Extension, BoxError> {
        Ok(self)
    }
}

impl<E> IntoLoadResult for Result<Extension, E>
where
    E: Into<BoxError>,
{
    fn into_load_result(self) -> Result<Extension, BoxError> {
        self.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    fn freight() -> BoxFuture<'static, Result<Extension, BoxError>> {
        async { Extension::new("freight").priority(150).into_load_result() }.boxed()
    }

    fn broken() -> BoxFuture<'static, Result<Extension, BoxError>> {
        async { Err::<Extension, _>(std::io::Error::other("missing export")).into_load_result() }
            .boxed()
    }

    #[tokio::test]
    async fn test_entry_loads_descriptor() {
        let entry = ExtensionEntry {
            id: "freight",
            load: freight,
        };
        let ext = (entry.load)().await.unwrap();

        assert_eq!(ext.id(), entry.id);
        assert_eq!(ext.resolved_priority(), 150);
    }

    #[tokio::test]
    async fn test_loader_error_is_boxed() {
        let load: LoadFn = broken;
        let err = load().await.unwrap_err();
        assert_eq!(err.to_string(), "missing export");
    }
}
