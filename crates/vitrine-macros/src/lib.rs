//! Procedural macros for the Vitrine extension system.
//!
//! # `#[register_extension("id")]`
//!
//! Wires a loader function into the compile-time registration table so the
//! loader can resolve `id` from configuration:
//!
//! ```rust,ignore
//! use vitrine::prelude::*;
//!
//! #[register_extension("freight")]
//! async fn freight() -> Result<Extension, BoxError> {
//!     Ok(Extension::new("freight").priority(150))
//! }
//! ```
//!
//! The function may be `async` or plain, and may return either an
//! `Extension` or a `Result<Extension, E>` with `E: Into<BoxError>`.

mod extension;

use proc_macro::TokenStream;

/// Registers the decorated function as the loader for a plugin identifier.
#[proc_macro_attribute]
pub fn register_extension(attr: TokenStream, item: TokenStream) -> TokenStream {
    extension::register_extension(attr, item)
}
