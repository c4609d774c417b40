use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Ident, ItemFn, LitStr, parse_macro_input};

/// Implementation of `#[register_extension("id")]`.
///
/// Leaves the decorated function unchanged and appends a
/// `#[::vitrine_core::linkme::distributed_slice]` static that adds an
/// `ExtensionEntry` for it to `EXTENSION_REGISTRY`.
pub fn register_extension(attr: TokenStream, item: TokenStream) -> TokenStream {
    let id = parse_macro_input!(attr as LitStr);
    let func = parse_macro_input!(item as ItemFn);

    if id.value().trim().is_empty() {
        return syn::Error::new(id.span(), "extension identifier must not be empty")
            .into_compile_error()
            .into();
    }

    if !func.sig.inputs.is_empty() {
        return syn::Error::new_spanned(
            &func.sig.inputs,
            "extension loader functions take no arguments",
        )
        .into_compile_error()
        .into();
    }

    let fn_name = &func.sig.ident;
    let fn_name_upper = fn_name.to_string().to_uppercase();
    let static_name = Ident::new(
        &format!("_EXTENSION_REGISTER_{fn_name_upper}"),
        Span::call_site(),
    );

    let call = if func.sig.asyncness.is_some() {
        quote!(#fn_name().await)
    } else {
        quote!(#fn_name())
    };

    quote! {
        #func

        #[::vitrine_core::linkme::distributed_slice(::vitrine_core::EXTENSION_REGISTRY)]
        #[linkme(crate = ::vitrine_core::linkme)]
        static #static_name: ::vitrine_core::ExtensionEntry = ::vitrine_core::ExtensionEntry {
            id: #id,
            load: || {
                ::vitrine_core::__futures::FutureExt::boxed(async {
                    ::vitrine_core::IntoLoadResult::into_load_result(#call)
                })
            },
        };
    }
    .into()
}
