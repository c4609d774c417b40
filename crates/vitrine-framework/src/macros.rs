// ─── define_extension! ───────────────────────────────────────────────────────

/// Builds an [`Extension`](vitrine_core::Extension) descriptor.
///
/// Fields must appear in the order shown; all but `id` are optional.
///
/// ```rust,ignore
/// use vitrine::prelude::*;
///
/// let ext = define_extension! {
///     /// Freight rates and carrier settings.
///     id: "freight",
///     name: "Freight",
///     priority: 150,
///     enabled: true,
///     navigation: [
///         NavExtension::after("orders", [MenuNode::new("freight", "menu.freight")]),
///     ],
///     sections: [
///         PageSectionExtension::after("admin/store/products/edit", Component::new("ProductShipping")),
///     ],
///     data_hooks: [],
/// };
/// ```
///
/// # Defaults
///
/// | Field | Default |
/// |-------|---------|
/// | `version` | `CARGO_PKG_VERSION` of the crate invoking the macro |
/// | `name` | the identifier |
/// | `description` | the `///` doc lines above `id`, if any |
/// | `priority` | [`DEFAULT_PRIORITY`](vitrine_core::DEFAULT_PRIORITY) |
#[macro_export]
macro_rules! define_extension {
    (
        $(#[doc = $doc:literal])*
        id: $id:expr
        $(, name: $name:expr)?
        $(, version: $version:expr)?
        $(, priority: $priority:expr)?
        $(, enabled: $enabled:expr)?
        $(, navigation: [$($nav:expr),* $(,)?])?
        $(, sections: [$($section:expr),* $(,)?])?
        $(, data_hooks: [$($hook:expr),* $(,)?])?
        $(,)?
    ) => {{
        #[allow(unused_mut)]
        let mut ext = $crate::Extension::new($id)
            .version($crate::define_extension!(@version $($version)?));
        let docs: &[&str] = &[$($doc),*];
        if !docs.is_empty() {
            let description = docs
                .iter()
                .map(|line| line.trim())
                .collect::<::std::vec::Vec<_>>()
                .join("\n");
            ext = ext.description(description);
        }
        $( ext = ext.name($name); )?
        $( ext = ext.priority($priority); )?
        $( ext = ext.enabled($enabled); )?
        $( $( ext = ext.nav($nav); )* )?
        $( $( ext = ext.section($section); )* )?
        $( $( ext = ext.data_hook($hook); )* )?
        ext
    }};

    (@version) => { ::std::env!("CARGO_PKG_VERSION") };
    (@version $version:expr) => { $version };
}

#[cfg(test)]
mod tests {
    use crate::{Component, MenuNode, NavExtension, PageSectionExtension};

    #[test]
    fn test_define_extension_minimal() {
        let ext = define_extension! { id: "minimal" };
        assert_eq!(ext.id(), "minimal");
        assert_eq!(ext.metadata().version.as_deref(), Some(env!("CARGO_PKG_VERSION")));
        assert!(ext.metadata().description.is_none());
        assert_eq!(ext.display_name(), "minimal");
    }

    #[test]
    fn test_define_extension_full() {
        let ext = define_extension! {
            /// Freight rates
            /// and carriers.
            id: "freight",
            name: "Freight",
            version: "2.1.0",
            priority: 150,
            enabled: true,
            navigation: [
                NavExtension::after("orders", [MenuNode::new("freight", "Freight")]),
                NavExtension::hide("reports"),
            ],
            sections: [
                PageSectionExtension::after("admin/store/products/edit", Component::new("Shipping")),
            ],
        };
        assert_eq!(ext.display_name(), "Freight");
        assert_eq!(ext.metadata().version.as_deref(), Some("2.1.0"));
        assert_eq!(
            ext.metadata().description.as_deref(),
            Some("Freight rates\nand carriers.")
        );
        assert_eq!(ext.resolved_priority(), 150);
        assert_eq!(ext.navigation().len(), 2);
        assert_eq!(ext.sections().len(), 1);
        assert!(ext.data_hooks().is_empty());
        assert!(ext.validate().is_ok());
    }
}
