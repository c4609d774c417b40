//! The immutable result of one load.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use vitrine_core::{DataHookExtension, Extension, ExtensionError, NavExtension, PageSectionExtension};

/// Why identifiers were left out of a loaded set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    skipped: Vec<ExtensionError>,
    disabled: Vec<String>,
}

impl LoadReport {
    pub fn record_skipped(&mut self, error: ExtensionError) {
        self.skipped.push(error);
    }

    pub fn record_disabled(&mut self, id: impl Into<String>) {
        self.disabled.push(id.into());
    }

    /// Unknown, failed and malformed identifiers in request order.
    pub fn skipped(&self) -> &[ExtensionError] {
        &self.skipped
    }

    /// Extensions that loaded but reported themselves disabled.
    pub fn disabled(&self) -> &[String] {
        &self.disabled
    }

    /// True when nothing was skipped for an error.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Loaded extensions, highest priority first.
///
/// Sets are shared behind `Arc` and never mutated; every load produces a new
/// set with its own [`generation`](Self::generation), even when the
/// descriptors look the same.
#[derive(Debug, Clone)]
pub struct ExtensionSet {
    extensions: Vec<Arc<Extension>>,
    report: LoadReport,
    generation: u64,
}

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::new(Vec::new(), LoadReport::default())
    }
}

impl ExtensionSet {
    /// Wraps extensions that are already in priority order.
    pub fn new(extensions: Vec<Arc<Extension>>, report: LoadReport) -> Self {
        Self {
            extensions,
            report,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Process-unique number of this set. Clones share it.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn iter(&self) -> impl Iterator<Item = &Extension> {
        self.extensions.iter().map(AsRef::as_ref)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.iter().map(Extension::id).collect()
    }

    pub fn get(&self, id: &str) -> Option<&Extension> {
        self.iter().find(|ext| ext.id() == id)
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Every navigation contribution, tagged with its owner.
    pub fn nav_extensions(&self) -> Vec<NavExtension> {
        self.iter().flat_map(Extension::resolved_navigation).collect()
    }

    /// Every page section contribution, tagged with its owner.
    pub fn section_extensions(&self) -> Vec<PageSectionExtension> {
        self.iter().flat_map(Extension::resolved_sections).collect()
    }

    /// Every data hook, tagged with its owner.
    pub fn data_hooks(&self) -> Vec<DataHookExtension> {
        self.iter().flat_map(Extension::resolved_data_hooks).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::{Component, MenuNode};

    fn set(extensions: Vec<Extension>) -> ExtensionSet {
        ExtensionSet::new(
            extensions.into_iter().map(Arc::new).collect(),
            LoadReport::default(),
        )
    }

    #[test]
    fn test_flattens_contributions_in_set_order() {
        let set = set(vec![
            Extension::new("freight")
                .priority(150)
                .nav(NavExtension::after("orders", [MenuNode::new("freight", "Freight")])),
            Extension::new("loyalty")
                .nav(NavExtension::hide("reports"))
                .section(PageSectionExtension::after(
                    "customers/edit",
                    Component::new("LoyaltyPoints"),
                )),
        ]);

        let navs = set.nav_extensions();
        assert_eq!(navs.len(), 2);
        assert_eq!(navs[0].extension_id.as_deref(), Some("freight"));
        assert_eq!(navs[0].priority, Some(150));
        assert_eq!(navs[1].priority, None);
        assert_eq!(set.section_extensions()[0].extension_id.as_deref(), Some("loyalty"));
        assert!(set.data_hooks().is_empty());
    }

    #[test]
    fn test_every_set_gets_its_own_generation() {
        let a = set(vec![Extension::new("freight")]);
        let b = set(vec![Extension::new("freight")]);

        assert_ne!(a.generation(), b.generation());
        assert_eq!(a.clone().generation(), a.generation());
        assert_ne!(ExtensionSet::default().generation(), a.generation());
    }

    #[test]
    fn test_lookup_by_id() {
        let set = set(vec![Extension::new("freight").name("Freight rates")]);
        assert_eq!(set.get("freight").map(Extension::display_name), Some("Freight rates"));
        assert!(set.get("loyalty").is_none());
    }
}
