//! Page section composer.
//!
//! A page is a flat, ordered list of named sections.  Extensions may hide a
//! default section, render something else in its place, or add sections
//! ahead of or after the default list.  `before`/`after` contributions are
//! not interleaved per target; they are exposed as two ordered lists the page
//! renders around its own sections.

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;
use tracing::debug;
use vitrine_core::{Component, DEFAULT_PRIORITY, PageSectionExtension, Position, sorted_by_priority};

use crate::defaults::DefaultSections;

/// The resolved section layout of one page.
#[derive(Debug, Clone, Default)]
pub struct PageSections {
    /// Page identifier.
    pub page: String,
    /// Default sections that render, in default order.
    pub visible: Vec<String>,
    /// Extension sections rendered ahead of the defaults, priority order.
    pub before: Vec<PageSectionExtension>,
    /// Extension sections rendered after the defaults, priority order.
    pub after: Vec<PageSectionExtension>,
    /// Section id to the extension rendering in its place.
    pub replacements: BTreeMap<String, PageSectionExtension>,
}

/// One entry of a page's render plan.
#[derive(Debug, Clone, Copy)]
pub enum SectionSlot<'a> {
    /// A section contributed through `before`/`after`.
    Inserted(&'a PageSectionExtension),
    /// A default section rendered by the page itself.
    Default(&'a str),
    /// A default section rendered by an extension.
    Replaced {
        id: &'a str,
        extension: &'a PageSectionExtension,
    },
}

/// Who renders a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionSource {
    /// The page's own component.
    Default,
    /// The extension with this identifier.
    Extension(Option<String>),
}

/// A section ready to hand to the host renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSection {
    /// Section id.
    pub id: String,
    /// Component and the props to render it with.
    pub component: Component,
    /// Who provided the component.
    pub source: SectionSource,
}

impl PageSections {
    /// The layout of `page` with no extensions at all.
    pub fn fallback(page: &str, defaults: &DefaultSections) -> Self {
        Self {
            page: page.to_string(),
            visible: defaults.get(page).to_vec(),
            ..Self::default()
        }
    }

    /// `true` when `id` is a default section that still renders.
    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.iter().any(|s| s == id)
    }

    /// The extension replacing `id`, if any.
    pub fn replacement(&self, id: &str) -> Option<&PageSectionExtension> {
        self.replacements.get(id)
    }

    /// Resolves one default section for rendering.
    pub fn render(&self, id: &str, default: &Component, props: Option<&Value>) -> Option<RenderedSection> {
        render_section(id, &self.visible, &self.replacements, default, props)
    }

    /// The ordered render plan: `before`, then visible sections, then `after`.
    pub fn plan(&self) -> Vec<SectionSlot<'_>> {
        let visible = self.visible.iter().map(|id| match self.replacements.get(id) {
            Some(extension) => SectionSlot::Replaced {
                id: id.as_str(),
                extension,
            },
            None => SectionSlot::Default(id.as_str()),
        });
        self.before
            .iter()
            .map(SectionSlot::Inserted)
            .chain(visible)
            .chain(self.after.iter().map(SectionSlot::Inserted))
            .collect()
    }
}

/// Configurable section composer.
#[derive(Debug, Clone, Copy)]
pub struct SectionComposer {
    default_priority: i32,
}

impl Default for SectionComposer {
    fn default() -> Self {
        Self {
            default_priority: DEFAULT_PRIORITY,
        }
    }
}

impl SectionComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the priority used for extensions without one.
    pub fn default_priority(mut self, priority: i32) -> Self {
        self.default_priority = priority;
        self
    }

    /// Resolves the layout of `page`.
    pub fn resolve(
        &self,
        page: &str,
        extensions: &[PageSectionExtension],
        defaults: &DefaultSections,
    ) -> PageSections {
        let matching = extensions
            .iter()
            .filter(|ext| ext.page == page && ext.condition.is_satisfied());

        let mut hidden: HashSet<&str> = HashSet::new();
        let mut out = PageSections {
            page: page.to_string(),
            ..PageSections::default()
        };

        for ext in sorted_by_priority(matching, self.default_priority) {
            match ext.position {
                Position::Hide => {
                    if let Some(target) = ext.target.as_deref() {
                        hidden.insert(target);
                    }
                }
                Position::Replace => {
                    let Some(target) = ext.target.as_deref() else {
                        continue;
                    };
                    if out.replacements.contains_key(target) {
                        debug!(
                            page = %page,
                            target = %target,
                            extension = ext.extension_id.as_deref().unwrap_or("<anonymous>"),
                            "Section replacement discarded, target already claimed"
                        );
                        continue;
                    }
                    out.replacements.insert(target.to_string(), ext.clone());
                }
                Position::Before => out.before.push(ext.clone()),
                Position::After => out.after.push(ext.clone()),
            }
        }

        out.visible = defaults
            .get(page)
            .iter()
            .filter(|id| !hidden.contains(id.as_str()))
            .cloned()
            .collect();
        out
    }

    /// Like [`resolve`](Self::resolve), degrading to the defaults when no
    /// extension context exists.
    pub fn resolve_optional(
        &self,
        page: &str,
        extensions: Option<&[PageSectionExtension]>,
        defaults: &DefaultSections,
    ) -> PageSections {
        match extensions {
            Some(extensions) => self.resolve(page, extensions, defaults),
            None => PageSections::fallback(page, defaults),
        }
    }
}

/// Resolves the layout of `page` with [`DEFAULT_PRIORITY`].
pub fn resolve_page_sections(
    page: &str,
    extensions: &[PageSectionExtension],
    defaults: &DefaultSections,
) -> PageSections {
    SectionComposer::new().resolve(page, extensions, defaults)
}

/// Decides what renders for section `id`.
///
/// Returns `None` when the section is hidden (or not a section of the page),
/// the replacing extension's component when one exists, and `default`
/// otherwise.  `props` from the page take precedence over a component's
/// static props.
pub fn render_section(
    id: &str,
    visible: &[String],
    replacements: &BTreeMap<String, PageSectionExtension>,
    default: &Component,
    props: Option<&Value>,
) -> Option<RenderedSection> {
    if !visible.iter().any(|s| s == id) {
        return None;
    }

    let (component, source) = match replacements.get(id) {
        Some(ext) => match &ext.component {
            Some(component) => (component, SectionSource::Extension(ext.extension_id.clone())),
            None => (default, SectionSource::Default),
        },
        None => (default, SectionSource::Default),
    };

    Some(RenderedSection {
        id: id.to_string(),
        component: Component {
            name: component.name.clone(),
            props: merge_props(&component.props, props),
        },
        source,
    })
}

fn merge_props(base: &Value, overlay: Option<&Value>) -> Value {
    match (base, overlay) {
        (Value::Object(base), Some(Value::Object(overlay))) => {
            let mut merged = base.clone();
            for (key, value) in overlay {
                merged.insert(key.clone(), value.clone());
            }
            Value::Object(merged)
        }
        (base, None | Some(Value::Null)) => base.clone(),
        (_, Some(overlay)) => overlay.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PRODUCT_EDIT: &str = "admin/store/products/edit";

    fn defaults() -> DefaultSections {
        DefaultSections::builtin()
    }

    #[test]
    fn test_no_extensions_yields_defaults() {
        let sections = resolve_page_sections("admin/store/categories/new", &[], &defaults());
        assert_eq!(sections.visible, ["CategoryInfo"]);
        assert!(sections.before.is_empty());
        assert!(sections.after.is_empty());
        assert!(sections.replacements.is_empty());
    }

    #[test]
    fn test_missing_context_falls_back_to_defaults() {
        let sections =
            SectionComposer::new().resolve_optional("admin/store/categories/new", None, &defaults());
        assert_eq!(sections.visible, ["CategoryInfo"]);
        assert!(sections.replacements.is_empty());
    }

    #[test]
    fn test_hide_preserves_default_order() {
        let exts = [PageSectionExtension::hide(PRODUCT_EDIT, "ProductImage")];
        let sections = resolve_page_sections(PRODUCT_EDIT, &exts, &defaults());
        assert_eq!(
            sections.visible,
            [
                "ProductInformation",
                "ProductDescription",
                "ProductVariants",
                "ProductPricing",
                "ProductInventory",
                "ProductOrganize",
            ]
        );
    }

    #[test]
    fn test_other_pages_are_ignored() {
        let exts = [PageSectionExtension::hide("admin/store/products/new", "ProductImage")];
        let sections = resolve_page_sections(PRODUCT_EDIT, &exts, &defaults());
        assert!(sections.is_visible("ProductImage"));
    }

    #[test]
    fn test_unknown_page_is_empty() {
        let exts = [PageSectionExtension::after("admin/unknown", Component::new("Extra"))];
        let sections = resolve_page_sections("admin/unknown", &exts, &defaults());
        assert!(sections.visible.is_empty());
        assert_eq!(sections.after.len(), 1);
    }

    #[test]
    fn test_first_replacement_wins() {
        let exts = [
            PageSectionExtension::replace(PRODUCT_EDIT, "ProductPricing", Component::new("Tiered"))
                .with_priority(100),
            PageSectionExtension::replace(PRODUCT_EDIT, "ProductPricing", Component::new("Dynamic"))
                .with_priority(200),
        ];
        let sections = resolve_page_sections(PRODUCT_EDIT, &exts, &defaults());
        let winner = sections.replacement("ProductPricing").and_then(|e| e.component.as_ref());
        assert_eq!(winner.map(|c| c.name.as_str()), Some("Dynamic"));
        assert_eq!(sections.replacements.len(), 1);
    }

    #[test]
    fn test_before_after_ordered_by_priority() {
        let exts = [
            PageSectionExtension::after(PRODUCT_EDIT, Component::new("Seo")),
            PageSectionExtension::after(PRODUCT_EDIT, Component::new("Shipping")).with_priority(300),
            PageSectionExtension::before(PRODUCT_EDIT, Component::new("Banner")).with_priority(10),
            PageSectionExtension::before(PRODUCT_EDIT, Component::new("Alerts")),
        ];
        let sections = resolve_page_sections(PRODUCT_EDIT, &exts, &defaults());
        let names = |list: &[PageSectionExtension]| -> Vec<String> {
            list.iter()
                .filter_map(|e| e.component.as_ref().map(|c| c.name.clone()))
                .collect()
        };
        assert_eq!(names(&sections.before), ["Alerts", "Banner"]);
        assert_eq!(names(&sections.after), ["Shipping", "Seo"]);
    }

    #[test]
    fn test_condition_filters_extensions() {
        let exts = [
            PageSectionExtension::hide(PRODUCT_EDIT, "ProductImage").when(|| false),
            PageSectionExtension::hide(PRODUCT_EDIT, "ProductOrganize").when(|| true),
        ];
        let sections = resolve_page_sections(PRODUCT_EDIT, &exts, &defaults());
        assert!(sections.is_visible("ProductImage"));
        assert!(!sections.is_visible("ProductOrganize"));
    }

    #[test]
    fn test_render_section_paths() {
        let tiered = Component::new("Tiered").with_props(json!({ "currency": "EUR", "tiers": 3 }));
        let mut replacement = PageSectionExtension::replace(PRODUCT_EDIT, "ProductPricing", tiered);
        replacement.extension_id = Some("pricing".to_string());
        let exts = [replacement, PageSectionExtension::hide(PRODUCT_EDIT, "ProductImage")];
        let sections = resolve_page_sections(PRODUCT_EDIT, &exts, &defaults());

        assert!(sections
            .render("ProductImage", &Component::new("ProductImage"), None)
            .is_none());

        let default = sections
            .render("ProductInformation", &Component::new("ProductInformation"), None)
            .unwrap();
        assert_eq!(default.source, SectionSource::Default);
        assert_eq!(default.component.name, "ProductInformation");

        let replaced = sections
            .render(
                "ProductPricing",
                &Component::new("ProductPricing"),
                Some(&json!({ "currency": "USD", "productId": 7 })),
            )
            .unwrap();
        assert_eq!(replaced.source, SectionSource::Extension(Some("pricing".to_string())));
        assert_eq!(replaced.component.name, "Tiered");
        assert_eq!(
            replaced.component.props,
            json!({ "currency": "USD", "tiers": 3, "productId": 7 })
        );
    }

    #[test]
    fn test_plan_order() {
        let exts = [
            PageSectionExtension::before("admin/store/categories/edit", Component::new("Notice")),
            PageSectionExtension::replace(
                "admin/store/categories/edit",
                "CategoryProducts",
                Component::new("SortableProducts"),
            ),
            PageSectionExtension::after("admin/store/categories/edit", Component::new("Seo")),
        ];
        let sections = resolve_page_sections("admin/store/categories/edit", &exts, &defaults());
        let plan = sections.plan();
        assert_eq!(plan.len(), 4);
        assert!(matches!(plan[0], SectionSlot::Inserted(e) if e.component.as_ref().unwrap().name == "Notice"));
        assert!(matches!(plan[1], SectionSlot::Default("CategoryInfo")));
        assert!(matches!(plan[2], SectionSlot::Replaced { id: "CategoryProducts", .. }));
        assert!(matches!(plan[3], SectionSlot::Inserted(_)));
    }
}
