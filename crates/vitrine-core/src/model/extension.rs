use super::{DataHookExtension, NavExtension, PageSectionExtension};
use crate::error::{ExtensionError, ExtensionResult};
use crate::predicate::Enabled;
use crate::priority::{DEFAULT_PRIORITY, Prioritized};

/// Descriptive metadata shown in logs and diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionMetadata {
    /// Display name; defaults to the identifier.
    pub name: Option<String>,
    /// Semver version string.
    pub version: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
}

/// An independently authored bundle of contributions.
///
/// Built once by its plugin's loader and immutable afterwards.  The loader
/// drops it entirely when [`Extension::is_enabled`] is `false`.
#[derive(Debug, Clone)]
pub struct Extension {
    id: String,
    priority: Option<i32>,
    enabled: Enabled,
    metadata: ExtensionMetadata,
    navigation: Vec<NavExtension>,
    sections: Vec<PageSectionExtension>,
    data_hooks: Vec<DataHookExtension>,
}

impl Extension {
    /// Creates an extension with no contributions.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            priority: None,
            enabled: Enabled::Always,
            metadata: ExtensionMetadata::default(),
            navigation: Vec::new(),
            sections: Vec::new(),
            data_hooks: Vec::new(),
        }
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn enabled(mut self, enabled: impl Into<Enabled>) -> Self {
        self.enabled = enabled.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.metadata.name = Some(name.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.metadata.version = Some(version.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = Some(description.into());
        self
    }

    /// Adds a navigation contribution.
    pub fn nav(mut self, nav: NavExtension) -> Self {
        self.navigation.push(nav);
        self
    }

    /// Adds a page section contribution.
    pub fn section(mut self, section: PageSectionExtension) -> Self {
        self.sections.push(section);
        self
    }

    /// Adds a data hook contribution.
    pub fn data_hook(mut self, hook: DataHookExtension) -> Self {
        self.data_hooks.push(hook);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The effective priority ([`DEFAULT_PRIORITY`] when unset).
    pub fn resolved_priority(&self) -> i32 {
        self.effective_priority(DEFAULT_PRIORITY)
    }

    pub fn metadata(&self) -> &ExtensionMetadata {
        &self.metadata
    }

    /// Display name, falling back to the identifier.
    pub fn display_name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or(&self.id)
    }

    /// Evaluates the enabled switch.
    pub fn is_enabled(&self) -> bool {
        self.enabled.evaluate()
    }

    pub fn navigation(&self) -> &[NavExtension] {
        &self.navigation
    }

    pub fn sections(&self) -> &[PageSectionExtension] {
        &self.sections
    }

    pub fn data_hooks(&self) -> &[DataHookExtension] {
        &self.data_hooks
    }

    /// Checks the descriptor and every contribution it carries.
    pub fn validate(&self) -> ExtensionResult<()> {
        if self.id.trim().is_empty() {
            return Err(ExtensionError::malformed(
                self.id.clone(),
                "extension identifier is empty",
            ));
        }
        for nav in &self.navigation {
            nav.validate()
                .map_err(|reason| ExtensionError::malformed(self.id.clone(), reason))?;
        }
        for section in &self.sections {
            section
                .validate()
                .map_err(|reason| ExtensionError::malformed(self.id.clone(), reason))?;
        }
        for hook in &self.data_hooks {
            if hook.page.is_empty() {
                return Err(ExtensionError::malformed(
                    self.id.clone(),
                    "data hook requires a page",
                ));
            }
        }
        Ok(())
    }

    /// Navigation contributions with owner id filled in.
    ///
    /// A contribution without a priority inherits the extension's; if neither
    /// sets one the composer's default applies.
    pub fn resolved_navigation(&self) -> impl Iterator<Item = NavExtension> + '_ {
        self.navigation.iter().map(|nav| NavExtension {
            priority: nav.priority.or(self.priority),
            extension_id: Some(self.id.clone()),
            ..nav.clone()
        })
    }

    /// Section contributions with owner id and inherited priority.
    pub fn resolved_sections(&self) -> impl Iterator<Item = PageSectionExtension> + '_ {
        self.sections.iter().map(|section| PageSectionExtension {
            priority: section.priority.or(self.priority),
            extension_id: Some(self.id.clone()),
            ..section.clone()
        })
    }

    /// Data hooks with owner id and inherited priority.
    pub fn resolved_data_hooks(&self) -> impl Iterator<Item = DataHookExtension> + '_ {
        self.data_hooks.iter().map(|hook| DataHookExtension {
            priority: hook.priority.or(self.priority),
            extension_id: Some(self.id.clone()),
            ..hook.clone()
        })
    }
}

impl Prioritized for Extension {
    fn priority_override(&self) -> Option<i32> {
        self.priority
    }
}
