use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Position;
use crate::predicate::Condition;
use crate::priority::Prioritized;

/// A reference to a renderable component registered in the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Component name as registered by the host renderer.
    pub name: String,
    /// Props merged under the props the page passes at render time.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub props: Value,
}

impl Component {
    /// Creates a component reference without props.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            props: Value::Null,
        }
    }

    /// Sets the static props.
    pub fn with_props(mut self, props: Value) -> Self {
        self.props = props;
        self
    }
}

/// A change to one page's section list contributed by one extension.
#[derive(Debug, Clone)]
pub struct PageSectionExtension {
    /// Page identifier, e.g. `admin/store/products/edit`.
    pub page: String,
    /// What to do.
    pub position: Position,
    /// Section acted on; required for `hide` and `replace`.
    pub target: Option<String>,
    /// What to render; absent only for `hide`.
    pub component: Option<Component>,
    /// Priority override; falls back to the owning extension's priority.
    pub priority: Option<i32>,
    /// Runtime condition.
    pub condition: Condition,
    /// Identifier of the owning extension, set when the snapshot is flattened.
    pub extension_id: Option<String>,
}

impl PageSectionExtension {
    fn new(
        page: impl Into<String>,
        position: Position,
        target: Option<String>,
        component: Option<Component>,
    ) -> Self {
        Self {
            page: page.into(),
            position,
            target,
            component,
            priority: None,
            condition: Condition::Always,
            extension_id: None,
        }
    }

    /// Hides the section `target` on `page`.
    pub fn hide(page: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(page, Position::Hide, Some(target.into()), None)
    }

    /// Renders `component` in place of the section `target` on `page`.
    pub fn replace(
        page: impl Into<String>,
        target: impl Into<String>,
        component: Component,
    ) -> Self {
        Self::new(page, Position::Replace, Some(target.into()), Some(component))
    }

    /// Renders `component` ahead of the page's default sections.
    pub fn before(page: impl Into<String>, component: Component) -> Self {
        Self::new(page, Position::Before, None, Some(component))
    }

    /// Renders `component` after the page's default sections.
    pub fn after(page: impl Into<String>, component: Component) -> Self {
        Self::new(page, Position::After, None, Some(component))
    }

    /// Records the section the insertion relates to (informational only).
    pub fn targeting(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Sets the priority override.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Applies only while `f` returns `true`.
    pub fn when<F>(mut self, f: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.condition = Condition::when(f);
        self
    }

    /// Checks the structural invariants of this contribution.
    pub fn validate(&self) -> Result<(), String> {
        if self.page.is_empty() {
            return Err("section extension requires a page".to_string());
        }
        match self.position {
            Position::Hide | Position::Replace if self.target.is_none() => Err(format!(
                "section '{}' on '{}' requires a target",
                self.position, self.page
            )),
            Position::Hide => Ok(()),
            _ if self.component.is_none() => Err(format!(
                "section '{}' on '{}' requires a component",
                self.position, self.page
            )),
            _ => Ok(()),
        }
    }
}

impl Prioritized for PageSectionExtension {
    fn priority_override(&self) -> Option<i32> {
        self.priority
    }
}
