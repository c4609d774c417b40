use super::{MenuNode, Position};
use crate::predicate::Condition;
use crate::priority::Prioritized;

/// A change to the navigation tree contributed by one extension.
///
/// `hide` and `replace` require a target.  `before` and `after` require a
/// non-empty node list; without a target they act on the root level
/// (prepend and append respectively).
#[derive(Debug, Clone)]
pub struct NavExtension {
    /// What to do with the target.
    pub position: Position,
    /// Identifier of the node acted on.
    pub target: Option<String>,
    /// Inserted nodes, or the replacement node for `replace`.
    pub nodes: Vec<MenuNode>,
    /// Priority override; falls back to the owning extension's priority.
    pub priority: Option<i32>,
    /// Runtime condition.
    pub condition: Condition,
    /// Identifier of the owning extension, set when the snapshot is flattened.
    pub extension_id: Option<String>,
}

impl NavExtension {
    fn new(position: Position, target: Option<String>, nodes: Vec<MenuNode>) -> Self {
        Self {
            position,
            target,
            nodes,
            priority: None,
            condition: Condition::Always,
            extension_id: None,
        }
    }

    /// Removes the node `target`.
    pub fn hide(target: impl Into<String>) -> Self {
        Self::new(Position::Hide, Some(target.into()), Vec::new())
    }

    /// Replaces the node `target` with `node`.
    pub fn replace(target: impl Into<String>, node: MenuNode) -> Self {
        Self::new(Position::Replace, Some(target.into()), vec![node])
    }

    /// Inserts `nodes` before `target`.
    pub fn before(target: impl Into<String>, nodes: impl IntoIterator<Item = MenuNode>) -> Self {
        Self::new(
            Position::Before,
            Some(target.into()),
            nodes.into_iter().collect(),
        )
    }

    /// Inserts `nodes` after `target`.
    pub fn after(target: impl Into<String>, nodes: impl IntoIterator<Item = MenuNode>) -> Self {
        Self::new(
            Position::After,
            Some(target.into()),
            nodes.into_iter().collect(),
        )
    }

    /// Prepends `nodes` to the root level.
    pub fn prepend(nodes: impl IntoIterator<Item = MenuNode>) -> Self {
        Self::new(Position::Before, None, nodes.into_iter().collect())
    }

    /// Appends `nodes` to the root level.
    pub fn append(nodes: impl IntoIterator<Item = MenuNode>) -> Self {
        Self::new(Position::After, None, nodes.into_iter().collect())
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

    /// The replacement node of a `replace` extension.
    pub fn replacement(&self) -> Option<&MenuNode> {
        match self.position {
            Position::Replace => self.nodes.first(),
            _ => None,
        }
    }

    /// Checks the structural invariants of this contribution.
    pub fn validate(&self) -> Result<(), String> {
        match self.position {
            Position::Hide | Position::Replace if self.target.is_none() => {
                Err(format!("navigation '{}' requires a target", self.position))
            }
            Position::Replace if self.nodes.is_empty() => {
                Err("navigation 'replace' requires a replacement node".to_string())
            }
            Position::Before | Position::After if self.nodes.is_empty() => Err(format!(
                "navigation '{}' requires at least one node",
                self.position
            )),
            _ => Ok(()),
        }
    }
}

impl Prioritized for NavExtension {
    fn priority_override(&self) -> Option<i32> {
        self.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_invariants() {
        assert!(NavExtension::hide("orders").validate().is_ok());
        assert!(
            NavExtension::replace("orders", MenuNode::new("orders", "Orders"))
                .validate()
                .is_ok()
        );
        assert!(NavExtension::after("orders", []).validate().is_err());
        assert!(NavExtension::append([MenuNode::new("x", "X")]).validate().is_ok());

        let mut targetless = NavExtension::hide("orders");
        targetless.target = None;
        assert!(targetless.validate().is_err());

        let mut empty_replace = NavExtension::replace("orders", MenuNode::new("o", "O"));
        empty_replace.nodes.clear();
        assert!(empty_replace.validate().is_err());
    }
}
