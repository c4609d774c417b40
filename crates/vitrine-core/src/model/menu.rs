use serde::{Deserialize, Serialize};

/// One node of the host navigation tree.
///
/// Identifiers only need to be unique among siblings; targets are matched
/// depth-first and the first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    /// Identifier used as an extension target.
    pub id: String,
    /// Display label (a translation key in the admin host).
    pub label: String,
    /// Route the item links to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Ordered child items.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Creates a leaf node.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            path: None,
            icon: None,
            children: Vec::new(),
        }
    }

    /// Sets the route.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Replaces the children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = MenuNode>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    /// Appends one child.
    pub fn child(mut self, node: MenuNode) -> Self {
        self.children.push(node);
        self
    }

    /// Finds the first node with `id` in depth-first pre-order.
    pub fn find<'a>(nodes: &'a [MenuNode], id: &str) -> Option<&'a MenuNode> {
        nodes.iter().find_map(|node| {
            if node.id == id {
                Some(node)
            } else {
                Self::find(&node.children, id)
            }
        })
    }
}
