//! Navigation composer.
//!
//! [`NavComposer::apply`] turns the host's base menu and the registered
//! [`NavExtension`]s into the final menu.  Phases run in a fixed order and
//! each one sees the output of the previous one:
//!
//! 1. Order extensions by effective priority, highest first (stable).
//! 2. Collect the ids hidden by every active `hide` extension.
//! 3. Record one replacement per target; the first (highest priority)
//!    `replace` extension for a target wins, the rest are discarded.
//! 4. Rewrite the tree: hidden nodes are dropped, replaced nodes are swapped
//!    whole (children are not merged), other nodes are kept and recursed.
//! 5. Splice `before`/`after` nodes next to their target in the rewritten
//!    tree, one extension at a time in priority order.
//!
//! Insertions on the same side of the same target stack outwards: each one
//! lands beyond the nodes earlier (higher priority) extensions already
//! placed there, so reading away from the target yields priority order.
//! A missing target skips the insertion; it is logged as a warning when
//! [`NavComposer::warn_missing_targets`] is set and at trace level otherwise.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace, warn};
use vitrine_core::{DEFAULT_PRIORITY, MenuNode, NavExtension, Position, sorted_by_priority};

/// Configurable navigation composer.
#[derive(Debug, Clone, Copy)]
pub struct NavComposer {
    default_priority: i32,
    warn_missing_targets: bool,
}

impl Default for NavComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl NavComposer {
    /// Creates a composer with [`DEFAULT_PRIORITY`].
    ///
    /// Missing-target warnings default to on in debug builds.
    pub fn new() -> Self {
        Self {
            default_priority: DEFAULT_PRIORITY,
            warn_missing_targets: cfg!(debug_assertions),
        }
    }

    /// Sets the priority used for extensions without one.
    pub fn default_priority(mut self, priority: i32) -> Self {
        self.default_priority = priority;
        self
    }

    /// Logs insertions whose target is absent as warnings.
    pub fn warn_missing_targets(mut self, enabled: bool) -> Self {
        self.warn_missing_targets = enabled;
        self
    }

    /// Computes the final navigation tree.
    pub fn apply(&self, base: &[MenuNode], extensions: &[NavExtension]) -> Vec<MenuNode> {
        if extensions.is_empty() {
            return base.to_vec();
        }

        let active: Vec<&NavExtension> = sorted_by_priority(extensions, self.default_priority)
            .into_iter()
            .filter(|ext| ext.condition.is_satisfied())
            .collect();

        let hidden: HashSet<&str> = active
            .iter()
            .filter(|ext| ext.position == Position::Hide)
            .filter_map(|ext| ext.target.as_deref())
            .collect();

        let mut replacements: HashMap<&str, &MenuNode> = HashMap::new();
        for ext in active.iter().filter(|ext| ext.position == Position::Replace) {
            let (Some(target), Some(node)) = (ext.target.as_deref(), ext.replacement()) else {
                continue;
            };
            if replacements.contains_key(target) {
                debug!(
                    target = %target,
                    extension = ext.extension_id.as_deref().unwrap_or("<anonymous>"),
                    "Replacement discarded, target already claimed by a higher priority extension"
                );
                continue;
            }
            replacements.insert(target, node);
        }

        let mut tree = rewrite(base, &hidden, &replacements);

        let mut stacked: HashMap<(Position, Option<&str>), usize> = HashMap::new();
        for ext in active.iter().filter(|ext| ext.position.is_insertion()) {
            let key = (ext.position, ext.target.as_deref());
            let offset = stacked.get(&key).copied().unwrap_or(0);
            if self.insert(&mut tree, ext, offset) {
                *stacked.entry(key).or_insert(0) += ext.nodes.len();
            }
        }

        tree
    }

    /// Splices one extension's nodes; returns `false` when the target is absent.
    fn insert(&self, tree: &mut Vec<MenuNode>, ext: &NavExtension, offset: usize) -> bool {
        let nodes = ext.nodes.iter().cloned();

        let Some(target) = ext.target.as_deref() else {
            let at = match ext.position {
                Position::Before => offset.min(tree.len()),
                _ => tree.len(),
            };
            tree.splice(at..at, nodes);
            return true;
        };

        let Some(path) = find_path(tree, target) else {
            let extension = ext.extension_id.as_deref().unwrap_or("<anonymous>");
            if self.warn_missing_targets {
                warn!(
                    target = %target,
                    extension = %extension,
                    position = %ext.position,
                    "Navigation target not found, insertion skipped"
                );
            } else {
                trace!(target = %target, extension = %extension, "Navigation target not found");
            }
            return false;
        };

        let (index, parent) = match path.split_last() {
            Some((index, parent)) => (*index, parent),
            None => return false,
        };
        let siblings = siblings_mut(tree, parent);
        let at = match ext.position {
            Position::Before => index.saturating_sub(offset),
            _ => (index + 1 + offset).min(siblings.len()),
        };
        siblings.splice(at..at, nodes);
        true
    }
}

/// Applies `extensions` to `base` with the given default priority.
pub fn apply_nav_extensions(
    base: &[MenuNode],
    extensions: &[NavExtension],
    default_priority: i32,
) -> Vec<MenuNode> {
    NavComposer::new()
        .default_priority(default_priority)
        .apply(base, extensions)
}

fn rewrite(
    nodes: &[MenuNode],
    hidden: &HashSet<&str>,
    replacements: &HashMap<&str, &MenuNode>,
) -> Vec<MenuNode> {
    nodes
        .iter()
        .filter(|node| !hidden.contains(node.id.as_str()))
        .map(|node| match replacements.get(node.id.as_str()) {
            Some(replacement) => (*replacement).clone(),
            None => MenuNode {
                id: node.id.clone(),
                label: node.label.clone(),
                path: node.path.clone(),
                icon: node.icon.clone(),
                children: rewrite(&node.children, hidden, replacements),
            },
        })
        .collect()
}

/// Index path to the first node with `id`, depth-first pre-order.
fn find_path(nodes: &[MenuNode], id: &str) -> Option<Vec<usize>> {
    for (index, node) in nodes.iter().enumerate() {
        if node.id == id {
            return Some(vec![index]);
        }
        if let Some(mut rest) = find_path(&node.children, id) {
            rest.insert(0, index);
            return Some(rest);
        }
    }
    None
}

fn siblings_mut<'a>(tree: &'a mut Vec<MenuNode>, parent: &[usize]) -> &'a mut Vec<MenuNode> {
    parent
        .iter()
        .fold(tree, |level, &index| &mut level[index].children)
}
