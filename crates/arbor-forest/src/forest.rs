//! Ordered forest of root nodes and the immutable editing algebra.
//!
//! Every operation here is a pure function: the input forest is never
//! mutated and a new forest value is returned. Looking up an id that is
//! absent is a silent identity no-op at the level where the search happens,
//! never an error: a structural rewrite that finds nothing has nothing to
//! do. Traversal is iterative over explicit work stacks, so operation cost
//! does not depend on call-stack headroom for deep forests.

use crate::node::{Node, NodeId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where a subtree lands when inserted into a forest.
///
/// This is the sole vocabulary for describing a landing spot. The enum is
/// closed and every consumer matches exhaustively, so an unrecognized
/// position cannot be constructed, let alone dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TreePosition {
    /// Insert immediately after the named sibling, in that sibling's list.
    After(NodeId),
    /// Insert as the first child of the named parent (its last child when
    /// the parent is collapsed), or as the new first root when `None`.
    FirstChildOf(Option<NodeId>),
}

/// An ordered forest of labeled trees.
///
/// The forest is the only durable entity of the engine. Editing operations
/// replace it wholesale with a new value; flattened row views and drag
/// projections (see `arbor-view`) are ephemeral read models derived from
/// the current value each frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Forest {
    roots: Vec<Node>,
}

impl Forest {
    /// Create an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self { roots: Vec::new() }
    }

    /// Build a forest from root nodes, preserving order.
    #[must_use]
    pub fn from_roots(roots: Vec<Node>) -> Self {
        Self { roots }
    }

    /// Root nodes in order.
    #[must_use]
    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    /// Whether the forest has no roots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total node count across every tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(Node::subtree_size).sum()
    }

    /// Rebuild the forest by applying `transform` to every sibling list,
    /// root list first, then each surviving node's child list top-down.
    ///
    /// The transform receives the owned list and the node that owns it
    /// (`None` for the root list). The parent handle exposes identity and
    /// flags; the list being rebuilt is the one passed by value. Lists are
    /// transformed before their members' own child lists, so a transform
    /// that drops a node prevents any descent into the dropped subtree.
    #[must_use]
    pub fn map_sibling_lists<F>(&self, mut transform: F) -> Self
    where
        F: FnMut(Vec<Node>, Option<&Node>) -> Vec<Node>,
    {
        let mut roots = transform(self.roots.clone(), None);
        // Depth-first over index paths instead of recursion, so arbitrarily
        // deep forests stay within constant call-stack.
        let mut stack: Vec<Vec<usize>> = (0..roots.len()).rev().map(|index| vec![index]).collect();
        while let Some(path) = stack.pop() {
            let Some(node) = node_at_path_mut(&mut roots, &path) else {
                continue;
            };
            let children = std::mem::take(&mut node.children);
            node.children = transform(children, Some(&*node));
            for index in (0..node.children.len()).rev() {
                let mut child_path = path.clone();
                child_path.push(index);
                stack.push(child_path);
            }
        }
        Self { roots }
    }

    /// Remove the node with `id`, and its entire subtree, from wherever it
    /// occurs. Returns an equal forest when `id` is absent.
    #[must_use]
    pub fn remove(&self, id: NodeId) -> Self {
        self.map_sibling_lists(|mut siblings, _parent| {
            siblings.retain(|node| node.id() != id);
            siblings
        })
    }

    /// Replace the collapsed flag of the node with `id` by `update(old)`.
    /// Every other node is structurally unchanged; identity when absent.
    #[must_use]
    pub fn update_collapsed(&self, id: NodeId, update: impl FnOnce(bool) -> bool) -> Self {
        let mut update = Some(update);
        self.map_sibling_lists(|mut siblings, _parent| {
            if let Some(node) = siblings.iter_mut().find(|node| node.id() == id)
                && let Some(update) = update.take()
            {
                node.collapsed = update(node.collapsed);
            }
            siblings
        })
    }

    /// Replace the label of the node with `id` by `update(old)`. Identity
    /// when absent.
    #[must_use]
    pub fn update_label(&self, id: NodeId, update: impl FnOnce(&str) -> String) -> Self {
        let mut update = Some(update);
        self.map_sibling_lists(|mut siblings, _parent| {
            if let Some(node) = siblings.iter_mut().find(|node| node.id() == id)
                && let Some(update) = update.take()
            {
                let label = update(node.label());
                node.set_label(label);
            }
            siblings
        })
    }

    /// Flip the collapsed flag of the node with `id`. Identity when absent.
    #[must_use]
    pub fn toggle_collapsed(&self, id: NodeId) -> Self {
        self.update_collapsed(id, |collapsed| !collapsed)
    }

    /// Splice `node` immediately after the sibling with `sibling_id`, in
    /// the one list where that sibling actually lives. Every other list is
    /// left unchanged; identity when the sibling is absent.
    #[must_use]
    pub fn insert_after(&self, node: Node, sibling_id: NodeId) -> Self {
        let mut pending = Some(node);
        self.map_sibling_lists(|mut siblings, _parent| {
            if let Some(position) = siblings.iter().position(|sibling| sibling.id() == sibling_id)
                && let Some(node) = pending.take()
            {
                siblings.insert(position + 1, node);
            }
            siblings
        })
    }

    /// Insert `node` as the first child of the node with `parent`, or as
    /// its last child when that parent is collapsed, so the drop does not
    /// reshuffle the visible order once the parent expands. `None` prepends
    /// a new first root. Identity when a named parent is absent.
    #[must_use]
    pub fn insert_first_child(&self, node: Node, parent: Option<NodeId>) -> Self {
        let mut pending = Some(node);
        self.map_sibling_lists(|mut siblings, list_owner| {
            let owns_list = match (parent, list_owner) {
                (None, None) => true,
                (Some(id), Some(owner)) => owner.id() == id,
                _ => false,
            };
            if owns_list && let Some(node) = pending.take() {
                if list_owner.is_some_and(Node::is_collapsed) {
                    siblings.push(node);
                } else {
                    siblings.insert(0, node);
                }
            }
            siblings
        })
    }

    /// Insert `node` at `position`.
    #[must_use]
    pub fn insert_at(&self, node: Node, position: TreePosition) -> Self {
        match position {
            TreePosition::After(sibling) => self.insert_after(node, sibling),
            TreePosition::FirstChildOf(parent) => self.insert_first_child(node, parent),
        }
    }

    /// Depth-first search for the node with `id`; first match wins.
    #[must_use]
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        let mut stack: Vec<&Node> = self.roots.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if node.id() == id {
                return Some(node);
            }
            stack.extend(node.children().iter().rev());
        }
        None
    }

    /// Whether a node with `id` exists anywhere in the forest.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.find(id).is_some()
    }

    /// Size of the subtree rooted at `id`, or 0 when absent.
    #[must_use]
    pub fn subtree_size(&self, id: NodeId) -> usize {
        self.find(id).map_or(0, Node::subtree_size)
    }

    /// Commit a move: capture the subtree at `id`, remove it, and re-insert
    /// it at `position`: the remove-then-insert sequence callers would
    /// otherwise compose by hand, done in one step.
    ///
    /// Identity when `id` is absent, and when the destination anchor lies
    /// inside the moved subtree: after removal such an anchor would no
    /// longer resolve and the subtree would silently vanish, and the
    /// algebra never loses nodes.
    #[must_use]
    pub fn reparent(&self, id: NodeId, position: TreePosition) -> Self {
        let Some(subtree) = self.find(id) else {
            return self.clone();
        };
        let anchor = match position {
            TreePosition::After(sibling) => Some(sibling),
            TreePosition::FirstChildOf(parent) => parent,
        };
        if let Some(anchor) = anchor
            && (anchor == id || subtree_contains(subtree, anchor))
        {
            return self.clone();
        }
        let subtree = subtree.clone();
        self.remove(id).insert_at(subtree, position)
    }
}

impl FromIterator<Node> for Forest {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self {
            roots: iter.into_iter().collect(),
        }
    }
}

fn node_at_path_mut<'a>(roots: &'a mut [Node], path: &[usize]) -> Option<&'a mut Node> {
    let (first, rest) = path.split_first()?;
    let mut current = roots.get_mut(*first)?;
    for &index in rest {
        current = current.children.get_mut(index)?;
    }
    Some(current)
}

fn subtree_contains(root: &Node, id: NodeId) -> bool {
    let mut stack: Vec<&Node> = root.children().iter().collect();
    while let Some(node) = stack.pop() {
        if node.id() == id {
            return true;
        }
        stack.extend(node.children().iter());
    }
    false
}
