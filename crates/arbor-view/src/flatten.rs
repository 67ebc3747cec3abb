//! Flattening a forest into a depth-annotated row sequence.
//!
//! A flattened sequence is the linear, visual top-to-bottom order of a
//! forest: one row per node, each annotated with its depth and a weak
//! back-reference to its parent. Rows borrow the forest and are rebuilt on
//! every call; they are read views, never durable state.

use ahash::AHashSet;
use arbor_forest::{Forest, Node, NodeId};

/// One row of a flattened forest.
///
/// The parent back-reference is identity only: resolve it against the same
/// sequence when needed, never treat it as an owning edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatItem<'a> {
    node: &'a Node,
    depth: usize,
    parent: Option<NodeId>,
}

impl<'a> FlatItem<'a> {
    /// The originating node.
    #[must_use]
    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// Node id.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    /// Depth in the forest: roots are 0, each child is its parent's depth
    /// plus one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Id of the parent row, `None` for roots.
    #[must_use]
    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Flatten `forest` into visual top-to-bottom order, pre-order, depth 0 at
/// the roots.
///
/// Children of collapsed nodes are included; hiding them is a separate
/// filtering concern, see [`visible_items`] and [`remove_subtrees_of`].
/// Each call is independent: an empty forest yields an empty sequence, and
/// depth of nesting only grows the explicit work stack.
#[must_use]
pub fn flatten(forest: &Forest) -> Vec<FlatItem<'_>> {
    let mut items = Vec::new();
    let mut stack: Vec<(&Node, usize, Option<NodeId>)> = forest
        .roots()
        .iter()
        .rev()
        .map(|node| (node, 0, None))
        .collect();
    while let Some((node, depth, parent)) = stack.pop() {
        items.push(FlatItem { node, depth, parent });
        for child in node.children().iter().rev() {
            stack.push((child, depth + 1, Some(node.id())));
        }
    }
    items
}

/// Drop every row whose id is in `excluded`, together with the contiguous
/// run of strictly deeper rows that follows it (its subtree, by depth
/// contiguity). Scanning resumes at the first row back at or above the
/// dropped row's depth.
///
/// Only the depth sequence is consulted; parent back-references are not
/// required, so this works on any well-formed flattened sequence.
#[must_use]
pub fn remove_subtrees_of<'a>(items: &[FlatItem<'a>], excluded: &[NodeId]) -> Vec<FlatItem<'a>> {
    let excluded: AHashSet<NodeId> = excluded.iter().copied().collect();
    let mut kept = Vec::with_capacity(items.len());
    let mut skip_below: Option<usize> = None;
    for item in items {
        if let Some(depth) = skip_below {
            if item.depth() > depth {
                continue;
            }
            skip_below = None;
        }
        if excluded.contains(&item.id()) {
            skip_below = Some(item.depth());
            continue;
        }
        kept.push(*item);
    }
    kept
}

/// The frame-ready sequence: a full flatten with the children of every
/// collapsed node hidden and, while a drag is active, the children of
/// `active` hidden as well, so the dragged subtree cannot become a drop
/// target for itself.
///
/// The collapsed and active rows themselves stay: a collapsed row is still
/// a visible drop target, and the projector requires the active row to be
/// present in the sequence it consumes.
#[must_use]
pub fn visible_items(forest: &Forest, active: Option<NodeId>) -> Vec<FlatItem<'_>> {
    let mut kept = Vec::new();
    let mut skip_below: Option<usize> = None;
    for item in flatten(forest) {
        if let Some(depth) = skip_below {
            if item.depth() > depth {
                continue;
            }
            skip_below = None;
        }
        if item.node().is_collapsed() || Some(item.id()) == active {
            skip_below = Some(item.depth());
        }
        kept.push(item);
    }
    kept
}
