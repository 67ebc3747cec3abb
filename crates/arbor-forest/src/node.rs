//! Node identity and the n-ary tree node type.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier for forest nodes.
///
/// Opaque to the engine: callers mint ids and keep them unique across the
/// whole forest. Uniqueness is a caller convention; the algebra searches by
/// id and never deduplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(u64);

impl NodeId {
    /// Wrap a raw id value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// A labeled node in the forest.
///
/// A node owns its children exclusively: no node appears under two parents
/// and no node is its own descendant. Sibling order is significant and is
/// preserved by every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    id: NodeId,
    label: String,
    /// Whether this node's children are hidden from flattened views
    /// (crate-visible for the field-update operations).
    pub(crate) collapsed: bool,
    /// Child nodes (crate-visible for the editing algebra).
    pub(crate) children: Vec<Node>,
}

impl Node {
    /// Create a new leaf node with the given id and label.
    #[must_use]
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            collapsed: false,
            children: Vec::new(),
        }
    }

    /// Add a child node.
    #[must_use]
    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    /// Set children from a vec.
    #[must_use]
    pub fn with_children(mut self, nodes: Vec<Node>) -> Self {
        self.children = nodes;
        self
    }

    /// Set whether this node's children are hidden from flattened views.
    #[must_use]
    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Get the id.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the children.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Whether this node has any children.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether this node's children are hidden from flattened views.
    ///
    /// The children still exist in the forest; collapsing only affects what
    /// row views show and where a dropped child lands.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub(crate) fn set_label(&mut self, label: String) {
        self.label = label;
    }

    /// Count of this node plus all of its descendants.
    #[must_use]
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_basics() {
        let node = Node::new(1, "hello");
        assert_eq!(node.id(), NodeId::new(1));
        assert_eq!(node.label(), "hello");
        assert!(node.children().is_empty());
        assert!(!node.has_children());
        assert!(!node.is_collapsed());
    }

    #[test]
    fn node_id_round_trip() {
        let id = NodeId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(NodeId::from(42u64), id);
    }

    #[test]
    fn builder_children_preserve_order() {
        let node = Node::new(1, "root")
            .child(Node::new(2, "a"))
            .child(Node::new(3, "b"));
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.children()[0].id(), NodeId::new(2));
        assert_eq!(node.children()[1].id(), NodeId::new(3));
    }

    #[test]
    fn with_children_replaces() {
        let node = Node::new(1, "root")
            .child(Node::new(2, "a"))
            .with_children(vec![Node::new(3, "b")]);
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].id(), NodeId::new(3));
    }

    #[test]
    fn with_collapsed_sets_flag() {
        let node = Node::new(1, "root").with_collapsed(true);
        assert!(node.is_collapsed());
    }

    #[test]
    fn subtree_size_counts_self_and_descendants() {
        let node = Node::new(1, "root")
            .child(Node::new(2, "a").child(Node::new(3, "a1")).child(Node::new(4, "a2")))
            .child(Node::new(5, "b"));
        assert_eq!(node.subtree_size(), 5);
        assert_eq!(node.children()[1].subtree_size(), 1);
    }

    #[test]
    fn subtree_size_survives_deep_chains() {
        let mut node = Node::new(0, "leaf");
        for id in 1..=4000u64 {
            node = Node::new(id, "level").child(node);
        }
        assert_eq!(node.subtree_size(), 4001);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn node_serde_round_trip() {
        let node = Node::new(1, "root")
            .with_collapsed(true)
            .child(Node::new(2, "a"));
        let json = serde_json::to_string(&node).expect("serialize");
        let back: Node = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, node);
    }
}
