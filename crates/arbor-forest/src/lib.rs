#![forbid(unsafe_code)]

//! Ordered forest model and immutable editing algebra.
//!
//! A [`Forest`] is an ordered sequence of labeled trees. It is edited through
//! pure operations (remove, insert, field updates) that leave the input
//! untouched and return a brand-new forest value, so a caller can hold one
//! authoritative forest and replace it wholesale after every edit.
//!
//! Row views and drag projection over a forest live in `arbor-view`.
//!
//! # Example
//!
//! ```
//! use arbor_forest::{Forest, Node, NodeId, TreePosition};
//!
//! let forest = Forest::from_roots(vec![
//!     Node::new(1, "home"),
//!     Node::new(2, "collections")
//!         .child(Node::new(3, "spring"))
//!         .child(Node::new(4, "summer")),
//! ]);
//!
//! // Move "spring" out of "collections", right after it at the root level.
//! let moved = forest.reparent(NodeId::new(3), TreePosition::After(NodeId::new(2)));
//!
//! assert_eq!(moved.roots()[2].id(), NodeId::new(3));
//! assert_eq!(moved.roots()[1].children().len(), 1);
//! // The original forest is untouched.
//! assert_eq!(forest.roots()[1].children().len(), 2);
//! ```

pub mod forest;
pub mod node;

pub use forest::{Forest, TreePosition};
pub use node::{Node, NodeId};
