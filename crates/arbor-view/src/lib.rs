#![forbid(unsafe_code)]

//! Depth-annotated row views and drag projection over `arbor-forest`
//! forests.
//!
//! The render layer consumes [`visible_items`] each frame. While a drag is
//! active, the input layer feeds the latest hover id and horizontal offset
//! to [`project`], and on release the caller commits the projected
//! destination through the forest algebra: remove, then insert, which
//! [`Forest::reparent`](arbor_forest::Forest::reparent) does in one step.
//!
//! # Example
//!
//! ```
//! use arbor_forest::{Forest, Node, NodeId};
//! use arbor_view::{project, visible_items};
//!
//! let forest = Forest::from_roots(vec![
//!     Node::new(1, "Home"),
//!     Node::new(2, "Collections")
//!         .child(Node::new(3, "Spring"))
//!         .child(Node::new(4, "Summer")),
//!     Node::new(5, "About"),
//! ]);
//!
//! // Drag "Spring" over "About" with no horizontal displacement.
//! let spring = NodeId::new(3);
//! let items = visible_items(&forest, Some(spring));
//! let projection = project(&items, spring, NodeId::new(5), 0.0, 50.0)?;
//! assert!(!projection.no_op);
//!
//! // Release: the committed forest nests Spring under About.
//! let committed = forest.reparent(spring, projection.destination);
//! assert_eq!(committed.roots()[2].children()[0].id(), spring);
//! # Ok::<(), arbor_view::ProjectionError>(())
//! ```

pub mod flatten;
pub mod projection;

pub use flatten::{FlatItem, flatten, remove_subtrees_of, visible_items};
pub use projection::{DropProjection, ProjectionError, project};
