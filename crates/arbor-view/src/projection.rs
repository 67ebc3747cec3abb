//! Drag projection: where a dragged row would land if released.
//!
//! The projector consumes the filtered row sequence plus live drag geometry
//! (hover row, horizontal offset) and derives a target depth and a
//! structural landing spot. It is pure and runs once per input event; the
//! caller re-invokes it with the latest geometry and commits the returned
//! position through the forest algebra on release.

use std::fmt;

use arbor_forest::{NodeId, TreePosition};

use crate::flatten::FlatItem;

#[cfg(feature = "tracing")]
use web_time::Instant;

/// Result of projecting an in-progress drag onto a row sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropProjection {
    /// Target depth after clamping into the legal band.
    pub depth: usize,
    /// Shallowest legal depth, set by the row below the landing slot.
    pub min_depth: usize,
    /// Deepest legal depth, one below the row above the landing slot.
    pub max_depth: usize,
    /// Releasing here would leave the forest unchanged.
    pub no_op: bool,
    /// Id of the row that would own the dropped subtree, `None` at the root.
    pub parent_id: Option<NodeId>,
    /// Structural landing spot to feed the editing algebra on release.
    pub destination: TreePosition,
}

/// Why a projection could not be computed.
///
/// These are caller bugs, not recoverable conditions: the inputs violate
/// the documented preconditions, and a silently nonsensical projection
/// would be worse than a loud error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionError {
    /// The dragged row does not occur in the sequence.
    MissingActive { id: NodeId },
    /// The hovered row does not occur in the sequence.
    MissingOver { id: NodeId },
    /// The indentation unit must be a positive distance.
    InvalidIndentWidth { width: f64 },
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingActive { id } => {
                write!(f, "dragged row {} not in sequence", id.get())
            }
            Self::MissingOver { id } => {
                write!(f, "hovered row {} not in sequence", id.get())
            }
            Self::InvalidIndentWidth { width } => {
                write!(f, "indentation width {width} is not positive")
            }
        }
    }
}

impl std::error::Error for ProjectionError {}

/// Compute where the row `active_id` would land if released while hovering
/// `over_id`, displaced `horizontal_offset` units from where the drag
/// started, with `indent_width` units per depth level.
///
/// `items` must be the filtered sequence the drag is happening over
/// (collapsed subtrees and the active row's children hidden, see
/// [`visible_items`](crate::visible_items)) and must contain both ids.
///
/// The projected depth is the active row's depth shifted by
/// `round(horizontal_offset / indent_width)` (ties round away from zero),
/// then clamped so the row lands no deeper than "child of the row above the
/// slot" and no shallower than "sibling of the row below it". That band is
/// exactly what keeps the linear sequence representable as a forest after
/// the move commits. The nearest earlier row at or above the clamped depth
/// anchors the destination: equal depth makes it a sibling, shallower makes
/// it the parent, and no such row lands the drop at the forest root.
pub fn project(
    items: &[FlatItem<'_>],
    active_id: NodeId,
    over_id: NodeId,
    horizontal_offset: f64,
    indent_width: f64,
) -> Result<DropProjection, ProjectionError> {
    #[cfg(feature = "tracing")]
    let started = Instant::now();

    if !(indent_width > 0.0) {
        return Err(ProjectionError::InvalidIndentWidth {
            width: indent_width,
        });
    }
    let active_index = items
        .iter()
        .position(|item| item.id() == active_id)
        .ok_or(ProjectionError::MissingActive { id: active_id })?;
    let over_index = items
        .iter()
        .position(|item| item.id() == over_id)
        .ok_or(ProjectionError::MissingOver { id: over_id })?;
    let active_depth = items[active_index].depth();

    // Virtually move the active row to the hover slot; every other row
    // keeps its relative order. Pure projection, never applied to state.
    let mut rows = items.to_vec();
    let active = rows.remove(active_index);
    rows.insert(over_index, active);

    let previous = over_index.checked_sub(1).and_then(|index| rows.get(index));
    let next = rows.get(over_index + 1);

    let max_depth = previous.map_or(0, |row| row.depth() + 1);
    let min_depth = next.map_or(0, FlatItem::depth);

    let shift = (horizontal_offset / indent_width).round() as i64;
    let projected = active_depth as i64 + shift;
    let depth = projected.min(max_depth as i64).max(min_depth as i64) as usize;

    let no_op = over_id == active_id && depth == active_depth;

    let predecessor = rows[..over_index]
        .iter()
        .rev()
        .find(|row| row.depth() <= depth);
    let destination = match predecessor {
        None => TreePosition::FirstChildOf(None),
        Some(row) if row.depth() < depth => TreePosition::FirstChildOf(Some(row.id())),
        Some(row) => TreePosition::After(row.id()),
    };
    let parent_id = if depth == 0 {
        None
    } else {
        rows[..over_index]
            .iter()
            .rev()
            .find(|row| row.depth() + 1 == depth)
            .map(FlatItem::id)
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        message = "projection.compute",
        rows = items.len(),
        depth,
        min_depth,
        max_depth,
        no_op,
        duration_us = started.elapsed().as_micros() as u64,
    );

    Ok(DropProjection {
        depth,
        min_depth,
        max_depth,
        no_op,
        parent_id,
        destination,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::visible_items;
    use arbor_forest::{Forest, Node};

    fn id(raw: u64) -> NodeId {
        NodeId::new(raw)
    }

    /// `[Home, Collections [Spring, Summer], About]`
    fn catalog() -> Forest {
        Forest::from_roots(vec![
            Node::new(1, "Home"),
            Node::new(2, "Collections")
                .child(Node::new(3, "Spring"))
                .child(Node::new(4, "Summer")),
            Node::new(5, "About"),
        ])
    }

    #[test]
    fn missing_rows_fail_loudly() {
        let forest = catalog();
        let items = visible_items(&forest, Some(id(3)));
        assert_eq!(
            project(&items, id(99), id(5), 0.0, 50.0),
            Err(ProjectionError::MissingActive { id: id(99) })
        );
        assert_eq!(
            project(&items, id(3), id(99), 0.0, 50.0),
            Err(ProjectionError::MissingOver { id: id(99) })
        );
    }

    #[test]
    fn non_positive_indent_width_fails_loudly() {
        let forest = catalog();
        let items = visible_items(&forest, Some(id(3)));
        for width in [0.0, -16.0] {
            assert_eq!(
                project(&items, id(3), id(5), 0.0, width),
                Err(ProjectionError::InvalidIndentWidth { width })
            );
        }
    }

    #[test]
    fn hovering_own_row_at_own_depth_is_no_op() {
        let forest = catalog();
        let items = visible_items(&forest, Some(id(3)));
        let projection = project(&items, id(3), id(3), 0.0, 50.0).expect("projection");
        assert!(projection.no_op);
        assert_eq!(projection.depth, 1);
    }

    #[test]
    fn hovering_own_row_at_other_depth_still_projects() {
        let forest = catalog();
        let items = visible_items(&forest, Some(id(4)));
        // Summer dragged one unit left while staying on its own row.
        let projection = project(&items, id(4), id(4), -50.0, 50.0).expect("projection");
        assert!(!projection.no_op);
        assert_eq!(projection.depth, 0);
        assert_eq!(projection.destination, TreePosition::After(id(2)));
        assert_eq!(projection.parent_id, None);
    }

    #[test]
    fn dragging_below_shallower_row_keeps_indentation() {
        let forest = catalog();
        let items = visible_items(&forest, Some(id(3)));
        // Spring hovers About with no horizontal displacement: the row keeps
        // its depth-1 indentation, so it nests under About.
        let projection = project(&items, id(3), id(5), 0.0, 50.0).expect("projection");
        assert_eq!((projection.min_depth, projection.max_depth), (0, 1));
        assert_eq!(projection.depth, 1);
        assert_eq!(projection.destination, TreePosition::FirstChildOf(Some(id(5))));
        assert_eq!(projection.parent_id, Some(id(5)));
        assert!(!projection.no_op);
    }

    #[test]
    fn dragging_left_escapes_to_root_level() {
        let forest = catalog();
        let items = visible_items(&forest, Some(id(3)));
        let projection = project(&items, id(3), id(5), -50.0, 50.0).expect("projection");
        assert_eq!(projection.depth, 0);
        assert_eq!(projection.destination, TreePosition::After(id(5)));
        assert_eq!(projection.parent_id, None);
    }

    #[test]
    fn dragging_onto_first_row_lands_at_forest_root() {
        let forest = catalog();
        let items = visible_items(&forest, Some(id(5)));
        let projection = project(&items, id(5), id(1), 0.0, 50.0).expect("projection");
        assert_eq!(projection.depth, 0);
        assert_eq!(projection.destination, TreePosition::FirstChildOf(None));
        assert_eq!(projection.parent_id, None);
    }

    #[test]
    fn depth_clamps_to_child_of_row_above() {
        let forest = catalog();
        let items = visible_items(&forest, Some(id(1)));
        // An absurd rightward displacement cannot push deeper than "child of
        // the row above the slot".
        let projection = project(&items, id(1), id(4), 1e6, 50.0).expect("projection");
        assert_eq!(projection.depth, projection.max_depth);
        assert_eq!(projection.depth, 2);
        assert_eq!(projection.destination, TreePosition::FirstChildOf(Some(id(4))));
    }

    #[test]
    fn depth_clamps_to_sibling_of_row_below() {
        let forest = catalog();
        let items = visible_items(&forest, Some(id(3)));
        // Dragging far left between two depth-1 rows still cannot go
        // shallower than the row below.
        let projection = project(&items, id(3), id(3), -1e6, 50.0).expect("projection");
        assert_eq!(projection.depth, projection.min_depth);
        assert_eq!(projection.depth, 1);
    }

    #[test]
    fn half_unit_offsets_round_away_from_zero() {
        let forest = catalog();
        let items = visible_items(&forest, Some(id(4)));
        // Summer over itself: Spring above allows depth 2, About below
        // allows depth 0, so the band is [0, 2] and rounding decides.
        let exactly_half = project(&items, id(4), id(4), 25.0, 50.0).expect("projection");
        assert_eq!(exactly_half.depth, 2);
        assert_eq!(exactly_half.destination, TreePosition::FirstChildOf(Some(id(3))));
        let negative_half = project(&items, id(4), id(4), -25.0, 50.0).expect("projection");
        assert_eq!(negative_half.depth, 0);
        let just_under = project(&items, id(4), id(4), 24.9, 50.0).expect("projection");
        assert_eq!(just_under.depth, 1);
        assert!(just_under.no_op);
    }

    #[test]
    fn single_row_sequence_projects_onto_root() {
        let forest = Forest::from_roots(vec![Node::new(1, "only")]);
        let items = visible_items(&forest, Some(id(1)));
        let projection = project(&items, id(1), id(1), 500.0, 50.0).expect("projection");
        assert!(projection.no_op);
        assert_eq!((projection.min_depth, projection.max_depth), (0, 0));
        assert_eq!(projection.destination, TreePosition::FirstChildOf(None));
    }

    #[test]
    fn sibling_destination_resolves_shared_parent() {
        let forest = Forest::from_roots(vec![Node::new(1, "A")
            .child(Node::new(2, "B").child(Node::new(3, "C")))
            .child(Node::new(4, "D"))]);
        let items = visible_items(&forest, Some(id(3)));
        // C dragged onto D, one unit right of root depth: sibling of B.
        let projection = project(&items, id(3), id(4), 0.0, 50.0).expect("projection");
        assert_eq!(projection.depth, 2);
        assert_eq!(projection.destination, TreePosition::FirstChildOf(Some(id(4))));
        // And one unit left: sibling of D under A.
        let projection = project(&items, id(3), id(4), -50.0, 50.0).expect("projection");
        assert_eq!(projection.depth, 1);
        assert_eq!(projection.destination, TreePosition::After(id(4)));
        assert_eq!(projection.parent_id, Some(id(1)));
    }
}
