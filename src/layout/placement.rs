use super::LayoutConfig;
use crate::sequence::{Branch, Position};

/// Where a newly added node appears before any full layout pass.
///
/// `parent` is the parent's current position, its depth and the branch the new
/// node hangs off. Roots go to the origin. A child goes one row below its
/// parent, in the column the layout pass would give it.
pub fn initial_position(
    config: &LayoutConfig,
    parent: Option<(Position, usize, Branch)>,
) -> Position {
    match parent {
        None => Position::new(config.origin_x, config.origin_y),
        Some((parent_position, parent_depth, branch)) => Position::new(
            config.column(parent_depth + 1, Some(branch)),
            parent_position.y + config.row_height,
        ),
    }
}
