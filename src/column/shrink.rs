//! Locating columns that can give up width.

use super::query::{column_index_in_group, column_width, Direction};
use crate::grid::smallest_column_width;
use crate::search::outward_search;
use crate::stage::Stage;
use crate::types::BlockId;

/// A column can shrink while it is wider than one grid unit.
pub fn can_shrink(stage: &Stage, column: BlockId) -> bool {
    column_width(stage, column) > smallest_column_width()
}

/// Find a column which can be shrunk for the current resize action.
///
/// Only columns on the given side are considered, nearest first.
pub fn find_shrinkable_column_for_resize(
    stage: &Stage,
    column: BlockId,
    direction: Direction,
) -> Option<BlockId> {
    let group = stage.tree.parent(column)?;
    let siblings = stage.tree.children(group);
    let index = column_index_in_group(stage, column)?;

    match direction {
        Direction::Right => siblings
            .get(index + 1..)?
            .iter()
            .copied()
            .find(|&c| can_shrink(stage, c)),
        Direction::Left => siblings
            .get(..index)?
            .iter()
            .rev()
            .copied()
            .find(|&c| can_shrink(stage, c)),
    }
}

/// Find the nearest shrinkable column on either side.
pub fn find_shrinkable_column(stage: &Stage, column: BlockId) -> Option<BlockId> {
    let group = stage.tree.parent(column)?;
    let siblings = stage.tree.children(group);
    let index = column_index_in_group(stage, column)?;

    outward_search(siblings, index, |&c| can_shrink(stage, c)).and_then(|i| siblings.get(i).copied())
}
