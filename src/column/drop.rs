//! Drop zones for inserting a new column into a group.

use serde::Serialize;

use super::shrink::can_shrink;
use crate::stage::Stage;
use crate::types::BlockId;

/// Which half of a column a drop zone covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
    Left,
    Right,
}

/// A horizontal pixel range that inserts a column at `insert_index` when
/// something is dropped inside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropPosition {
    pub left: f64,
    pub right: f64,
    pub insert_index: usize,
    pub placement: Placement,
    pub affected_column: BlockId,
    pub can_shrink: bool,
}

impl DropPosition {
    pub fn contains(&self, x: f64) -> bool {
        x >= self.left && x < self.right
    }
}

/// Calculate the drop positions of a column group.
///
/// Every column yields a left-half and a right-half zone, in column order.
pub fn calculate_drop_positions(stage: &Stage, group: BlockId) -> Vec<DropPosition> {
    let mut positions = Vec::with_capacity(stage.tree.children(group).len() * 2);
    for (index, &column) in stage.tree.children(group).iter().enumerate() {
        let element = stage.tree.geometry(column).unwrap_or_default();
        let left = element.position_left;
        let width = element.outer_width;
        let can_shrink = can_shrink(stage, column);

        positions.push(DropPosition {
            left,
            right: left + width / 2.0,
            insert_index: index,
            placement: Placement::Left,
            affected_column: column,
            can_shrink,
        });
        positions.push(DropPosition {
            left: left + width / 2.0,
            right: left + width,
            insert_index: index + 1,
            placement: Placement::Right,
            affected_column: column,
            can_shrink,
        });
    }
    positions
}

/// Find the drop zone under the cursor.
pub fn drop_position_at(positions: &[DropPosition], x: f64) -> Option<&DropPosition> {
    positions.iter().find(|p| p.contains(x))
}
