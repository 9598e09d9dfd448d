//! Read helpers over a column group.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::grid::{format_width, parse_width};
use crate::stage::Stage;
use crate::types::BlockId;

/// Record key holding a column's width.
pub const WIDTH_KEY: &str = "width";

/// Direction towards a neighbouring column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Left,
    Right,
}

/// Return the stored width of the column.
///
/// Reads the store, never the rendered element. A missing or unreadable
/// width reads as zero.
pub fn column_width(stage: &Stage, column: BlockId) -> f64 {
    stage
        .store
        .get(column)
        .and_then(|record| record.get(WIDTH_KEY))
        .and_then(width_value)
        .unwrap_or(0.0)
}

fn width_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_width(s),
        _ => None,
    }
}

/// Retrieve the index of the column within its group
pub fn column_index_in_group(stage: &Stage, column: BlockId) -> Option<usize> {
    stage.tree.index_of(column)
}

/// Retrieve the column directly left or right of `column`.
pub fn adjacent_column(stage: &Stage, column: BlockId, direction: Direction) -> Option<BlockId> {
    let group = stage.tree.parent(column)?;
    let index = column_index_in_group(stage, column)?;
    let target = match direction {
        Direction::Left => index.checked_sub(1)?,
        Direction::Right => index + 1,
    };
    stage.tree.children(group).get(target).copied()
}

/// Total width of all columns in the group
pub fn columns_width(stage: &Stage, group: BlockId) -> f64 {
    stage
        .tree
        .children(group)
        .iter()
        .map(|&column| column_width(stage, column))
        .sum()
}

/// Write a column's width to the store.
pub fn update_column_width(stage: &mut Stage, column: BlockId, width: f64) {
    stage.store.update_key(column, format_width(width), WIDTH_KEY);
}
