//! Interactive column resizing.
//!
//! A resize starts when a column's handle is grabbed: the handle positions
//! of every grid width are computed once, then each pointer move snaps to
//! the nearest one and moves the width between the column and a neighbour.

use crate::column::{
    adjacent_column, column_width, determine_column_widths, find_shrinkable_column_for_resize,
    nearest_column_width, resize_column, ColumnWidth, Direction, ForColumn, ResizeOutcome,
};
use crate::error::{BuilderError, Result};
use crate::stage::Stage;
use crate::types::BlockId;

/// State of one handle drag.
#[derive(Debug, Clone)]
pub struct ResizeSession {
    column: BlockId,
    widths: Vec<ColumnWidth>,
}

impl ResizeSession {
    /// Start resizing `column`, measuring against its group's geometry.
    pub fn begin(stage: &Stage, column: BlockId) -> Result<Self> {
        let block = stage
            .tree
            .get(column)
            .ok_or(BuilderError::UnknownBlock(column))?;
        if !block.is_column() {
            return Err(BuilderError::NotAColumn(column));
        }
        let group = block.parent.ok_or(BuilderError::NoParent(column))?;
        let group_element = stage
            .tree
            .geometry(group)
            .ok_or(BuilderError::UnknownBlock(group))?;
        let widths = determine_column_widths(stage, column, &group_element)?;
        tracing::debug!(%column, %group, handles = widths.len(), "resize started");
        Ok(Self { column, widths })
    }

    pub fn column(&self) -> BlockId {
        self.column
    }

    pub fn widths(&self) -> &[ColumnWidth] {
        &self.widths
    }

    /// Snap the handle to the grid width nearest `x` and apply it.
    ///
    /// Positions the neighbours cannot absorb leave the group unchanged.
    pub fn drag_to(&self, stage: &mut Stage, x: f64) -> Result<ResizeOutcome> {
        let Some(target) = nearest_column_width(&self.widths, x, ForColumn::Left) else {
            return Ok(ResizeOutcome::Unchanged);
        };
        match resize_with_neighbour(stage, self.column, target.width) {
            Err(BuilderError::SnapFailed(requested)) => {
                tracing::debug!(column = %self.column, requested, "handle position out of reach");
                Ok(ResizeOutcome::Unchanged)
            }
            other => other,
        }
    }
}

/// Resize a column, taking width from (or giving it to) the right-hand side.
///
/// Growing takes from the nearest shrinkable column to the right; shrinking
/// hands the width to the adjacent column. A single column donates, so a grow
/// larger than it can give fails with [`BuilderError::SnapFailed`].
pub fn resize_with_neighbour(stage: &mut Stage, column: BlockId, width: f64) -> Result<ResizeOutcome> {
    let current = column_width(stage, column);
    let donor = if width > current {
        find_shrinkable_column_for_resize(stage, column, Direction::Right)
    } else {
        adjacent_column(stage, column, Direction::Right)
    };
    let Some(donor) = donor else {
        tracing::debug!(%column, width, "no neighbour to resize against");
        return Ok(ResizeOutcome::Unchanged);
    };
    resize_column(stage, column, width, Some(donor))
}
