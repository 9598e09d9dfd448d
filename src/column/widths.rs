//! Pixel positions of every grid width during an interactive resize.

use serde::Serialize;

use super::query::{adjacent_column, Direction};
use crate::error::{BuilderError, Result};
use crate::grid::{max_columns, rounded_column_width};
use crate::stage::Stage;
use crate::types::{BlockId, ElementGeometry};

/// Which column of the resized pair a [`ColumnWidth`] entry applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ForColumn {
    Left,
    Right,
}

/// A grid width and the handle position that produces it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnWidth {
    /// Fraction label such as `"3/6"`
    pub name: String,
    /// Handle x position in document pixels
    pub position: f64,
    /// Resulting width percentage
    pub width: f64,
    pub for_column: ForColumn,
}

/// Determine the pixel position of every column width that can be created
/// within the group.
///
/// `Left` entries place the resized column's right edge relative to its own
/// left edge. `Right` entries are measured back from the right edge of the
/// adjacent column and are used when a non-adjacent column is being crushed.
pub fn determine_column_widths(
    stage: &Stage,
    column: BlockId,
    group_element: &ElementGeometry,
) -> Result<Vec<ColumnWidth>> {
    let max = max_columns();
    let single_column_width = group_element.outer_width / f64::from(max);

    let adjacent =
        adjacent_column(stage, column, Direction::Right).ok_or(BuilderError::NoAdjacentColumn(column))?;
    let column_element = stage
        .tree
        .geometry(column)
        .ok_or(BuilderError::UnknownBlock(column))?;
    let adjacent_element = stage
        .tree
        .geometry(adjacent)
        .ok_or(BuilderError::UnknownBlock(adjacent))?;

    let column_left = column_element.offset_left;
    let adjacent_right_position =
        group_element.offset_left + adjacent_element.offset_left + adjacent_element.outer_width;

    let mut widths = Vec::with_capacity(2 * max as usize);
    for i in (1..=max).rev() {
        widths.push(ColumnWidth {
            name: format!("{i}/{max}"),
            position: (column_left + single_column_width * f64::from(i)).round(),
            width: rounded_column_width(100.0 / f64::from(max) * f64::from(i)),
            for_column: ForColumn::Left,
        });
    }
    for i in 1..max {
        widths.push(ColumnWidth {
            name: format!("{i}/{max}"),
            position: (adjacent_right_position
                - f64::from(i + 1) * single_column_width
                - single_column_width)
                .round(),
            width: rounded_column_width(100.0 / f64::from(max) * f64::from(i)),
            for_column: ForColumn::Right,
        });
    }
    Ok(widths)
}

/// Entry of the given kind whose handle position is closest to `x`.
pub fn nearest_column_width(
    widths: &[ColumnWidth],
    x: f64,
    for_column: ForColumn,
) -> Option<&ColumnWidth> {
    widths
        .iter()
        .filter(|w| w.for_column == for_column)
        .min_by(|a, b| (a.position - x).abs().total_cmp(&(b.position - x).abs()))
}
