//! Applying a width change to a column and its donor.

use super::query::{column_width, update_column_width};
use crate::error::{BuilderError, Result};
use crate::grid::{accepted_column_width, round_delta};
use crate::stage::Stage;
use crate::types::BlockId;

/// Result of a [`resize_column`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeOutcome {
    /// The column already had the requested width; nothing was written.
    Unchanged,
    /// The column was resized; `delta` is the width it gained (negative when it shrank).
    Resized { delta: f64 },
}

/// Resize a column to a specific width.
///
/// The target is snapped onto the grid first and the shrinkable column, when
/// given, absorbs the change so the group total stays the same. If either
/// width would not land on the grid, nothing is written and
/// [`BuilderError::SnapFailed`] is returned.
pub fn resize_column(
    stage: &mut Stage,
    column: BlockId,
    width: f64,
    shrinkable: Option<BlockId>,
) -> Result<ResizeOutcome> {
    if !stage.tree.contains(column) {
        return Err(BuilderError::UnknownBlock(column));
    }
    let target = accepted_column_width(width);
    if target == 0.0 {
        tracing::warn!(%column, width, "resize aborted, target width off grid");
        return Err(BuilderError::SnapFailed(width));
    }
    let current = column_width(stage, column);
    let delta = round_delta(target - current);

    // Unchanged width: no store write, so subscribers are not re-run.
    if delta == 0.0 {
        return Ok(ResizeOutcome::Unchanged);
    }

    let donor = match shrinkable {
        Some(donor) if donor == column => {
            return Err(BuilderError::Other(format!(
                "column {column} cannot absorb its own resize"
            )));
        }
        Some(donor) => {
            if !stage.tree.contains(donor) {
                return Err(BuilderError::UnknownBlock(donor));
            }
            let requested = column_width(stage, donor) - delta;
            let accepted = accepted_column_width(requested);
            if accepted == 0.0 {
                tracing::warn!(%column, %donor, requested, "resize aborted, donor width off grid");
                return Err(BuilderError::SnapFailed(requested));
            }
            Some((donor, accepted))
        }
        None => None,
    };

    tracing::debug!(%column, from = current, to = target, "resize column");
    update_column_width(stage, column, target);
    if let Some((donor, donor_width)) = donor {
        update_column_width(stage, donor, donor_width);
    }
    Ok(ResizeOutcome::Resized { delta })
}
