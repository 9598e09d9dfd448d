//! Creating new columns inside a group.

use crate::config::ContentTypeConfig;
use crate::error::{BuilderError, Result};
use crate::factory::BlockFactory;
use crate::grid::{accepted_column_width, format_width, smallest_column_width};
use crate::stage::{BlockSeed, Record, Stage};
use crate::types::{BlockId, COLUMN};

use super::drop::DropPosition;
use super::query::{column_width, update_column_width, WIDTH_KEY};
use super::shrink::{can_shrink, find_shrinkable_column};

/// Config of the column content type, checking `group` exists first.
pub fn column_config(stage: &Stage, group: BlockId) -> Result<&ContentTypeConfig> {
    if !stage.tree.contains(group) {
        return Err(BuilderError::UnknownBlock(group));
    }
    stage.config().get(COLUMN)
}

/// Initial record data of a column with the given width.
pub fn column_data(width: f64) -> Record {
    let mut data = Record::new();
    data.insert(WIDTH_KEY.to_string(), format_width(width).into());
    data
}

/// Place a constructed column into its group.
pub fn insert_column(
    stage: &mut Stage,
    group: BlockId,
    seed: BlockSeed,
    index: Option<usize>,
) -> Result<BlockId> {
    if seed.content_type != COLUMN {
        return Err(BuilderError::Factory(format!(
            "expected a {COLUMN} block, got {}",
            seed.content_type
        )));
    }
    stage.insert_block(seed, group, index)
}

/// Create a column and add it to its group.
///
/// The group is left untouched if construction fails.
pub async fn create_column<F>(
    stage: &mut Stage,
    factory: &F,
    group: BlockId,
    width: f64,
    index: Option<usize>,
) -> Result<BlockId>
where
    F: BlockFactory + ?Sized,
{
    let config = column_config(stage, group)?.clone();
    let seed = factory
        .create_block(&config, group, column_data(width))
        .await
        .inspect_err(|e| tracing::warn!(%group, error = %e, "column construction failed"))?;
    insert_column(stage, group, seed, index)
}

/// Column that gives up one grid unit when a new column is dropped.
///
/// The column under the drop zone is preferred; otherwise the nearest
/// shrinkable column of the group.
pub fn drop_donor(stage: &Stage, group: BlockId, position: &DropPosition) -> Result<BlockId> {
    let affected = position.affected_column;
    if stage.tree.parent(affected) != Some(group) {
        return Err(BuilderError::NotAColumn(affected));
    }
    if can_shrink(stage, affected) {
        return Ok(affected);
    }
    find_shrinkable_column(stage, affected).ok_or(BuilderError::GroupFull(group))
}

/// Place a constructed column at a drop zone, taking its width from the donor.
pub fn place_dropped_column(
    stage: &mut Stage,
    group: BlockId,
    seed: BlockSeed,
    position: &DropPosition,
) -> Result<BlockId> {
    let donor = drop_donor(stage, group, position)?;
    let requested = column_width(stage, donor) - smallest_column_width();
    let donor_width = accepted_column_width(requested);
    if donor_width == 0.0 {
        return Err(BuilderError::SnapFailed(requested));
    }

    let id = insert_column(stage, group, seed, Some(position.insert_index))?;
    update_column_width(stage, donor, donor_width);
    tracing::debug!(%group, column = %id, %donor, "column dropped");
    Ok(id)
}

/// Create a one-unit column at a drop zone.
///
/// Fails with [`BuilderError::GroupFull`] before anything is constructed
/// when no column can make room.
pub async fn drop_new_column<F>(
    stage: &mut Stage,
    factory: &F,
    group: BlockId,
    position: &DropPosition,
) -> Result<BlockId>
where
    F: BlockFactory + ?Sized,
{
    drop_donor(stage, group, position)?;
    let config = column_config(stage, group)?.clone();
    let seed = factory
        .create_block(&config, group, column_data(smallest_column_width()))
        .await?;
    place_dropped_column(stage, group, seed, position)
}
