//! Duplicating and removing columns while keeping the group total.

use crate::error::{BuilderError, Result};
use crate::grid::{accepted_column_width, smallest_column_width};
use crate::stage::Stage;
use crate::types::BlockId;

use super::query::{adjacent_column, column_width, update_column_width, Direction};
use super::shrink::{can_shrink, find_shrinkable_column};

/// Duplicate a column as a one-unit copy placed right after it.
///
/// The column itself gives up the unit when it can, otherwise the nearest
/// shrinkable column does. Fails with [`BuilderError::GroupFull`] before
/// anything is copied when no column can make room.
pub fn duplicate_column(stage: &mut Stage, column: BlockId) -> Result<BlockId> {
    let group = stage.tree.parent(column).ok_or(BuilderError::NoParent(column))?;
    let donor = if can_shrink(stage, column) {
        column
    } else {
        find_shrinkable_column(stage, column).ok_or(BuilderError::GroupFull(group))?
    };
    let requested = column_width(stage, donor) - smallest_column_width();
    let donor_width = accepted_column_width(requested);
    if donor_width == 0.0 {
        return Err(BuilderError::SnapFailed(requested));
    }

    let copy = stage.duplicate_child(column)?;
    update_column_width(stage, copy, smallest_column_width());
    update_column_width(stage, donor, donor_width);
    tracing::debug!(%group, %column, %copy, %donor, "column duplicated");
    Ok(copy)
}

/// Remove a column, handing its width to a neighbour.
///
/// The left neighbour inherits the width, or the right one for the first
/// column. The last column of a group leaves it empty.
pub fn remove_column(stage: &mut Stage, column: BlockId) -> Result<Vec<BlockId>> {
    let heir = adjacent_column(stage, column, Direction::Left)
        .or_else(|| adjacent_column(stage, column, Direction::Right));
    let inherited = match heir {
        Some(heir) => {
            let requested = column_width(stage, heir) + column_width(stage, column);
            let width = accepted_column_width(requested);
            if width == 0.0 {
                return Err(BuilderError::SnapFailed(requested));
            }
            Some((heir, width))
        }
        None => None,
    };

    let removed = stage.remove_block(column)?;
    if let Some((heir, width)) = inherited {
        update_column_width(stage, heir, width);
    }
    Ok(removed)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;
    use crate::column::{column_data, columns_width};
    use crate::grid::grid_percentage;
    use crate::stage::{BlockSeed, Record};
    use crate::types::{COLUMN, COLUMN_GROUP};

    fn group_of(units: &[u32]) -> (Stage, BlockId, Vec<BlockId>) {
        let mut stage = Stage::default();
        let root = stage.root().unwrap();
        let group = stage
            .insert_block(
                BlockSeed {
                    content_type: COLUMN_GROUP.into(),
                    data: Record::new(),
                },
                root,
                None,
            )
            .unwrap();
        let columns = units
            .iter()
            .map(|&n| {
                stage
                    .insert_block(
                        BlockSeed {
                            content_type: COLUMN.into(),
                            data: column_data(grid_percentage(n)),
                        },
                        group,
                        None,
                    )
                    .unwrap()
            })
            .collect();
        (stage, group, columns)
    }

    #[test]
    fn test_duplicate_takes_unit_from_itself() {
        let (mut stage, group, columns) = group_of(&[3, 3]);
        let copy = duplicate_column(&mut stage, columns[0]).unwrap();

        assert_eq!(stage.tree.children(group), &[columns[0], copy, columns[1]]);
        assert_eq!(column_width(&stage, columns[0]), grid_percentage(2));
        assert_eq!(column_width(&stage, copy), grid_percentage(1));
        assert!((columns_width(&stage, group) - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_duplicate_minimal_column_borrows_from_neighbour() {
        let (mut stage, group, columns) = group_of(&[1, 5]);
        duplicate_column(&mut stage, columns[0]).unwrap();
        assert_eq!(column_width(&stage, columns[1]), grid_percentage(4));
        assert!((columns_width(&stage, group) - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_duplicate_in_full_group_fails() {
        let (mut stage, group, columns) = group_of(&[1, 1, 1, 1, 1, 1]);
        let before = stage.tree.len();
        assert!(matches!(
            duplicate_column(&mut stage, columns[2]),
            Err(BuilderError::GroupFull(g)) if g == group
        ));
        assert_eq!(stage.tree.len(), before);
    }

    #[test]
    fn test_remove_hands_width_to_neighbour() {
        let (mut stage, group, columns) = group_of(&[2, 1, 3]);
        remove_column(&mut stage, columns[1]).unwrap();
        assert_eq!(column_width(&stage, columns[0]), 50.0);

        remove_column(&mut stage, columns[0]).unwrap();
        assert_eq!(stage.tree.children(group), &[columns[2]]);
        assert_eq!(column_width(&stage, columns[2]), 100.0);

        remove_column(&mut stage, columns[2]).unwrap();
        assert!(stage.tree.children(group).is_empty());
    }
}
