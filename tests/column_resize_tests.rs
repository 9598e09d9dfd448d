//! Column resize tests for pagebuilder
//!
//! Covers width lookups, donor searches and resizing against a donor.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod fixtures;

use fixtures::{units, GroupBuilder};
use pagebuilder::column::{
    adjacent_column, can_shrink, column_index_in_group, column_width, columns_width,
    find_shrinkable_column, find_shrinkable_column_for_resize, resize_column, update_column_width,
    Direction, ResizeOutcome,
};
use pagebuilder::error::BuilderError;
use pagebuilder::stage::{BlockSeed, Record};
use pagebuilder::types::{BlockId, COLUMN};
use serde_json::Value;

// ============================================================================
// Lookups
// ============================================================================

#[test]
fn test_column_width_reads_store() {
    let fixture = GroupBuilder::new().unit_columns(&[2, 4]).build();
    assert_eq!(column_width(&fixture.stage, fixture.column(0)), 33.33333333);
    assert_eq!(column_width(&fixture.stage, fixture.column(1)), 66.66666667);
    assert!((columns_width(&fixture.stage, fixture.group) - 100.0).abs() < 1e-6);
}

#[test]
fn test_missing_width_reads_as_zero() {
    let mut fixture = GroupBuilder::new().unit_columns(&[6]).build();
    let bare = fixture
        .stage
        .insert_block(
            BlockSeed {
                content_type: COLUMN.into(),
                data: Record::new(),
            },
            fixture.group,
            None,
        )
        .unwrap();
    assert_eq!(column_width(&fixture.stage, bare), 0.0);
    assert_eq!(column_width(&fixture.stage, BlockId(999)), 0.0);
}

#[test]
fn test_numeric_width_is_accepted() {
    let mut fixture = GroupBuilder::new().unit_columns(&[3, 3]).build();
    let column = fixture.column(0);
    fixture.stage.store.update_key(column, 50, "width");
    assert_eq!(column_width(&fixture.stage, column), 50.0);
}

#[test]
fn test_update_column_width_stores_percent_string() {
    let mut fixture = GroupBuilder::new().unit_columns(&[3, 3]).build();
    let column = fixture.column(1);
    update_column_width(&mut fixture.stage, column, units(2));
    let record = fixture.stage.store.get(column).unwrap();
    assert_eq!(record["width"], Value::from("33.33333333%"));
}

#[test]
fn test_adjacent_columns() {
    let fixture = GroupBuilder::new().unit_columns(&[2, 2, 2]).build();
    let stage = &fixture.stage;
    let (first, middle, last) = (fixture.column(0), fixture.column(1), fixture.column(2));

    assert_eq!(column_index_in_group(stage, middle), Some(1));
    assert_eq!(adjacent_column(stage, middle, Direction::Left), Some(first));
    assert_eq!(adjacent_column(stage, middle, Direction::Right), Some(last));
    assert_eq!(adjacent_column(stage, first, Direction::Left), None);
    assert_eq!(adjacent_column(stage, last, Direction::Right), None);
}

// ============================================================================
// Donor searches
// ============================================================================

#[test]
fn test_can_shrink_needs_more_than_one_unit() {
    let fixture = GroupBuilder::new().unit_columns(&[1, 5]).build();
    assert!(!can_shrink(&fixture.stage, fixture.column(0)));
    assert!(can_shrink(&fixture.stage, fixture.column(1)));
}

#[test]
fn test_last_column_has_no_right_donor() {
    let fixture = GroupBuilder::new().unit_columns(&[3, 3]).build();
    assert_eq!(
        find_shrinkable_column_for_resize(&fixture.stage, fixture.column(1), Direction::Right),
        None
    );
}

#[test]
fn test_resize_donor_skips_minimal_columns() {
    let fixture = GroupBuilder::new().unit_columns(&[2, 1, 1, 2]).build();
    let stage = &fixture.stage;
    assert_eq!(
        find_shrinkable_column_for_resize(stage, fixture.column(0), Direction::Right),
        Some(fixture.column(3))
    );
    assert_eq!(
        find_shrinkable_column_for_resize(stage, fixture.column(3), Direction::Left),
        Some(fixture.column(0))
    );
    assert_eq!(
        find_shrinkable_column_for_resize(stage, fixture.column(1), Direction::Left),
        Some(fixture.column(0))
    );
}

#[test]
fn test_shrinkable_search_prefers_nearest_then_left() {
    let fixture = GroupBuilder::new().unit_columns(&[2, 1, 1, 2]).build();
    let stage = &fixture.stage;
    // Distance one: left is checked first.
    assert_eq!(find_shrinkable_column(stage, fixture.column(1)), Some(fixture.column(0)));
    // Distance one: left is minimal, right is not.
    assert_eq!(find_shrinkable_column(stage, fixture.column(2)), Some(fixture.column(3)));
}

#[test]
fn test_full_group_has_no_shrinkable_column() {
    let fixture = GroupBuilder::new().unit_columns(&[1, 1, 1, 1, 1, 1]).build();
    for &column in &fixture.columns {
        assert_eq!(find_shrinkable_column(&fixture.stage, column), None);
    }
}

// ============================================================================
// Resizing
// ============================================================================

#[test]
fn test_repeated_resize_writes_once() {
    let mut fixture = GroupBuilder::new().unit_columns(&[3, 3]).build();
    let (left, right) = (fixture.column(0), fixture.column(1));
    let writes = fixture.watch_width(left);

    let first = resize_column(&mut fixture.stage, left, units(4), Some(right)).unwrap();
    assert!(matches!(first, ResizeOutcome::Resized { .. }));
    let second = resize_column(&mut fixture.stage, left, units(4), Some(right)).unwrap();
    assert_eq!(second, ResizeOutcome::Unchanged);

    assert_eq!(writes.borrow().as_slice(), &[Value::from("66.66666667%")]);
}

#[test]
fn test_resize_conserves_pair_width() {
    let mut fixture = GroupBuilder::new().unit_columns(&[3, 1, 2]).build();
    let (column, donor) = (fixture.column(0), fixture.column(1));
    let before = column_width(&fixture.stage, column) + column_width(&fixture.stage, donor);

    resize_column(&mut fixture.stage, column, units(2), Some(donor)).unwrap();

    assert_eq!(column_width(&fixture.stage, column), 33.33333333);
    assert_eq!(column_width(&fixture.stage, donor), 33.33333333);
    let after = column_width(&fixture.stage, column) + column_width(&fixture.stage, donor);
    assert!((before - after).abs() < 1e-6);
    assert!((columns_width(&fixture.stage, fixture.group) - 100.0).abs() < 1e-6);
}

#[test]
fn test_resize_reports_delta() {
    let mut fixture = GroupBuilder::new().unit_columns(&[3, 3]).build();
    let (left, right) = (fixture.column(0), fixture.column(1));
    let outcome = resize_column(&mut fixture.stage, left, units(2), Some(right)).unwrap();
    let ResizeOutcome::Resized { delta } = outcome else {
        panic!("expected a resize, got {outcome:?}");
    };
    assert_eq!(delta, -16.66666667);
    assert_eq!(column_width(&fixture.stage, fixture.column(1)), 66.66666667);
}

#[test]
fn test_resize_aborts_when_donor_cannot_snap() {
    let mut fixture = GroupBuilder::new().unit_columns(&[3, 3]).build();
    let (left, right) = (fixture.column(0), fixture.column(1));
    let writes = fixture.watch_width(left);

    let err = resize_column(&mut fixture.stage, left, 100.0, Some(right)).unwrap_err();
    assert!(matches!(err, BuilderError::SnapFailed(_)));
    assert_eq!(column_width(&fixture.stage, left), 50.0);
    assert_eq!(column_width(&fixture.stage, right), 50.0);
    assert!(writes.borrow().is_empty());
}

#[test]
fn test_resize_without_donor_only_touches_column() {
    let mut fixture = GroupBuilder::new().unit_columns(&[3, 3]).build();
    let left = fixture.column(0);
    resize_column(&mut fixture.stage, left, units(2), None).unwrap();
    assert_eq!(column_width(&fixture.stage, fixture.column(0)), 33.33333333);
    assert_eq!(column_width(&fixture.stage, fixture.column(1)), 50.0);
}

#[test]
fn test_resize_rejects_self_donor_and_unknown_blocks() {
    let mut fixture = GroupBuilder::new().unit_columns(&[3, 3]).build();
    let left = fixture.column(0);
    assert!(resize_column(&mut fixture.stage, left, units(2), Some(left)).is_err());
    assert!(matches!(
        resize_column(&mut fixture.stage, BlockId(999), units(2), None),
        Err(BuilderError::UnknownBlock(_))
    ));
    assert!(matches!(
        resize_column(&mut fixture.stage, left, units(2), Some(BlockId(999))),
        Err(BuilderError::UnknownBlock(_))
    ));
    assert_eq!(column_width(&fixture.stage, left), 50.0);
}

#[test]
fn test_resize_to_zero_width_is_rejected() {
    let mut fixture = GroupBuilder::new().unit_columns(&[3, 3]).build();
    let (left, right) = (fixture.column(0), fixture.column(1));
    let left_writes = fixture.watch_width(left);
    let right_writes = fixture.watch_width(right);

    let err = resize_column(&mut fixture.stage, left, 0.0, Some(right)).unwrap_err();
    assert!(matches!(err, BuilderError::SnapFailed(w) if w == 0.0));
    assert!(left_writes.borrow().is_empty());
    assert!(right_writes.borrow().is_empty());
    assert_eq!(columns_width(&fixture.stage, fixture.group), 100.0);
}

#[test]
fn test_resize_target_between_grid_values_is_rejected() {
    let mut fixture = GroupBuilder::new().unit_columns(&[3, 3]).build();
    let (left, right) = (fixture.column(0), fixture.column(1));
    let writes = fixture.watch_width(left);

    let err = resize_column(&mut fixture.stage, left, 40.0, Some(right)).unwrap_err();
    assert!(matches!(err, BuilderError::SnapFailed(_)));
    assert!(writes.borrow().is_empty());
    assert_eq!(column_width(&fixture.stage, left), 50.0);
    assert_eq!(columns_width(&fixture.stage, fixture.group), 100.0);
}

#[test]
fn test_resize_snaps_target_before_storing() {
    let mut fixture = GroupBuilder::new().unit_columns(&[3, 3]).build();
    let (left, right) = (fixture.column(0), fixture.column(1));
    let writes = fixture.watch_width(left);

    let outcome = resize_column(&mut fixture.stage, left, 33.4, Some(right)).unwrap();
    assert_eq!(outcome, ResizeOutcome::Resized { delta: -16.66666667 });
    assert_eq!(writes.borrow().as_slice(), &[Value::from("33.33333333%")]);
    assert_eq!(column_width(&fixture.stage, right), 66.66666667);
    assert!((columns_width(&fixture.stage, fixture.group) - 100.0).abs() < 1e-6);
}
