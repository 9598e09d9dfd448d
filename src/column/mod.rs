//! Column layout engine.
//!
//! Operates on a column group (a block whose children are columns) and
//! handles:
//! - Reading column widths from the store and neighbour lookups
//! - Finding donor columns that can give up width
//! - Resizing a column while keeping the group total constant
//! - Drop zones for inserting new columns
//! - Handle positions for every grid width during a drag
//! - Creating new columns through a block factory
//! - Duplicating and removing columns without changing the group total

mod create;
mod drop;
mod query;
mod resize;
mod shrink;
mod structure;
mod widths;

pub use create::{
    column_config, column_data, create_column, drop_donor, drop_new_column, insert_column,
    place_dropped_column,
};
pub use drop::{calculate_drop_positions, drop_position_at, DropPosition, Placement};
pub use query::{
    adjacent_column, column_index_in_group, column_width, columns_width, update_column_width,
    Direction, WIDTH_KEY,
};
pub use resize::{resize_column, ResizeOutcome};
pub use shrink::{can_shrink, find_shrinkable_column, find_shrinkable_column_for_resize};
pub use structure::{duplicate_column, remove_column};
pub use widths::{determine_column_widths, nearest_column_width, ColumnWidth, ForColumn};
