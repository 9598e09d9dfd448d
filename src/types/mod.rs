//! Data types shared across the page builder.

mod block;
mod geometry;
mod snapshot;

pub use block::*;
pub use geometry::*;
pub use snapshot::*;
