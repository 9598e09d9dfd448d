//! pagebuilder - column layout engine for a visual page builder
//!
//! Runs in the browser via WebAssembly and natively for tooling:
//! - Six-column grid with snapping of measured widths
//! - Column resizing that keeps every group at 100%
//! - Drop zones and handle positions for drag interactions
//! - Async column construction through pluggable block factories
//! - Content-type configuration with element converters
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { PageBuilder } from 'pagebuilder';
//! await init();
//! const builder = new PageBuilder();
//! builder.load(snapshotJson);
//! builder.begin_resize(columnId);
//! builder.drag_resize(event.pageX);
//! builder.end_resize();
//! ```

// Layout engine
pub mod column;
pub mod grid;
pub mod search;

// Stage model
pub mod config;
pub mod converter;
pub mod element;
pub mod error;
pub mod factory;
pub mod stage;
pub mod types;
pub mod widgets;

// Editor (WASM API)
pub mod editor;

use wasm_bindgen::prelude::*;

pub use editor::PageBuilder;
pub use error::{BuilderError, Result};

pub use types::*;

/// Snap a measured width percentage onto the column grid (0 when it does not snap).
#[must_use]
#[wasm_bindgen]
pub fn accepted_column_width(width: f64) -> f64 {
    grid::accepted_column_width(width)
}

/// Width of one grid unit, in percent.
#[must_use]
#[wasm_bindgen]
pub fn smallest_column_width() -> f64 {
    grid::smallest_column_width()
}

#[must_use]
#[wasm_bindgen]
pub fn max_columns() -> u32 {
    grid::max_columns()
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
