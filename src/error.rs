//! Structured error types for the page builder.

use crate::types::BlockId;

/// All errors that can occur while editing a stage.
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    /// The block is not present in the stage tree.
    #[error("Unknown block: {0}")]
    UnknownBlock(BlockId),

    /// The block exists but is not a column inside a column group.
    #[error("Block {0} is not a column")]
    NotAColumn(BlockId),

    /// The block has no parent to operate within.
    #[error("Block {0} has no parent")]
    NoParent(BlockId),

    /// A width table was requested for a column with no right-hand neighbour.
    #[error("Column {0} has no adjacent column")]
    NoAdjacentColumn(BlockId),

    /// No column in the group has width to spare for a new column.
    #[error("Column group {0} is full")]
    GroupFull(BlockId),

    /// A width did not snap onto the column grid.
    #[error("Width {0} does not snap to the column grid")]
    SnapFailed(f64),

    /// Invalid content-type configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A configuration references a converter that is not registered.
    #[error("Unknown converter: {0}")]
    UnknownConverter(String),

    /// The block factory failed to build a block.
    #[error("Block construction failed: {0}")]
    Factory(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BuilderError>;

impl From<String> for BuilderError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for BuilderError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<BuilderError> for wasm_bindgen::JsValue {
    fn from(e: BuilderError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
