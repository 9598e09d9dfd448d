use serde::Serialize;

use crate::types::BlockId;

/// Structural changes published by the stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StageEvent {
    /// A block was inserted under `parent` at `index`.
    #[serde(rename_all = "camelCase")]
    BlockAdded {
        parent: BlockId,
        block: BlockId,
        index: usize,
    },
    /// A block and its subtree were removed from `parent`.
    #[serde(rename_all = "camelCase")]
    BlockRemoved { parent: BlockId, block: BlockId },
    /// `duplicate` was inserted directly after `original`.
    #[serde(rename_all = "camelCase")]
    BlockDuplicated {
        original: BlockId,
        duplicate: BlockId,
    },
    /// The host UI should open the edit form of `block`.
    #[serde(rename_all = "camelCase")]
    EditRequested { block: BlockId },
}
