use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Block, BlockId};

/// Serializable picture of a stage: its block tree plus the store records.
///
/// Used to hand a stage between JavaScript, the CLI and tests. The persisted
/// page format is owned by the host application, not by this type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageSnapshot {
    pub root: Option<BlockId>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub records: BTreeMap<BlockId, serde_json::Map<String, serde_json::Value>>,
}
