use std::fmt;

use serde::{Deserialize, Serialize};

use super::ElementGeometry;

/// Content type of a column group container.
pub const COLUMN_GROUP: &str = "column-group";
/// Content type of a single column.
pub const COLUMN: &str = "column";
/// Content type of a row.
pub const ROW: &str = "row";
/// Content type of the slider widget.
pub const SLIDER: &str = "slider";
/// Content type of the root stage container.
pub const ROOT: &str = "root-container";

/// Identifier of a block on the stage, allocated by the stage tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u32);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A structural node on the stage.
///
/// The parent link is non-owning; ownership runs parent → children through
/// the arena in [`crate::stage::StructuralTree`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: BlockId,
    pub content_type: String,
    #[serde(default)]
    pub parent: Option<BlockId>,
    #[serde(default)]
    pub children: Vec<BlockId>,
    #[serde(default)]
    pub element: ElementGeometry,
}

impl Block {
    pub fn new(id: BlockId, content_type: impl Into<String>) -> Self {
        Self {
            id,
            content_type: content_type.into(),
            parent: None,
            children: Vec::new(),
            element: ElementGeometry::default(),
        }
    }

    pub fn is_column(&self) -> bool {
        self.content_type == COLUMN
    }

    pub fn is_column_group(&self) -> bool {
        self.content_type == COLUMN_GROUP
    }
}
