//! Block construction.
//!
//! Building a block may need deferred work (templates, remote config), so
//! factories are async. A factory only produces a [`BlockSeed`]; placing it
//! on the stage is the caller's job, which keeps failed constructions from
//! touching the tree.

use async_trait::async_trait;

use crate::config::ContentTypeConfig;
use crate::error::Result;
use crate::stage::{BlockSeed, Record};
use crate::types::BlockId;

#[async_trait(?Send)]
pub trait BlockFactory {
    /// Build a block of the configured content type destined for `parent`.
    async fn create_block(
        &self,
        config: &ContentTypeConfig,
        parent: BlockId,
        initial_data: Record,
    ) -> Result<BlockSeed>;
}

/// Factory filling new blocks from the content type's field defaults.
#[derive(Debug, Clone, Default)]
pub struct DefaultBlockFactory {
    extra: Record,
}

impl DefaultBlockFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data merged over the defaults of every block this factory builds.
    pub fn with_data(extra: Record) -> Self {
        Self { extra }
    }
}

#[async_trait(?Send)]
impl BlockFactory for DefaultBlockFactory {
    async fn create_block(
        &self,
        config: &ContentTypeConfig,
        parent: BlockId,
        initial_data: Record,
    ) -> Result<BlockSeed> {
        let mut data = config.fields.clone();
        data.extend(self.extra.clone());
        data.extend(initial_data);
        tracing::trace!(content_type = %config.name, %parent, "block constructed");
        Ok(BlockSeed {
            content_type: config.name.clone(),
            data,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::ConfigRegistry;
    use crate::types::COLUMN;
    use serde_json::Value;

    #[test]
    fn test_initial_data_overrides_defaults() {
        let configs = ConfigRegistry::builtin();
        let mut initial = Record::new();
        initial.insert("width".into(), Value::from("50%"));
        let mut extra = Record::new();
        extra.insert("width".into(), Value::from("25%"));
        extra.insert("css_classes".into(), Value::from("wide"));

        let factory = DefaultBlockFactory::with_data(extra);
        let seed = futures::executor::block_on(factory.create_block(
            configs.get(COLUMN).unwrap(),
            BlockId(1),
            initial,
        ))
        .unwrap();

        assert_eq!(seed.content_type, COLUMN);
        assert_eq!(seed.data["width"], Value::from("50%"));
        assert_eq!(seed.data["css_classes"], Value::from("wide"));
        assert_eq!(seed.data["role"], Value::from(COLUMN));
    }
}
