//! Block factory backed by a JavaScript loader.

use async_trait::async_trait;
use js_sys::{Function, Promise};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::config::ContentTypeConfig;
use crate::error::{BuilderError, Result};
use crate::factory::{BlockFactory, DefaultBlockFactory};
use crate::stage::{BlockSeed, Record};
use crate::types::BlockId;

/// Calls `loader(contentType, parentId, initialData)` and merges the object
/// it returns (or resolves to) into the new block's data. Initial data wins
/// over loader data.
pub(crate) struct JsBlockFactory {
    loader: Option<Function>,
}

impl JsBlockFactory {
    pub(crate) fn new(loader: Option<Function>) -> Self {
        Self { loader }
    }
}

fn factory_error(err: JsValue) -> BuilderError {
    BuilderError::Factory(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

#[async_trait(?Send)]
impl BlockFactory for JsBlockFactory {
    async fn create_block(
        &self,
        config: &ContentTypeConfig,
        parent: BlockId,
        initial_data: Record,
    ) -> Result<BlockSeed> {
        let Some(loader) = &self.loader else {
            return DefaultBlockFactory::new()
                .create_block(config, parent, initial_data)
                .await;
        };

        let data = super::bindings::to_js(&initial_data).map_err(factory_error)?;
        let returned = loader
            .call3(
                &JsValue::NULL,
                &JsValue::from_str(&config.name),
                &JsValue::from(parent.0),
                &data,
            )
            .map_err(factory_error)?;
        let resolved = JsFuture::from(Promise::resolve(&returned))
            .await
            .map_err(factory_error)?;

        let extra: Record = if resolved.is_undefined() || resolved.is_null() {
            Record::new()
        } else {
            serde_wasm_bindgen::from_value(resolved)
                .map_err(|e| BuilderError::Factory(e.to_string()))?
        };
        DefaultBlockFactory::with_data(extra)
            .create_block(config, parent, initial_data)
            .await
    }
}
