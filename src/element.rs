//! Render block records into element styles and attributes.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use crate::config::PropertyMapping;
use crate::converter::{Converter, ConverterRegistry, ElementConverterPool};
use crate::error::{BuilderError, Result};
use crate::stage::Stage;
use crate::types::BlockId;

/// Record key selecting a block's appearance.
const APPEARANCE_KEY: &str = "appearance";

/// Styles and attributes of one rendered element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElementData {
    pub style: BTreeMap<String, String>,
    pub attributes: BTreeMap<String, String>,
}

/// Maps block data onto elements, caching one converter pool per
/// content type and appearance.
#[derive(Debug)]
pub struct ElementRenderer {
    converters: ConverterRegistry,
    pools: BTreeMap<(String, Option<String>), Rc<ElementConverterPool>>,
}

impl Default for ElementRenderer {
    fn default() -> Self {
        Self::new(ConverterRegistry::with_builtins())
    }
}

impl ElementRenderer {
    pub fn new(converters: ConverterRegistry) -> Self {
        Self {
            converters,
            pools: BTreeMap::new(),
        }
    }

    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    /// Compute the styles and attributes of `element` for a block.
    ///
    /// With `preview` set, preview converters are used where configured.
    pub fn element_data(
        &mut self,
        stage: &Stage,
        id: BlockId,
        element: &str,
        preview: bool,
    ) -> Result<ElementData> {
        let block = stage.tree.get(id).ok_or(BuilderError::UnknownBlock(id))?;
        let record = stage.store.get(id);
        let appearance = record
            .and_then(|r| r.get(APPEARANCE_KEY))
            .and_then(Value::as_str)
            .map(str::to_string);

        let config = stage.config().get(&block.content_type)?;
        let key = (block.content_type.clone(), appearance.clone());
        let pool = match self.pools.get(&key) {
            Some(pool) => Rc::clone(pool),
            None => {
                let pool = Rc::new(ElementConverterPool::build(
                    config,
                    appearance.as_deref(),
                    &self.converters,
                )?);
                self.pools.insert(key, Rc::clone(&pool));
                pool
            }
        };

        let mut data = ElementData::default();
        let Some(mapping) = config
            .appearance(appearance.as_deref())?
            .data_mapping
            .as_ref()
            .and_then(|m| m.elements.get(element))
        else {
            return Ok(data);
        };
        let Some(record) = record else {
            return Ok(data);
        };

        for property in &mapping.style {
            let converter = if preview {
                pool.style_preview_converter(&property.code())
            } else {
                pool.style_converter(&property.code())
            };
            if let Some(value) = property_value(record, property, converter) {
                data.style.insert(property.name.clone(), value);
            }
        }
        for property in &mapping.attributes {
            let converter = if preview {
                pool.attribute_preview_converter(&property.code())
            } else {
                pool.attribute_converter(&property.code())
            };
            if let Some(value) = property_value(record, property, converter) {
                data.attributes.insert(property.name.clone(), value);
            }
        }
        Ok(data)
    }
}

fn property_value(
    record: &crate::stage::Record,
    property: &PropertyMapping,
    converter: Option<&dyn Converter>,
) -> Option<String> {
    let source = if property.var.is_empty() {
        &property.name
    } else {
        &property.var
    };
    let value = record.get(source).filter(|v| !v.is_null())?;
    let rendered = match (converter, value) {
        (Some(converter), value) => converter.to_dom(value),
        (None, Value::String(s)) => s.clone(),
        (None, other) => other.to_string(),
    };
    (!rendered.is_empty()).then_some(rendered)
}
