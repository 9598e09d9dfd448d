//! Element converters.
//!
//! A converter translates one block property between its stored form and the
//! string written onto a rendered element. Converters are registered once in
//! a [`ConverterRegistry`] and resolved per content type into an
//! [`ElementConverterPool`] when the type is first rendered.

mod builtin;

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

pub use builtin::{
    BooleanConverter, ColorConverter, HtmlEntitiesConverter, IntegerConverter, WidthConverter,
};

use crate::config::ContentTypeConfig;
use crate::error::{BuilderError, Result};

pub trait Converter: fmt::Debug {
    /// Convert a value read from an element into its stored form.
    fn from_dom(&self, value: &str) -> Value;

    /// Convert a stored value into the string written onto an element.
    fn to_dom(&self, value: &Value) -> String;
}

/// Converters known to the builder, keyed by the name configs refer to.
#[derive(Debug, Clone, Default)]
pub struct ConverterRegistry {
    converters: BTreeMap<String, Rc<dyn Converter>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("width", Rc::new(WidthConverter));
        registry.register("color", Rc::new(ColorConverter));
        registry.register("boolean", Rc::new(BooleanConverter));
        registry.register("integer", Rc::new(IntegerConverter));
        registry.register("html_entities", Rc::new(HtmlEntitiesConverter));
        registry
    }

    pub fn register(&mut self, key: &str, converter: Rc<dyn Converter>) {
        self.converters.insert(key.to_string(), converter);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.converters.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Result<Rc<dyn Converter>> {
        self.converters
            .get(key)
            .map(Rc::clone)
            .ok_or_else(|| BuilderError::UnknownConverter(key.to_string()))
    }
}

type ConverterMap = BTreeMap<String, Rc<dyn Converter>>;

/// Converters resolved for one content type and appearance.
///
/// Keys are property codes (`var` + `name`). Preview lookups fall back to the
/// regular converter when no preview converter is configured.
#[derive(Debug, Clone, Default)]
pub struct ElementConverterPool {
    style: ConverterMap,
    style_preview: ConverterMap,
    attributes: ConverterMap,
    attributes_preview: ConverterMap,
}

impl ElementConverterPool {
    pub fn build(
        config: &ContentTypeConfig,
        appearance: Option<&str>,
        registry: &ConverterRegistry,
    ) -> Result<Self> {
        let mut pool = Self::default();
        let Some(mapping) = config.appearance(appearance)?.data_mapping.as_ref() else {
            return Ok(pool);
        };

        for element in mapping.elements.values() {
            for property in &element.style {
                register_property(
                    &mut pool.style,
                    &mut pool.style_preview,
                    property,
                    registry,
                )?;
            }
            for property in &element.attributes {
                register_property(
                    &mut pool.attributes,
                    &mut pool.attributes_preview,
                    property,
                    registry,
                )?;
            }
        }
        tracing::trace!(
            content_type = %config.name,
            styles = pool.style.len(),
            attributes = pool.attributes.len(),
            "converter pool built"
        );
        Ok(pool)
    }

    pub fn style_converter(&self, code: &str) -> Option<&dyn Converter> {
        self.style.get(code).map(|c| &**c)
    }

    pub fn style_preview_converter(&self, code: &str) -> Option<&dyn Converter> {
        self.style_preview.get(code).map(|c| &**c)
    }

    pub fn attribute_converter(&self, code: &str) -> Option<&dyn Converter> {
        self.attributes.get(code).map(|c| &**c)
    }

    pub fn attribute_preview_converter(&self, code: &str) -> Option<&dyn Converter> {
        self.attributes_preview.get(code).map(|c| &**c)
    }
}

fn register_property(
    master: &mut ConverterMap,
    preview: &mut ConverterMap,
    property: &crate::config::PropertyMapping,
    registry: &ConverterRegistry,
) -> Result<()> {
    if property.converter.is_none() && property.preview_converter.is_none() {
        return Ok(());
    }
    let code = property.code();
    let converter = property
        .converter
        .as_deref()
        .map(|key| registry.get(key))
        .transpose()?;
    let preview_converter = match property.preview_converter.as_deref() {
        Some(key) => Some(registry.get(key)?),
        None => converter.as_ref().map(Rc::clone),
    };

    if let Some(converter) = converter {
        master.insert(code.clone(), converter);
    }
    if let Some(preview_converter) = preview_converter {
        preview.insert(code, preview_converter);
    }
    Ok(())
}
