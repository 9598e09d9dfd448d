//! Content-type configuration.
//!
//! Each block type (row, column group, column, slider, ...) is described by a
//! [`ContentTypeConfig`]: its appearances, how block data maps onto element
//! styles and attributes, and the default field values of a new block.
//! Configurations are validated when loaded, so converter names and
//! appearance references can be trusted afterwards.

mod builtin;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::converter::ConverterRegistry;
use crate::error::{BuilderError, Result};
use crate::stage::Record;

/// Name of the appearance used when none is requested.
pub const DEFAULT_APPEARANCE: &str = "default";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentTypeConfig {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub component: Option<String>,
    #[serde(default)]
    pub appearances: BTreeMap<String, AppearanceConfig>,
    /// Field defaults copied into the record of every new block.
    #[serde(default)]
    pub fields: Record,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppearanceConfig {
    #[serde(default)]
    pub data_mapping: Option<DataMapping>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataMapping {
    #[serde(default)]
    pub elements: BTreeMap<String, ElementMapping>,
}

/// How block data is written onto one rendered element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementMapping {
    #[serde(default)]
    pub style: Vec<PropertyMapping>,
    #[serde(default)]
    pub attributes: Vec<PropertyMapping>,
}

/// A single style or attribute of an element.
///
/// `var` is the record key the value is read from, `name` the CSS property
/// or attribute it is written to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMapping {
    pub name: String,
    #[serde(default)]
    pub var: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub converter: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub preview_converter: Option<String>,
}

impl PropertyMapping {
    /// Key under which this property's converters are registered.
    pub fn code(&self) -> String {
        format!("{}{}", self.var, self.name)
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

impl ContentTypeConfig {
    /// Get an appearance, falling back to the default one.
    pub fn appearance(&self, name: Option<&str>) -> Result<&AppearanceConfig> {
        let name = name.unwrap_or(DEFAULT_APPEARANCE);
        self.appearances.get(name).ok_or_else(|| {
            BuilderError::Config(format!("{} has no appearance {name}", self.name))
        })
    }

    /// Check the config is usable with the given converters.
    pub fn validate(&self, converters: &ConverterRegistry) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BuilderError::Config("content type without a name".into()));
        }
        if !self.appearances.contains_key(DEFAULT_APPEARANCE) {
            return Err(BuilderError::Config(format!(
                "{} has no {DEFAULT_APPEARANCE} appearance",
                self.name
            )));
        }

        let mappings = self
            .appearances
            .values()
            .filter_map(|a| a.data_mapping.as_ref())
            .flat_map(|m| m.elements.values())
            .flat_map(|e| e.style.iter().chain(e.attributes.iter()));
        for mapping in mappings {
            for key in [&mapping.converter, &mapping.preview_converter]
                .into_iter()
                .flatten()
            {
                if !converters.contains(key) {
                    return Err(BuilderError::UnknownConverter(key.clone()));
                }
            }
        }
        Ok(())
    }
}

/// All known content types, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ConfigRegistry {
    types: BTreeMap<String, ContentTypeConfig>,
}

impl ConfigRegistry {
    /// Registry holding the content types shipped with the builder.
    pub fn builtin() -> Self {
        let mut types = BTreeMap::new();
        for config in builtin::content_types() {
            types.insert(config.name.clone(), config);
        }
        Self { types }
    }

    /// Load and validate a JSON array of content-type configs.
    pub fn from_json(json: &str, converters: &ConverterRegistry) -> Result<Self> {
        let configs: Vec<ContentTypeConfig> = serde_json::from_str(json)?;
        let mut registry = Self::default();
        for config in configs {
            registry.insert(config, converters)?;
        }
        Ok(registry)
    }

    /// Validate and add a config, replacing any previous one of the same name.
    pub fn insert(&mut self, config: ContentTypeConfig, converters: &ConverterRegistry) -> Result<()> {
        config.validate(converters)?;
        self.types.insert(config.name.clone(), config);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&ContentTypeConfig> {
        self.types
            .get(name)
            .ok_or_else(|| BuilderError::Config(format!("unknown content type {name}")))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}
