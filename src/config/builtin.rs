//! Content types shipped with the builder.

use std::collections::BTreeMap;

use serde_json::Value;

use super::{AppearanceConfig, ContentTypeConfig, DataMapping, ElementMapping, PropertyMapping};
use crate::stage::Record;
use crate::types::{COLUMN, COLUMN_GROUP, ROW, SLIDER};

fn property(name: &str, var: &str, converter: Option<&str>) -> PropertyMapping {
    PropertyMapping {
        name: name.to_string(),
        var: var.to_string(),
        converter: converter.map(str::to_string),
        preview_converter: None,
    }
}

fn default_appearance(
    style: Vec<PropertyMapping>,
    attributes: Vec<PropertyMapping>,
) -> BTreeMap<String, AppearanceConfig> {
    let mut elements = BTreeMap::new();
    elements.insert("main".to_string(), ElementMapping { style, attributes });
    let mut appearances = BTreeMap::new();
    appearances.insert(
        super::DEFAULT_APPEARANCE.to_string(),
        AppearanceConfig {
            data_mapping: Some(DataMapping { elements }),
        },
    );
    appearances
}

fn fields(pairs: &[(&str, Value)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

fn spacing_styles() -> Vec<PropertyMapping> {
    vec![
        property("margin", "margins", None),
        property("padding", "padding", None),
        property("background-color", "background_color", Some("color")),
        property("text-align", "text_align", None),
    ]
}

pub(super) fn content_types() -> Vec<ContentTypeConfig> {
    let mut column_style = spacing_styles();
    column_style.push(property("width", "width", Some("width")));
    column_style.push(property("min-height", "min_height", None));

    vec![
        ContentTypeConfig {
            name: ROW.to_string(),
            label: "Row".to_string(),
            component: Some("pagebuilder/block/row".to_string()),
            appearances: default_appearance(
                spacing_styles(),
                vec![property("data-role", "role", None)],
            ),
            fields: fields(&[("role", Value::from(ROW))]),
        },
        ContentTypeConfig {
            name: COLUMN_GROUP.to_string(),
            label: "Column Group".to_string(),
            component: Some("pagebuilder/block/column-group".to_string()),
            appearances: default_appearance(
                vec![property("min-height", "min_height", None)],
                vec![property("data-role", "role", None)],
            ),
            fields: fields(&[("role", Value::from(COLUMN_GROUP))]),
        },
        ContentTypeConfig {
            name: COLUMN.to_string(),
            label: "Column".to_string(),
            component: Some("pagebuilder/block/column".to_string()),
            appearances: default_appearance(
                column_style,
                vec![property("data-role", "role", None)],
            ),
            fields: fields(&[("role", Value::from(COLUMN)), ("width", Value::from("100%"))]),
        },
        ContentTypeConfig {
            name: SLIDER.to_string(),
            label: "Slider".to_string(),
            component: Some("pagebuilder/block/slider".to_string()),
            appearances: default_appearance(
                spacing_styles(),
                vec![
                    property("data-autoplay", "autoplay", Some("boolean")),
                    property("data-autoplay-speed", "autoplay_speed", Some("integer")),
                    property("data-fade", "fade", Some("boolean")),
                    property("data-is-infinite", "is_infinite", Some("boolean")),
                    property("data-show-arrows", "show_arrows", Some("boolean")),
                    property("data-show-dots", "show_dots", Some("boolean")),
                ],
            ),
            fields: fields(&[
                ("role", Value::from(SLIDER)),
                ("autoplay", Value::from(false)),
                ("autoplay_speed", Value::from(4000)),
                ("fade", Value::from(false)),
                ("is_infinite", Value::from(false)),
                ("show_arrows", Value::from(false)),
                ("show_dots", Value::from(true)),
            ]),
        },
    ]
}
