//! Content-type configuration, element rendering and stage option tests
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod fixtures;

use fixtures::{record, units, GroupBuilder};
use futures::executor::block_on;
use pagebuilder::column::{column_width, columns_width};
use pagebuilder::config::{ConfigRegistry, DEFAULT_APPEARANCE};
use pagebuilder::converter::ConverterRegistry;
use pagebuilder::element::ElementRenderer;
use pagebuilder::error::BuilderError;
use pagebuilder::factory::{BlockFactory, DefaultBlockFactory};
use pagebuilder::stage::{BlockSeed, Stage};
use pagebuilder::types::{COLUMN, COLUMN_GROUP, ROW, SLIDER};
use pagebuilder::widgets::SliderSettings;
use serde_json::Value;

const BANNER_CONFIG: &str = r##"[
    {
        "name": "banner",
        "label": "Banner",
        "fields": {"message": "", "text_color": "#000"},
        "appearances": {
            "default": {
                "data_mapping": {
                    "elements": {
                        "main": {
                            "style": [
                                {"name": "color", "var": "text_color", "converter": "color"}
                            ],
                            "attributes": [
                                {"name": "data-role", "var": "role"}
                            ]
                        },
                        "message": {
                            "attributes": [
                                {"name": "title", "var": "message", "converter": "html_entities"}
                            ]
                        }
                    }
                }
            },
            "poster": {}
        }
    }
]"##;

#[test]
fn test_builtin_content_types() {
    let registry = ConfigRegistry::builtin();
    let names: Vec<&str> = registry.names().collect();
    for name in [ROW, COLUMN_GROUP, COLUMN, SLIDER] {
        assert!(names.contains(&name), "missing {name}");
    }
    let column = registry.get(COLUMN).unwrap();
    assert_eq!(column.fields["width"], Value::from("100%"));
    assert!(column.appearances.contains_key(DEFAULT_APPEARANCE));
}

#[test]
fn test_custom_config_renders_elements() {
    let converters = ConverterRegistry::with_builtins();
    let config = ConfigRegistry::from_json(BANNER_CONFIG, &converters).unwrap();
    let mut stage = Stage::new(config);
    let root = stage.root().unwrap();

    let seed = block_on(DefaultBlockFactory::new().create_block(
        stage.config().get("banner").unwrap(),
        root,
        record(&[
            ("text_color", Value::from("#F0A")),
            ("message", Value::from("Fish & <Chips>")),
            ("role", Value::from("banner")),
        ]),
    ))
    .unwrap();
    let banner = stage.insert_block(seed, root, None).unwrap();

    let mut renderer = ElementRenderer::new(converters);
    let main = renderer.element_data(&stage, banner, "main", false).unwrap();
    assert_eq!(main.style["color"], "#ff00aa");
    assert_eq!(main.attributes["data-role"], "banner");

    let message = renderer.element_data(&stage, banner, "message", true).unwrap();
    assert_eq!(message.attributes["title"], "Fish &amp; &lt;Chips&gt;");
}

#[test]
fn test_appearance_without_mapping_renders_nothing() {
    let converters = ConverterRegistry::with_builtins();
    let config = ConfigRegistry::from_json(BANNER_CONFIG, &converters).unwrap();
    let mut stage = Stage::new(config);
    let root = stage.root().unwrap();
    let banner = stage
        .insert_block(
            BlockSeed {
                content_type: "banner".into(),
                data: record(&[
                    ("appearance", Value::from("poster")),
                    ("text_color", Value::from("#fff")),
                ]),
            },
            root,
            None,
        )
        .unwrap();

    let mut renderer = ElementRenderer::new(converters);
    let data = renderer.element_data(&stage, banner, "main", false).unwrap();
    assert!(data.style.is_empty());
    assert!(data.attributes.is_empty());
}

#[test]
fn test_config_errors() {
    let converters = ConverterRegistry::with_builtins();
    assert!(matches!(
        ConfigRegistry::from_json("{not json", &converters),
        Err(BuilderError::Json(_))
    ));
    assert!(matches!(
        ConfigRegistry::from_json(r#"[{"name": "  ", "appearances": {"default": {}}}]"#, &converters),
        Err(BuilderError::Config(_))
    ));
    // Converters must be registered before the configs referring to them load.
    assert!(matches!(
        ConfigRegistry::from_json(BANNER_CONFIG, &ConverterRegistry::new()),
        Err(BuilderError::UnknownConverter(_))
    ));
    assert!(ConfigRegistry::builtin().get("video").is_err());
}

#[test]
fn test_slider_defaults_reach_settings() {
    let mut stage = Stage::default();
    let root = stage.root().unwrap();
    let seed = block_on(DefaultBlockFactory::new().create_block(
        stage.config().get(SLIDER).unwrap(),
        root,
        record(&[("fade", Value::from(true))]),
    ))
    .unwrap();
    let slider = stage.insert_block(seed, root, None).unwrap();

    let mut renderer = ElementRenderer::default();
    let data = renderer.element_data(&stage, slider, "main", false).unwrap();
    let settings = SliderSettings::from_attributes(&data.attributes);
    assert_eq!(
        settings,
        SliderSettings {
            autoplay: false,
            autoplay_speed: 4000,
            fade: true,
            infinite: false,
            arrows: false,
            dots: true,
        }
    );
}

#[test]
fn test_options_panel_order_and_actions() {
    let mut fixture = GroupBuilder::new().unit_columns(&[3, 3]).build();
    let column = fixture.column(0);

    let codes: Vec<&str> = fixture
        .stage
        .options_for(column)
        .unwrap()
        .iter()
        .map(|o| o.code)
        .collect();
    assert_eq!(codes, ["move", "edit", "duplicate", "remove"]);

    let copy = fixture.stage.apply_option(column, "duplicate").unwrap().unwrap();
    assert_eq!(fixture.stage.tree.index_of(copy), Some(1));
    assert_eq!(column_width(&fixture.stage, copy), units(1));
    assert!((columns_width(&fixture.stage, fixture.group) - 100.0).abs() < 1e-6);

    fixture.stage.apply_option(copy, "remove").unwrap();
    assert_eq!(fixture.stage.tree.children(fixture.group), fixture.columns.as_slice());
    assert_eq!(column_width(&fixture.stage, column), 50.0);
    assert_eq!(columns_width(&fixture.stage, fixture.group), 100.0);
}

#[test]
fn test_column_options_never_change_group_total() {
    let mut fixture = GroupBuilder::new().unit_columns(&[3, 3]).build();

    let copy = fixture.stage.apply_option(fixture.column(0), "duplicate").unwrap().unwrap();
    assert!((columns_width(&fixture.stage, fixture.group) - 100.0).abs() < 1e-6);

    fixture.stage.apply_option(fixture.column(1), "remove").unwrap();
    assert!((columns_width(&fixture.stage, fixture.group) - 100.0).abs() < 1e-6);
    fixture.stage.apply_option(copy, "remove").unwrap();
    assert_eq!(fixture.stage.tree.children(fixture.group), &[fixture.column(0)]);
    assert_eq!(column_width(&fixture.stage, fixture.column(0)), 100.0);
}

#[test]
fn test_duplicate_in_full_group_is_refused() {
    let mut fixture = GroupBuilder::new().unit_columns(&[1, 1, 1, 1, 1, 1]).build();
    let err = fixture.stage.apply_option(fixture.column(0), "duplicate").unwrap_err();
    assert!(matches!(err, BuilderError::GroupFull(g) if g == fixture.group));
    assert_eq!(fixture.stage.tree.children(fixture.group).len(), 6);
}
