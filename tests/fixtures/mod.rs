//! Stage builders for integration tests.
//!
//! [`GroupBuilder`] lays out one column group on a fresh stage with widths
//! stored the way the editor stores them and pixel geometry matching those
//! widths, so drop zones and handle positions can be asserted exactly.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use pagebuilder::column::WIDTH_KEY;
use pagebuilder::config::ContentTypeConfig;
use pagebuilder::error::{BuilderError, Result};
use pagebuilder::factory::{BlockFactory, DefaultBlockFactory};
use pagebuilder::grid::{format_width, grid_percentage};
use pagebuilder::stage::{BlockSeed, Record, Stage};
use pagebuilder::types::{BlockId, ElementGeometry, COLUMN, COLUMN_GROUP};
use serde_json::Value;

/// Width of `units` sixths.
pub fn units(units: u32) -> f64 {
    grid_percentage(units)
}

pub fn record(pairs: &[(&str, Value)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

pub struct GroupFixture {
    pub stage: Stage,
    pub group: BlockId,
    pub columns: Vec<BlockId>,
}

impl GroupFixture {
    pub fn column(&self, index: usize) -> BlockId {
        self.columns[index]
    }

    /// Record every width written to `column`.
    pub fn watch_width(&mut self, column: BlockId) -> Rc<RefCell<Vec<Value>>> {
        let writes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&writes);
        self.stage.store.subscribe(move |change| {
            if change.id == column && change.property == WIDTH_KEY {
                sink.borrow_mut().push(change.value.clone());
            }
        });
        writes
    }
}

/// Builds a stage holding one column group.
pub struct GroupBuilder {
    widths: Vec<f64>,
    group_left: f64,
    group_width: f64,
}

impl Default for GroupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupBuilder {
    /// A 600px wide group at the left edge of the document.
    pub fn new() -> Self {
        Self {
            widths: Vec::new(),
            group_left: 0.0,
            group_width: 600.0,
        }
    }

    pub fn column(mut self, width: f64) -> Self {
        self.widths.push(width);
        self
    }

    /// Add one column per entry, each `n` grid units wide.
    pub fn unit_columns(mut self, widths: &[u32]) -> Self {
        self.widths.extend(widths.iter().map(|&n| units(n)));
        self
    }

    pub fn group_left(mut self, px: f64) -> Self {
        self.group_left = px;
        self
    }

    pub fn group_width(mut self, px: f64) -> Self {
        self.group_width = px;
        self
    }

    pub fn build(self) -> GroupFixture {
        let mut stage = Stage::default();
        let root = stage.root().unwrap();
        let group = stage
            .insert_block(
                BlockSeed {
                    content_type: COLUMN_GROUP.into(),
                    data: Record::new(),
                },
                root,
                None,
            )
            .unwrap();
        stage
            .tree
            .set_geometry(
                group,
                ElementGeometry::new(self.group_left, self.group_left, self.group_width),
            )
            .unwrap();

        let mut columns = Vec::with_capacity(self.widths.len());
        let mut position = 0.0;
        for width in self.widths {
            let column = stage
                .insert_block(
                    BlockSeed {
                        content_type: COLUMN.into(),
                        data: record(&[(WIDTH_KEY, Value::from(format_width(width)))]),
                    },
                    group,
                    None,
                )
                .unwrap();
            let outer = (width / 100.0 * self.group_width).round();
            stage
                .tree
                .set_geometry(
                    column,
                    ElementGeometry::new(self.group_left + position, position, outer),
                )
                .unwrap();
            position += outer;
            columns.push(column);
        }

        GroupFixture {
            stage,
            group,
            columns,
        }
    }
}

/// Factory that always fails.
#[derive(Debug, Default)]
pub struct FailingFactory {
    pub calls: Cell<usize>,
}

#[async_trait(?Send)]
impl BlockFactory for FailingFactory {
    async fn create_block(
        &self,
        config: &ContentTypeConfig,
        _parent: BlockId,
        _initial_data: Record,
    ) -> Result<BlockSeed> {
        self.calls.set(self.calls.get() + 1);
        Err(BuilderError::Factory(format!("{} template missing", config.name)))
    }
}

/// Factory that counts calls and delegates to the default one.
#[derive(Debug, Default)]
pub struct CountingFactory {
    pub calls: Cell<usize>,
    inner: DefaultBlockFactory,
}

#[async_trait(?Send)]
impl BlockFactory for CountingFactory {
    async fn create_block(
        &self,
        config: &ContentTypeConfig,
        parent: BlockId,
        initial_data: Record,
    ) -> Result<BlockSeed> {
        self.calls.set(self.calls.get() + 1);
        self.inner.create_block(config, parent, initial_data).await
    }
}

/// Factory that builds a block of the wrong content type.
#[derive(Debug, Default)]
pub struct WrongTypeFactory;

#[async_trait(?Send)]
impl BlockFactory for WrongTypeFactory {
    async fn create_block(
        &self,
        _config: &ContentTypeConfig,
        _parent: BlockId,
        initial_data: Record,
    ) -> Result<BlockSeed> {
        Ok(BlockSeed {
            content_type: "row".into(),
            data: initial_data,
        })
    }
}
