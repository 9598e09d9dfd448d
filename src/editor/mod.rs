//! Page builder editor.
//!
//! [`PageBuilder`] owns a stage together with everything the editing UI
//! needs around it: the element renderer, the active resize drag and the
//! slider widgets mounted on the page. State is shared behind
//! `Rc<RefCell<..>>` so async column construction can run without holding a
//! borrow across an `await`.

#[cfg(target_arch = "wasm32")]
mod bindings;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod js_factory;
mod resize;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

pub use resize::{resize_with_neighbour, ResizeSession};

use crate::column::{
    calculate_drop_positions, column_config, column_data, columns_width, determine_column_widths,
    drop_donor, drop_position_at, insert_column, place_dropped_column, ColumnWidth, DropPosition,
    ResizeOutcome,
};
use crate::element::{ElementData, ElementRenderer};
use crate::error::{BuilderError, Result};
use crate::factory::BlockFactory;
use crate::grid::smallest_column_width;
use crate::stage::Stage;
use crate::types::{BlockId, ElementGeometry, StageSnapshot, SLIDER};
use crate::widgets::{SliderCommand, SliderMount, SliderSettings};

/// Element of a block whose attributes configure its widget.
const MAIN_ELEMENT: &str = "main";

pub(crate) struct EditorState {
    pub stage: Stage,
    pub renderer: ElementRenderer,
    pub resize: Option<ResizeSession>,
    pub sliders: BTreeMap<BlockId, SliderMount>,
}

impl EditorState {
    fn new(stage: Stage) -> Self {
        Self {
            stage,
            renderer: ElementRenderer::default(),
            resize: None,
            sliders: BTreeMap::new(),
        }
    }

    /// Forget widget state of blocks no longer on the stage.
    fn prune_sliders(&mut self) {
        let tree = &self.stage.tree;
        self.sliders.retain(|id, _| tree.contains(*id));
    }
}

#[wasm_bindgen]
pub struct PageBuilder {
    state: Rc<RefCell<EditorState>>,
    #[cfg(target_arch = "wasm32")]
    outbox: bindings::Outbox,
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self::with_stage(Stage::default())
    }
}

impl PageBuilder {
    pub fn with_stage(stage: Stage) -> Self {
        Self {
            state: Rc::new(RefCell::new(EditorState::new(stage))),
            #[cfg(target_arch = "wasm32")]
            outbox: bindings::Outbox::default(),
        }
    }

    /// Run `f` against the current stage.
    pub fn with_stage_ref<R>(&self, f: impl FnOnce(&Stage) -> R) -> R {
        f(&self.state.borrow().stage)
    }

    /// Run `f` against the current stage mutably.
    pub fn with_stage_mut<R>(&self, f: impl FnOnce(&mut Stage) -> R) -> R {
        f(&mut self.state.borrow_mut().stage)
    }

    /// Replace the stage with one restored from a JSON snapshot.
    ///
    /// Content-type configuration is kept; listeners, the resize drag and
    /// mounted sliders are reset.
    pub fn load_snapshot_json(&self, json: &str) -> Result<()> {
        let snapshot: StageSnapshot = serde_json::from_str(json)?;
        let mut s = self.state.borrow_mut();
        let config = s.stage.config().clone();
        let stage = Stage::from_snapshot(snapshot, config)?;
        tracing::debug!(blocks = stage.tree.len(), "snapshot loaded");
        let renderer = std::mem::take(&mut s.renderer);
        *s = EditorState::new(stage);
        s.renderer = renderer;
        Ok(())
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.state.borrow().stage.to_snapshot())?)
    }

    /// Record the measured geometry of a block's element.
    pub fn set_geometry(&self, id: BlockId, geometry: ElementGeometry) -> Result<()> {
        self.state.borrow_mut().stage.tree.set_geometry(id, geometry)
    }

    pub fn column_width(&self, column: BlockId) -> f64 {
        crate::column::column_width(&self.state.borrow().stage, column)
    }

    pub fn columns_width(&self, group: BlockId) -> f64 {
        columns_width(&self.state.borrow().stage, group)
    }

    /// Resize a column against its right-hand neighbours.
    pub fn resize_column(&self, column: BlockId, width: f64) -> Result<ResizeOutcome> {
        resize_with_neighbour(&mut self.state.borrow_mut().stage, column, width)
    }

    pub fn drop_positions(&self, group: BlockId) -> Vec<DropPosition> {
        calculate_drop_positions(&self.state.borrow().stage, group)
    }

    /// Handle positions of every grid width for `column`.
    pub fn column_widths(&self, column: BlockId) -> Result<Vec<ColumnWidth>> {
        let s = self.state.borrow();
        let group = s
            .stage
            .tree
            .parent(column)
            .ok_or(BuilderError::NoParent(column))?;
        let group_element = s
            .stage
            .tree
            .geometry(group)
            .ok_or(BuilderError::UnknownBlock(group))?;
        determine_column_widths(&s.stage, column, &group_element)
    }

    pub fn begin_resize(&self, column: BlockId) -> Result<()> {
        let mut s = self.state.borrow_mut();
        let session = ResizeSession::begin(&s.stage, column)?;
        s.resize = Some(session);
        Ok(())
    }

    /// Move the active resize handle to `x`. Without an active drag this
    /// does nothing.
    pub fn drag_resize(&self, x: f64) -> Result<ResizeOutcome> {
        let mut s = self.state.borrow_mut();
        let s = &mut *s;
        match &s.resize {
            Some(session) => session.drag_to(&mut s.stage, x),
            None => Ok(ResizeOutcome::Unchanged),
        }
    }

    /// End the active drag. Returns false if none was active.
    pub fn end_resize(&self) -> bool {
        self.state.borrow_mut().resize.take().is_some()
    }

    pub fn is_resizing(&self) -> bool {
        self.state.borrow().resize.is_some()
    }

    pub fn element_data(&self, id: BlockId, element: &str, preview: bool) -> Result<ElementData> {
        let mut s = self.state.borrow_mut();
        let s = &mut *s;
        s.renderer.element_data(&s.stage, id, element, preview)
    }

    /// Carousel commands that bring a slider in line with its data.
    pub fn slider_commands(&self, id: BlockId) -> Result<Vec<SliderCommand>> {
        let mut s = self.state.borrow_mut();
        let s = &mut *s;
        let block = s.stage.tree.get(id).ok_or(BuilderError::UnknownBlock(id))?;
        if block.content_type != SLIDER {
            return Err(BuilderError::Other(format!("block {id} is not a {SLIDER}")));
        }
        let data = s.renderer.element_data(&s.stage, id, MAIN_ELEMENT, false)?;
        let settings = SliderSettings::from_attributes(&data.attributes);
        Ok(s.sliders.entry(id).or_default().mount(settings))
    }

    /// Run an options panel action on a block.
    pub fn apply_option(&self, id: BlockId, code: &str) -> Result<Option<BlockId>> {
        let mut s = self.state.borrow_mut();
        let created = s.stage.apply_option(id, code)?;
        s.prune_sliders();
        Ok(created)
    }

    /// Create a column of `width` in `group`.
    pub async fn create_column<F>(
        &self,
        factory: &F,
        group: BlockId,
        width: f64,
        index: Option<usize>,
    ) -> Result<BlockId>
    where
        F: BlockFactory + ?Sized,
    {
        create_column_in(&self.state, factory, group, width, index).await
    }

    /// Insert a one-unit column at the drop zone under `x`.
    ///
    /// Returns `None` when `x` is outside every drop zone.
    pub async fn drop_column<F>(&self, factory: &F, group: BlockId, x: f64) -> Result<Option<BlockId>>
    where
        F: BlockFactory + ?Sized,
    {
        drop_column_in(&self.state, factory, group, x).await
    }
}

// No state borrow may be held across the factory's await.
pub(crate) async fn create_column_in<F>(
    state: &Rc<RefCell<EditorState>>,
    factory: &F,
    group: BlockId,
    width: f64,
    index: Option<usize>,
) -> Result<BlockId>
where
    F: BlockFactory + ?Sized,
{
    let config = column_config(&state.borrow().stage, group)?.clone();
    let seed = factory
        .create_block(&config, group, column_data(width))
        .await
        .inspect_err(|e| tracing::warn!(%group, error = %e, "column construction failed"))?;
    insert_column(&mut state.borrow_mut().stage, group, seed, index)
}

pub(crate) async fn drop_column_in<F>(
    state: &Rc<RefCell<EditorState>>,
    factory: &F,
    group: BlockId,
    x: f64,
) -> Result<Option<BlockId>>
where
    F: BlockFactory + ?Sized,
{
    let (position, config) = {
        let s = state.borrow();
        let positions = calculate_drop_positions(&s.stage, group);
        let Some(position) = drop_position_at(&positions, x).cloned() else {
            return Ok(None);
        };
        drop_donor(&s.stage, group, &position)?;
        (position, column_config(&s.stage, group)?.clone())
    };
    let seed = factory
        .create_block(&config, group, column_data(smallest_column_width()))
        .await
        .inspect_err(|e| tracing::warn!(%group, error = %e, "column construction failed"))?;
    place_dropped_column(&mut state.borrow_mut().stage, group, seed, &position).map(Some)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::factory::DefaultBlockFactory;
    use crate::stage::{BlockSeed, Record};
    use crate::types::{COLUMN, COLUMN_GROUP};
    use futures::executor::block_on;
    use serde_json::Value;

    fn seed(content_type: &str, width: Option<&str>) -> BlockSeed {
        let mut data = Record::new();
        if let Some(width) = width {
            data.insert("width".into(), Value::from(width));
        }
        BlockSeed {
            content_type: content_type.into(),
            data,
        }
    }

    /// Two half-width columns in a 600px group at x = 0.
    fn two_column_builder() -> (PageBuilder, BlockId, BlockId, BlockId) {
        let builder = PageBuilder::default();
        let (group, left, right) = builder.with_stage_mut(|stage| {
            let root = stage.root().unwrap();
            let group = stage.insert_block(seed(COLUMN_GROUP, None), root, None).unwrap();
            let left = stage.insert_block(seed(COLUMN, Some("50%")), group, None).unwrap();
            let right = stage.insert_block(seed(COLUMN, Some("50%")), group, None).unwrap();
            (group, left, right)
        });
        builder
            .set_geometry(group, ElementGeometry::new(0.0, 0.0, 600.0))
            .unwrap();
        builder
            .set_geometry(left, ElementGeometry::new(0.0, 0.0, 300.0))
            .unwrap();
        builder
            .set_geometry(right, ElementGeometry::new(300.0, 300.0, 300.0))
            .unwrap();
        (builder, group, left, right)
    }

    #[test]
    fn test_drag_resize_snaps_to_grid() {
        let (builder, group, left, right) = two_column_builder();
        builder.begin_resize(left).unwrap();
        assert!(builder.is_resizing());

        // 410px is nearest the 4/6 handle at 400px.
        let outcome = builder.drag_resize(410.0).unwrap();
        assert!(matches!(outcome, ResizeOutcome::Resized { .. }));
        assert_eq!(builder.column_width(left), 66.66666667);
        assert_eq!(builder.column_width(right), 33.33333333);

        // Shrinking gives the width back to the adjacent column.
        builder.drag_resize(95.0).unwrap();
        assert_eq!(builder.column_width(left), 16.66666667);
        assert_eq!(builder.column_width(right), 83.33333333);
        assert!((builder.columns_width(group) - 100.0).abs() < 1e-6);

        assert!(builder.end_resize());
        assert!(!builder.end_resize());
        assert_eq!(builder.drag_resize(400.0).unwrap(), ResizeOutcome::Unchanged);
    }

    #[test]
    fn test_drag_past_neighbour_is_ignored() {
        let (builder, _, left, right) = two_column_builder();
        builder.begin_resize(left).unwrap();
        // The full-width handle would need the right column to vanish.
        assert_eq!(builder.drag_resize(600.0).unwrap(), ResizeOutcome::Unchanged);
        assert_eq!(builder.column_width(left), 50.0);
        assert_eq!(builder.column_width(right), 50.0);
    }

    #[test]
    fn test_resize_beyond_single_donor_fails() {
        let (builder, group, left, right) = two_column_builder();
        assert!(matches!(
            builder.resize_column(left, 100.0),
            Err(BuilderError::SnapFailed(_))
        ));
        assert!(matches!(
            builder.resize_column(left, 0.0),
            Err(BuilderError::SnapFailed(_))
        ));
        assert_eq!(builder.column_width(left), 50.0);
        assert_eq!(builder.column_width(right), 50.0);
        assert_eq!(builder.columns_width(group), 100.0);
    }

    #[test]
    fn test_last_column_cannot_start_resize() {
        let (builder, _, _, right) = two_column_builder();
        assert!(matches!(
            builder.begin_resize(right),
            Err(BuilderError::NoAdjacentColumn(_))
        ));
        assert!(!builder.is_resizing());
    }

    #[test]
    fn test_drop_column_takes_width_from_affected_column() {
        let (builder, group, left, right) = two_column_builder();
        let factory = DefaultBlockFactory::new();

        // Right half of the left column.
        let created = block_on(builder.drop_column(&factory, group, 200.0))
            .unwrap()
            .unwrap();
        builder.with_stage_ref(|stage| {
            assert_eq!(stage.tree.children(group), &[left, created, right]);
        });
        assert_eq!(builder.column_width(created), 16.66666667);
        assert_eq!(builder.column_width(left), 33.33333333);
        assert_eq!(builder.column_width(right), 50.0);
    }

    #[test]
    fn test_drop_outside_zones_creates_nothing() {
        let (builder, group, _, _) = two_column_builder();
        let factory = DefaultBlockFactory::new();
        assert_eq!(block_on(builder.drop_column(&factory, group, 900.0)).unwrap(), None);
        builder.with_stage_ref(|stage| assert_eq!(stage.tree.children(group).len(), 2));
    }

    #[test]
    fn test_snapshot_json_reload() {
        let (builder, group, left, _) = two_column_builder();
        let json = builder.snapshot_json().unwrap();

        let restored = PageBuilder::default();
        restored.load_snapshot_json(&json).unwrap();
        assert_eq!(restored.column_width(left), 50.0);
        assert_eq!(restored.drop_positions(group).len(), 4);
    }

    #[test]
    fn test_slider_remounts_on_refresh() {
        let builder = PageBuilder::default();
        let slider = builder.with_stage_mut(|stage| {
            let root = stage.root().unwrap();
            let mut data = Record::new();
            data.insert("autoplay".into(), Value::from(true));
            data.insert("autoplay_speed".into(), Value::from(1500));
            stage
                .insert_block(
                    BlockSeed {
                        content_type: SLIDER.into(),
                        data,
                    },
                    root,
                    None,
                )
                .unwrap()
        });

        let first = builder.slider_commands(slider).unwrap();
        assert_eq!(first.len(), 1);
        let SliderCommand::Init { settings } = &first[0] else {
            panic!("expected init, got {first:?}");
        };
        assert!(settings.autoplay);
        assert_eq!(settings.autoplay_speed, 1500);

        let second = builder.slider_commands(slider).unwrap();
        assert_eq!(second[0], SliderCommand::Destroy);

        builder.apply_option(slider, "remove").unwrap();
        assert!(builder.slider_commands(slider).is_err());
    }
}
