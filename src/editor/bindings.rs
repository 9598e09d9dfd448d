//! JavaScript API of [`PageBuilder`].

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Promise};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::HtmlElement;

use super::js_factory::JsBlockFactory;
use super::{create_column_in, dom, drop_column_in, PageBuilder};
use crate::column::ResizeOutcome;
use crate::config::ConfigRegistry;
use crate::converter::ConverterRegistry;
use crate::stage::{Stage, SubscriptionId};
use crate::types::{BlockId, ElementGeometry};

pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Notifications waiting for the editor state to be released.
///
/// Store and stage listeners run while the state is borrowed; JS callbacks
/// are queued there and delivered once the borrow ends, so they may call back
/// into the builder.
#[derive(Clone, Default)]
pub(crate) struct Outbox(Rc<RefCell<Vec<(Function, JsValue)>>>);

impl Outbox {
    fn post(&self, callback: &Function, value: JsValue) {
        self.0.borrow_mut().push((callback.clone(), value));
    }

    fn flush(&self) {
        let pending = std::mem::take(&mut *self.0.borrow_mut());
        for (callback, value) in pending {
            if let Err(err) = callback.call1(&JsValue::NULL, &value) {
                tracing::warn!(?err, "listener threw");
            }
        }
    }
}

fn changed(outcome: ResizeOutcome) -> bool {
    matches!(outcome, ResizeOutcome::Resized { .. })
}

#[wasm_bindgen]
impl PageBuilder {
    /// Create a builder with the built-in content types.
    #[wasm_bindgen(constructor)]
    pub fn new() -> PageBuilder {
        console_error_panic_hook::set_once();
        Self::default()
    }

    /// Create a builder with content types loaded from a JSON array.
    #[wasm_bindgen(js_name = with_config)]
    pub fn js_with_config(config_json: &str) -> Result<PageBuilder, JsValue> {
        console_error_panic_hook::set_once();
        let config = ConfigRegistry::from_json(config_json, &ConverterRegistry::with_builtins())?;
        Ok(Self::with_stage(Stage::new(config)))
    }

    /// Replace the stage with a JSON snapshot.
    #[wasm_bindgen(js_name = load)]
    pub fn js_load(&self, json: &str) -> Result<(), JsValue> {
        Ok(self.load_snapshot_json(json)?)
    }

    #[wasm_bindgen(js_name = snapshot)]
    pub fn js_snapshot(&self) -> Result<String, JsValue> {
        Ok(self.snapshot_json()?)
    }

    #[wasm_bindgen(js_name = root)]
    pub fn js_root(&self) -> Option<u32> {
        self.with_stage_ref(|stage| stage.root().map(|id| id.0))
    }

    /// Child block ids of a block, in order.
    #[wasm_bindgen(js_name = children)]
    pub fn js_children(&self, id: u32) -> Vec<u32> {
        self.with_stage_ref(|stage| {
            stage
                .tree
                .children(BlockId(id))
                .iter()
                .map(|c| c.0)
                .collect()
        })
    }

    #[wasm_bindgen(js_name = set_geometry)]
    pub fn js_set_geometry(
        &self,
        id: u32,
        offset_left: f64,
        position_left: f64,
        outer_width: f64,
    ) -> Result<(), JsValue> {
        let geometry = ElementGeometry::new(offset_left, position_left, outer_width);
        Ok(self.set_geometry(BlockId(id), geometry)?)
    }

    /// Measure a block's rendered element and record its geometry.
    #[wasm_bindgen(js_name = measure)]
    pub fn js_measure(&self, id: u32, element: &HtmlElement) -> Result<(), JsValue> {
        Ok(self.set_geometry(BlockId(id), dom::measure(element))?)
    }

    #[wasm_bindgen(js_name = column_width)]
    pub fn js_column_width(&self, column: u32) -> f64 {
        self.column_width(BlockId(column))
    }

    #[wasm_bindgen(js_name = columns_width)]
    pub fn js_columns_width(&self, group: u32) -> f64 {
        self.columns_width(BlockId(group))
    }

    /// Resize a column. Returns whether any width changed.
    #[wasm_bindgen(js_name = resize_column)]
    pub fn js_resize_column(&self, column: u32, width: f64) -> Result<bool, JsValue> {
        let outcome = self.resize_column(BlockId(column), width);
        self.outbox.flush();
        Ok(changed(outcome?))
    }

    #[wasm_bindgen(js_name = drop_positions)]
    pub fn js_drop_positions(&self, group: u32) -> Result<JsValue, JsValue> {
        to_js(&self.drop_positions(BlockId(group)))
    }

    #[wasm_bindgen(js_name = column_widths)]
    pub fn js_column_widths(&self, column: u32) -> Result<JsValue, JsValue> {
        to_js(&self.column_widths(BlockId(column))?)
    }

    #[wasm_bindgen(js_name = begin_resize)]
    pub fn js_begin_resize(&self, column: u32) -> Result<(), JsValue> {
        Ok(self.begin_resize(BlockId(column))?)
    }

    /// Move the resize handle to a document x position.
    #[wasm_bindgen(js_name = drag_resize)]
    pub fn js_drag_resize(&self, x: f64) -> Result<bool, JsValue> {
        let outcome = self.drag_resize(x);
        self.outbox.flush();
        Ok(changed(outcome?))
    }

    #[wasm_bindgen(js_name = end_resize)]
    pub fn js_end_resize(&self) -> bool {
        self.end_resize()
    }

    #[wasm_bindgen(js_name = element_data)]
    pub fn js_element_data(&self, id: u32, element: &str, preview: bool) -> Result<JsValue, JsValue> {
        to_js(&self.element_data(BlockId(id), element, preview)?)
    }

    #[wasm_bindgen(js_name = slider_commands)]
    pub fn js_slider_commands(&self, id: u32) -> Result<JsValue, JsValue> {
        to_js(&self.slider_commands(BlockId(id))?)
    }

    /// Options panel entries of a block, sorted.
    #[wasm_bindgen(js_name = options)]
    pub fn js_options(&self, id: u32) -> Result<JsValue, JsValue> {
        let options = self.with_stage_ref(|stage| stage.options_for(BlockId(id)))?;
        to_js(&options)
    }

    /// Run an options panel action. Returns the id of a created block.
    #[wasm_bindgen(js_name = apply_option)]
    pub fn js_apply_option(&self, id: u32, code: &str) -> Result<Option<u32>, JsValue> {
        let created = self.apply_option(BlockId(id), code);
        self.outbox.flush();
        Ok(created?.map(|id| id.0))
    }

    /// Call `callback` with every store change.
    #[wasm_bindgen(js_name = subscribe)]
    pub fn js_subscribe(&self, callback: Function) -> u32 {
        let outbox = self.outbox.clone();
        let subscription = self.with_stage_mut(|stage| {
            stage.store.subscribe(move |change| match to_js(change) {
                Ok(value) => outbox.post(&callback, value),
                Err(err) => tracing::warn!(?err, "store change not delivered"),
            })
        });
        subscription.0
    }

    #[wasm_bindgen(js_name = unsubscribe)]
    pub fn js_unsubscribe(&self, subscription: u32) -> bool {
        self.with_stage_mut(|stage| stage.store.unsubscribe(SubscriptionId(subscription)))
    }

    /// Call `callback` with every structural change of the stage.
    #[wasm_bindgen(js_name = on_stage_event)]
    pub fn js_on_stage_event(&self, callback: Function) {
        let outbox = self.outbox.clone();
        self.with_stage_mut(|stage| {
            stage.on_event(move |event| match to_js(event) {
                Ok(value) => outbox.post(&callback, value),
                Err(err) => tracing::warn!(?err, "stage event not delivered"),
            });
        });
    }

    /// Create a column; resolves to the new block id.
    ///
    /// `loader(contentType, parentId, initialData)` may return (a promise of)
    /// extra block data.
    #[wasm_bindgen(js_name = create_column)]
    pub fn js_create_column(
        &self,
        group: u32,
        width: f64,
        index: Option<usize>,
        loader: Option<Function>,
    ) -> Promise {
        let state = Rc::clone(&self.state);
        let outbox = self.outbox.clone();
        future_to_promise(async move {
            let factory = JsBlockFactory::new(loader);
            let created = create_column_in(&state, &factory, BlockId(group), width, index).await;
            outbox.flush();
            Ok(JsValue::from(created?.0))
        })
    }

    /// Drop a new column at document x; resolves to its id, or `undefined`
    /// when `x` is outside the group's drop zones.
    #[wasm_bindgen(js_name = drop_column)]
    pub fn js_drop_column(&self, group: u32, x: f64, loader: Option<Function>) -> Promise {
        let state = Rc::clone(&self.state);
        let outbox = self.outbox.clone();
        future_to_promise(async move {
            let factory = JsBlockFactory::new(loader);
            let created = drop_column_in(&state, &factory, BlockId(group), x).await;
            outbox.flush();
            Ok(created?.map_or(JsValue::UNDEFINED, |id| JsValue::from(id.0)))
        })
    }
}
