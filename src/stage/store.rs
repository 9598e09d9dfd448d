//! Keyed record store backing block data.
//!
//! Every block's editable data (including a column's `width`) lives here,
//! keyed by [`BlockId`]. Rendering reacts to changes through explicit
//! subscriptions instead of observable properties.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::types::BlockId;

/// Data attached to a single block.
pub type Record = serde_json::Map<String, Value>;

/// Notification sent to subscribers after a single-key update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreChange {
    pub id: BlockId,
    pub property: String,
    pub value: Value,
}

/// Handle returned by [`DataStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u32);

type Listener = Box<dyn FnMut(&StoreChange)>;

/// Record store with change subscriptions.
#[derive(Default)]
pub struct DataStore {
    records: BTreeMap<BlockId, Record>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u32,
}

impl fmt::Debug for DataStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataStore")
            .field("records", &self.records)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the record stored for a block
    pub fn get(&self, id: BlockId) -> Option<&Record> {
        self.records.get(&id)
    }

    /// Replace the whole record of a block.
    ///
    /// Used when a block is first created; does not notify subscribers.
    pub fn update(&mut self, id: BlockId, record: Record) {
        self.records.insert(id, record);
    }

    /// Set a single property of a block's record and notify subscribers.
    pub fn update_key(&mut self, id: BlockId, value: impl Into<Value>, property: &str) {
        let value = value.into();
        tracing::debug!(%id, property, %value, "store update");
        self.records
            .entry(id)
            .or_default()
            .insert(property.to_string(), value.clone());

        let change = StoreChange {
            id,
            property: property.to_string(),
            value,
        };
        for (_, listener) in &mut self.listeners {
            listener(&change);
        }
    }

    /// Drop a block's record.
    pub fn remove(&mut self, id: BlockId) -> Option<Record> {
        self.records.remove(&id)
    }

    /// Register a listener called after every [`DataStore::update_key`].
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        self.listeners.len() != before
    }

    pub fn records(&self) -> &BTreeMap<BlockId, Record> {
        &self.records
    }
}
