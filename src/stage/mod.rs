//! The stage: block tree, data store and content-type configuration.
//!
//! This module handles:
//! - Owning the structural tree and the record store together
//! - Inserting, duplicating and removing blocks (with their records)
//! - Dispatching options panel actions (columns go through the column layout)
//! - Publishing structural changes to listeners

mod events;
mod options;
mod store;
mod tree;

use std::fmt;

pub use events::StageEvent;
pub use options::{default_options, find_option, OptionAction, StructuralOption};
pub use store::{DataStore, Record, StoreChange, SubscriptionId};
pub use tree::StructuralTree;

use crate::column;
use crate::config::ConfigRegistry;
use crate::error::{BuilderError, Result};
use crate::types::{BlockId, StageSnapshot, ROOT};

/// A block ready to be placed on the stage.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSeed {
    pub content_type: String,
    pub data: Record,
}

type EventListener = Box<dyn FnMut(&StageEvent)>;

pub struct Stage {
    pub tree: StructuralTree,
    pub store: DataStore,
    config: ConfigRegistry,
    listeners: Vec<EventListener>,
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("tree", &self.tree)
            .field("store", &self.store)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(ConfigRegistry::builtin())
    }
}

impl Stage {
    /// Create an empty stage with a root container.
    pub fn new(config: ConfigRegistry) -> Self {
        let mut tree = StructuralTree::new();
        tree.insert_root(ROOT);
        Self {
            tree,
            store: DataStore::new(),
            config,
            listeners: Vec::new(),
        }
    }

    /// Rebuild a stage from a snapshot.
    pub fn from_snapshot(snapshot: StageSnapshot, config: ConfigRegistry) -> Result<Self> {
        let tree = StructuralTree::from_blocks(snapshot.root, snapshot.blocks)?;
        let mut store = DataStore::new();
        for (id, record) in snapshot.records {
            if !tree.contains(id) {
                return Err(BuilderError::UnknownBlock(id));
            }
            store.update(id, record);
        }
        Ok(Self {
            tree,
            store,
            config,
            listeners: Vec::new(),
        })
    }

    pub fn to_snapshot(&self) -> StageSnapshot {
        StageSnapshot {
            root: self.tree.root(),
            blocks: self.tree.blocks().cloned().collect(),
            records: self.store.records().clone(),
        }
    }

    pub fn config(&self) -> &ConfigRegistry {
        &self.config
    }

    pub fn root(&self) -> Option<BlockId> {
        self.tree.root()
    }

    /// Register a listener for structural changes.
    pub fn on_event(&mut self, listener: impl FnMut(&StageEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: &StageEvent) {
        tracing::debug!(?event, "stage event");
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    /// Place a new block under `parent`. Nothing is created if `parent` is unknown.
    pub fn insert_block(
        &mut self,
        seed: BlockSeed,
        parent: BlockId,
        index: Option<usize>,
    ) -> Result<BlockId> {
        if !self.tree.contains(parent) {
            return Err(BuilderError::UnknownBlock(parent));
        }
        let id = self.tree.create(&seed.content_type);
        let at = self.tree.add_child(parent, id, index)?;
        self.store.update(id, seed.data);
        self.emit(&StageEvent::BlockAdded {
            parent,
            block: id,
            index: at,
        });
        Ok(id)
    }

    /// Copy a block, its subtree and their records, placing the copy right
    /// after the original.
    pub fn duplicate_child(&mut self, child: BlockId) -> Result<BlockId> {
        let parent = self.tree.parent(child).ok_or(BuilderError::NoParent(child))?;
        let index = self
            .tree
            .index_of(child)
            .ok_or(BuilderError::NoParent(child))?;

        let duplicate = self.copy_subtree(child)?;
        self.tree.add_child(parent, duplicate, Some(index + 1))?;
        self.emit(&StageEvent::BlockDuplicated {
            original: child,
            duplicate,
        });
        Ok(duplicate)
    }

    fn copy_subtree(&mut self, source: BlockId) -> Result<BlockId> {
        let block = self
            .tree
            .get(source)
            .cloned()
            .ok_or(BuilderError::UnknownBlock(source))?;

        let copy = self.tree.create(&block.content_type);
        self.tree.set_geometry(copy, block.element)?;
        if let Some(record) = self.store.get(source).cloned() {
            self.store.update(copy, record);
        }
        for child in block.children {
            let child_copy = self.copy_subtree(child)?;
            self.tree.add_child(copy, child_copy, None)?;
        }
        Ok(copy)
    }

    /// Remove a block and its subtree together with their records.
    pub fn remove_block(&mut self, id: BlockId) -> Result<Vec<BlockId>> {
        let parent = self.tree.parent(id).ok_or(BuilderError::NoParent(id))?;
        let removed = self.tree.remove_child(parent, id)?;
        for block in &removed {
            self.store.remove(*block);
        }
        self.emit(&StageEvent::BlockRemoved { parent, block: id });
        Ok(removed)
    }

    /// Options panel entries for a block.
    pub fn options_for(&self, id: BlockId) -> Result<Vec<StructuralOption>> {
        if !self.tree.contains(id) {
            return Err(BuilderError::UnknownBlock(id));
        }
        Ok(default_options())
    }

    /// Run the action behind an options panel entry.
    ///
    /// Returns the id of a block created by the action, if any.
    pub fn apply_option(&mut self, id: BlockId, code: &str) -> Result<Option<BlockId>> {
        if !self.tree.contains(id) {
            return Err(BuilderError::UnknownBlock(id));
        }
        let option =
            find_option(code).ok_or_else(|| BuilderError::Other(format!("unknown option {code}")))?;

        match option.action {
            OptionAction::None => Ok(None),
            OptionAction::Edit => {
                self.emit(&StageEvent::EditRequested { block: id });
                Ok(None)
            }
            OptionAction::Duplicate if self.is_grid_column(id) => {
                column::duplicate_column(self, id).map(Some)
            }
            OptionAction::Duplicate => self.duplicate_child(id).map(Some),
            OptionAction::Remove if self.is_grid_column(id) => {
                column::remove_column(self, id).map(|_| None)
            }
            OptionAction::Remove => self.remove_block(id).map(|_| None),
        }
    }

    /// Column whose width is governed by its column group.
    fn is_grid_column(&self, id: BlockId) -> bool {
        self.tree.get(id).is_some_and(|b| b.is_column())
            && self
                .tree
                .parent(id)
                .and_then(|p| self.tree.get(p))
                .is_some_and(|p| p.is_column_group())
    }
}
