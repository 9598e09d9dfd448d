//! Arena of structural blocks.
//!
//! Blocks own their children by id; the `parent` link is a plain id and
//! never keeps a block alive.

use std::collections::BTreeMap;

use crate::error::{BuilderError, Result};
use crate::types::{Block, BlockId, ElementGeometry};

#[derive(Debug, Clone, Default)]
pub struct StructuralTree {
    blocks: BTreeMap<BlockId, Block>,
    root: Option<BlockId>,
    next_id: u32,
}

impl StructuralTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from existing blocks, checking parent/child links agree.
    pub fn from_blocks(root: Option<BlockId>, blocks: Vec<Block>) -> Result<Self> {
        let mut tree = Self {
            blocks: BTreeMap::new(),
            root,
            next_id: 0,
        };
        for block in blocks {
            tree.next_id = tree.next_id.max(block.id.0 + 1);
            tree.blocks.insert(block.id, block);
        }

        if let Some(root) = root {
            if !tree.blocks.contains_key(&root) {
                return Err(BuilderError::UnknownBlock(root));
            }
        }
        for block in tree.blocks.values() {
            for child in &block.children {
                let linked = tree
                    .blocks
                    .get(child)
                    .ok_or(BuilderError::UnknownBlock(*child))?;
                if linked.parent != Some(block.id) {
                    return Err(BuilderError::Other(format!(
                        "block {child} is listed under {} but its parent is {:?}",
                        block.id, linked.parent
                    )));
                }
            }
            if let Some(parent) = block.parent {
                let listed = tree
                    .blocks
                    .get(&parent)
                    .is_some_and(|p| p.children.contains(&block.id));
                if !listed {
                    return Err(BuilderError::NoParent(block.id));
                }
            }
        }
        Ok(tree)
    }

    /// Create the root container. Replaces any previous root reference.
    pub fn insert_root(&mut self, content_type: &str) -> BlockId {
        let id = self.create(content_type);
        self.root = Some(id);
        id
    }

    /// Create a detached block.
    pub fn create(&mut self, content_type: &str) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.blocks.insert(id, Block::new(id, content_type));
        id
    }

    pub fn root(&self) -> Option<BlockId> {
        self.root
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(&id)
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.blocks.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// Children of a block in display order (empty for unknown blocks).
    pub fn children(&self, id: BlockId) -> &[BlockId] {
        self.blocks
            .get(&id)
            .map(|b| b.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: BlockId) -> Option<BlockId> {
        self.blocks.get(&id).and_then(|b| b.parent)
    }

    /// Position of a block among its parent's children.
    pub fn index_of(&self, id: BlockId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    pub fn geometry(&self, id: BlockId) -> Option<ElementGeometry> {
        self.blocks.get(&id).map(|b| b.element)
    }

    pub fn set_geometry(&mut self, id: BlockId, element: ElementGeometry) -> Result<()> {
        let block = self
            .blocks
            .get_mut(&id)
            .ok_or(BuilderError::UnknownBlock(id))?;
        block.element = element;
        Ok(())
    }

    /// Insert `child` under `parent` at `index`, appending when `None`.
    ///
    /// The child is detached from any previous parent first. Returns the
    /// index it ended up at.
    pub fn add_child(
        &mut self,
        parent: BlockId,
        child: BlockId,
        index: Option<usize>,
    ) -> Result<usize> {
        if !self.blocks.contains_key(&parent) {
            return Err(BuilderError::UnknownBlock(parent));
        }
        if !self.blocks.contains_key(&child) {
            return Err(BuilderError::UnknownBlock(child));
        }
        if parent == child || self.subtree(child).contains(&parent) {
            return Err(BuilderError::Other(format!(
                "cannot move {child} inside its own subtree"
            )));
        }

        self.detach(child);

        let parent_block = self
            .blocks
            .get_mut(&parent)
            .ok_or(BuilderError::UnknownBlock(parent))?;
        let at = index
            .unwrap_or(parent_block.children.len())
            .min(parent_block.children.len());
        parent_block.children.insert(at, child);

        if let Some(block) = self.blocks.get_mut(&child) {
            block.parent = Some(parent);
        }
        Ok(at)
    }

    /// Remove `child` and everything below it. Returns the removed ids.
    pub fn remove_child(&mut self, parent: BlockId, child: BlockId) -> Result<Vec<BlockId>> {
        if self.parent(child) != Some(parent) {
            return Err(BuilderError::NoParent(child));
        }
        self.detach(child);
        let removed = self.subtree(child);
        for id in &removed {
            self.blocks.remove(id);
        }
        Ok(removed)
    }

    /// Ids of a block and all of its descendants, parents before children.
    pub fn subtree(&self, id: BlockId) -> Vec<BlockId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(block) = self.blocks.get(&current) {
                out.push(current);
                stack.extend(block.children.iter().rev().copied());
            }
        }
        out
    }

    fn detach(&mut self, child: BlockId) {
        let Some(old_parent) = self.parent(child) else {
            return;
        };
        if let Some(parent_block) = self.blocks.get_mut(&old_parent) {
            parent_block.children.retain(|&c| c != child);
        }
        if let Some(block) = self.blocks.get_mut(&child) {
            block.parent = None;
        }
    }
}
