//! Snapshots used by apply/undo/redo.
//!
//! Both memento types are self-inverting: restoring one swaps the live
//! content with the stored content, so the same memento serves undo and redo.

use std::collections::HashMap;

use super::block::BlockId;
use super::voxel::VoxelEntry;

/// Full copy of one chunk's voxels, or nothing.
///
/// An empty memento inside an [`AggregateMemento`] means "the chunk did not
/// exist on the other side of this edit".
#[derive(Clone, Debug, Default)]
pub struct GridMemento {
    pub(crate) voxels: Option<Box<[VoxelEntry]>>,
}

impl GridMemento {
    pub fn is_empty(&self) -> bool {
        self.voxels.is_none()
    }

    /// Stored voxels, if any
    pub fn voxels(&self) -> Option<&[VoxelEntry]> {
        self.voxels.as_deref()
    }
}

/// One grid memento per chunk touched by a single apply.
#[derive(Clone, Debug, Default)]
pub struct AggregateMemento {
    pub(crate) blocks: HashMap<BlockId, GridMemento>,
}

impl AggregateMemento {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chunks recorded
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.blocks.contains_key(&id)
    }

    pub fn get(&self, id: BlockId) -> Option<&GridMemento> {
        self.blocks.get(&id)
    }

    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.blocks.keys().copied()
    }
}
