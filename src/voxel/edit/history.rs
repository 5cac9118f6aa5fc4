//! Undo/redo history.
//!
//! Every entry is self-inverting: restoring it once undoes the edit and
//! leaves the entry holding what is needed to redo it.

use std::collections::HashSet;

use crate::voxel::aggregate::VoxelAggregate;
use crate::voxel::block::BlockId;
use crate::voxel::memento::AggregateMemento;
use super::layer::VoxelLayer;

/// One undoable step.
#[derive(Debug)]
pub enum HistoryEntry {
    /// A tool action baked into layer `layer`.
    EditVoxels { layer: usize, memento: AggregateMemento },
    /// A layer was inserted at `index`. `layer` holds it while undone.
    AddLayer { index: usize, layer: Option<VoxelLayer> },
    /// A layer was removed from `index`. `layer` holds it while removed.
    DeleteLayer { index: usize, layer: Option<VoxelLayer> },
}

/// How restoring an entry changed the layer list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerChange {
    Inserted(usize),
    Removed(usize),
}

impl HistoryEntry {
    /// Swap the scene state with the state stored in this entry. Block ids
    /// whose content changed are added to `changed`.
    ///
    /// Entries that no longer fit the layer list are logged and skipped.
    pub fn restore(
        &mut self,
        layers: &mut Vec<VoxelLayer>,
        changed: &mut HashSet<BlockId>,
    ) -> Option<LayerChange> {
        match self {
            HistoryEntry::EditVoxels { layer, memento } => {
                match layers.get_mut(*layer) {
                    Some(target) => target.aggregate.restore_state(memento, changed),
                    None => log::warn!("history refers to missing layer {}, ignoring", layer),
                }
                None
            }
            HistoryEntry::AddLayer { index, layer } | HistoryEntry::DeleteLayer { index, layer } => {
                toggle_layer(layers, *index, layer, changed)
            }
        }
    }
}

/// Insert the stored layer, or take the live one out into the slot.
fn toggle_layer(
    layers: &mut Vec<VoxelLayer>,
    index: usize,
    slot: &mut Option<VoxelLayer>,
    changed: &mut HashSet<BlockId>,
) -> Option<LayerChange> {
    match slot.take() {
        Some(layer) if index <= layers.len() => {
            mark_all(&layer.aggregate, changed);
            layers.insert(index, layer);
            Some(LayerChange::Inserted(index))
        }
        Some(layer) => {
            log::warn!("cannot reinsert layer at {} (have {}), ignoring", index, layers.len());
            *slot = Some(layer);
            None
        }
        None if index < layers.len() => {
            let layer = layers.remove(index);
            mark_all(&layer.aggregate, changed);
            *slot = Some(layer);
            Some(LayerChange::Removed(index))
        }
        None => {
            log::warn!("cannot remove missing layer {}, ignoring", index);
            None
        }
    }
}

fn mark_all(aggregate: &VoxelAggregate, changed: &mut HashSet<BlockId>) {
    changed.extend(aggregate.blocks().map(|(id, _)| id));
}

/// Ordered history with a cursor between the done and undone entries.
#[derive(Debug, Default)]
pub struct EditHistory {
    entries: Vec<HistoryEntry>,
    /// Number of entries currently applied
    cursor: usize,
    /// Maximum entries kept, 0 = unlimited
    limit: usize,
}

impl EditHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            limit,
        }
    }

    /// Record a new step. Anything past the cursor can no longer be redone.
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.cursor < self.entries.len() {
            log::debug!("dropping {} redo entries", self.entries.len() - self.cursor);
            self.entries.truncate(self.cursor);
        }
        self.entries.push(entry);
        self.cursor += 1;

        if self.limit > 0 && self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            log::debug!("history limit {} reached, dropping {} oldest entries", self.limit, excess);
            self.entries.drain(..excess);
            self.cursor -= excess;
        }
    }

    /// Move back one step and return the entry to restore.
    pub fn step_back(&mut self) -> Option<&mut HistoryEntry> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get_mut(self.cursor)
    }

    /// Move forward one step and return the entry to restore.
    pub fn step_forward(&mut self) -> Option<&mut HistoryEntry> {
        if self.cursor == self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get_mut(self.cursor - 1)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}
