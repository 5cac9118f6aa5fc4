//! Editing session: layers, tool layer, render layer and history.
//!
//! Writes go into a throwaway tool layer while a gesture is in progress and
//! are baked into the active layer by [`Scene::complete_tool_action`]. The
//! render layer mirrors every visible layer plus the tool layer and is the
//! only aggregate that gets tesselated.

use std::collections::{HashMap, HashSet};

use crate::core::config::{EditorConfig, RenderMode, RenderOptions};
use crate::core::error::Error;
use crate::core::types::{IVec3, Result};
use crate::math::{GroundPlane, Ray, RayHit};
use crate::voxel::aggregate::VoxelAggregate;
use crate::voxel::block::{BlockId, DirtyVolume};
use crate::voxel::memento::AggregateMemento;
use crate::voxel::mesh::ChunkMesh;
use crate::voxel::tools::{flood_fill, FaceSelection, FillNeighbourhood};
use crate::voxel::voxel::VoxelEntry;
use super::history::{EditHistory, HistoryEntry, LayerChange};
use super::layer::VoxelLayer;

/// A voxel document being edited.
#[derive(Debug)]
pub struct Scene {
    layers: Vec<VoxelLayer>,
    active_layer: usize,
    tool_layer: VoxelAggregate,
    render_layer: VoxelAggregate,
    /// Blocks whose render-layer content is stale
    changed_blocks: HashSet<BlockId>,
    /// Touched voxels per block since the last mesh rebuild
    dirty_volumes: HashMap<BlockId, DirtyVolume>,
    template: VoxelEntry,
    ground: GroundPlane,
    render_options: RenderOptions,
    history: EditHistory,
    layers_created: usize,
}

impl Default for Scene {
    fn default() -> Self {
        Self::with_config(&EditorConfig::default())
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene with one empty layer.
    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            layers: vec![VoxelLayer::new("Layer 1")],
            active_layer: 0,
            tool_layer: VoxelAggregate::new(),
            render_layer: VoxelAggregate::new(),
            changed_blocks: HashSet::new(),
            dirty_volumes: HashMap::new(),
            template: config.template_voxel(),
            ground: GroundPlane::horizontal(config.ground_level, config.ground_radius),
            render_options: config.render,
            history: EditHistory::new(config.history_limit),
            layers_created: 1,
        }
    }

    pub fn layers(&self) -> &[VoxelLayer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&VoxelLayer> {
        self.layers.get(index)
    }

    pub fn active_layer_index(&self) -> usize {
        self.active_layer
    }

    pub fn active_layer(&self) -> &VoxelLayer {
        &self.layers[self.active_layer]
    }

    pub fn tool_layer(&self) -> &VoxelAggregate {
        &self.tool_layer
    }

    pub fn render_layer(&self) -> &VoxelAggregate {
        &self.render_layer
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn template(&self) -> VoxelEntry {
        self.template
    }

    pub fn set_template(&mut self, template: VoxelEntry) {
        self.template = template;
    }

    pub fn render_options(&self) -> RenderOptions {
        self.render_options
    }

    /// Switch render mode. Every rendered block needs a new mesh.
    pub fn set_render_options(&mut self, options: RenderOptions) {
        if self.render_options == options {
            return;
        }
        self.render_options = options;
        let ids: Vec<BlockId> = self.render_layer.blocks().map(|(id, _)| id).collect();
        for id in ids {
            self.dirty_volumes.insert(id, DirtyVolume::whole_block(id));
        }
    }

    /// Write a voxel into the tool layer.
    pub fn set_voxel(&mut self, pos: IVec3, entry: VoxelEntry) {
        let id = self.tool_layer.set_voxel(pos, entry);
        self.changed_blocks.insert(id);
        self.dirty_volumes
            .entry(id)
            .and_modify(|volume| volume.add_position(pos))
            .or_insert_with(|| DirtyVolume::from_position(pos));
    }

    /// Write an erase marker into the tool layer.
    pub fn erase_voxel(&mut self, pos: IVec3) {
        self.set_voxel(pos, VoxelEntry::ERASED);
    }

    /// Write the template voxel into the tool layer.
    pub fn paint_template(&mut self, pos: IVec3) {
        self.set_voxel(pos, self.template);
    }

    /// Voxel of the active layer; pending tool writes are not visible here.
    pub fn get_voxel(&self, pos: IVec3) -> Option<&VoxelEntry> {
        self.active_layer().aggregate.voxel(pos)
    }

    /// Drop the pending tool layer without applying it.
    pub fn cancel_tool_action(&mut self) {
        self.mark_blocks_changed(self.tool_layer.blocks().map(|(id, _)| id).collect());
        self.tool_layer.clear();
    }

    /// Bake the tool layer into the active layer and record the step.
    /// Returns false when there was nothing to apply.
    pub fn complete_tool_action(&mut self) -> bool {
        if self.tool_layer.is_empty() {
            return false;
        }
        let mut memento = AggregateMemento::new();
        let layer = self.active_layer;
        self.layers[layer].aggregate.apply_changes(&self.tool_layer, &mut memento);
        self.changed_blocks.extend(self.tool_layer.blocks().map(|(id, _)| id));
        self.tool_layer.clear();

        if memento.is_empty() {
            return false;
        }
        log::debug!("applied tool action on layer {} touching {} blocks", layer, memento.len());
        self.history.push(HistoryEntry::EditVoxels { layer, memento });
        true
    }

    /// Repaint the connected region around `start` on the active layer with
    /// the template and record it as one step. Returns the voxel count.
    pub fn flood_fill(&mut self, start: IVec3, neighbourhood: FillNeighbourhood) -> usize {
        let region = flood_fill(&self.active_layer().aggregate, start, neighbourhood);
        for &pos in &region {
            self.paint_template(pos);
        }
        if !region.is_empty() {
            self.complete_tool_action();
        }
        region.len()
    }

    /// Move a pending extrusion from height `from` to `to` in the tool layer.
    /// Finish with [`Scene::complete_tool_action`].
    pub fn extrude(&mut self, selection: &FaceSelection, from: i32, to: i32) {
        let entry = if to > from { self.template } else { VoxelEntry::EMPTY };
        for pos in selection.extrude_positions(from, to) {
            self.set_voxel(pos, entry);
        }
    }

    /// Bring the render layer up to date for every changed block.
    pub fn update(&mut self) {
        if self.changed_blocks.is_empty() {
            return;
        }
        let ids: Vec<BlockId> = self.changed_blocks.drain().collect();
        self.render_layer.clear_blocks(ids.iter().copied());
        for layer in self.layers.iter().filter(|layer| layer.visible) {
            self.render_layer.merge_blocks(&layer.aggregate, ids.iter().copied());
        }
        self.render_layer.merge_blocks(&self.tool_layer, ids.iter().copied());
    }

    /// Blocks whose mesh must be rebuilt, including neighbours across a
    /// touched chunk face and render chunks not meshed since their last
    /// change. Resets the dirty volumes.
    pub fn take_dirty_blocks(&mut self) -> HashSet<BlockId> {
        let mut out = HashSet::new();
        for (_, volume) in self.dirty_volumes.drain() {
            VoxelAggregate::mark_dirty_blocks(&volume, &mut out);
        }
        out.extend(self.render_layer.dirty_blocks());
        out
    }

    /// Pick against the active layer, falling back to the ground plane.
    pub fn ray_intersect(&self, ray: &Ray) -> Option<RayHit> {
        self.active_layer()
            .aggregate
            .ray_intersect(ray)
            .or_else(|| self.ground.ray_intersect(ray))
    }

    /// Tesselate one block of the render layer into `mesh` and clear the
    /// chunk's dirty flag. Returns false (and leaves `mesh` empty) if the
    /// block has no content.
    pub fn build_mesh(&self, id: BlockId, mesh: &mut ChunkMesh) -> bool {
        let Some(grid) = self.render_layer.block(id) else {
            mesh.clear();
            return false;
        };
        let neighbours = self.render_layer.neighbours(grid.origin());
        match self.render_options.mode {
            RenderMode::Full => grid.tesselate(mesh, &neighbours),
            RenderMode::Slice { axis, level } => grid.tesselate_slice(mesh, &neighbours, axis, level),
        }
        grid.clear_dirty();
        true
    }

    /// Insert an empty layer at `index` and make it active.
    pub fn create_layer(&mut self, index: usize) -> Result<()> {
        if index > self.layers.len() {
            return Err(Error::Layer(format!(
                "cannot insert layer at {} (have {})",
                index,
                self.layers.len()
            )));
        }
        self.layers_created += 1;
        self.layers.insert(index, VoxelLayer::new(format!("Layer {}", self.layers_created)));
        self.active_layer = index;
        self.history.push(HistoryEntry::AddLayer { index, layer: None });
        Ok(())
    }

    /// Remove the layer at `index`. The last remaining layer cannot be deleted.
    pub fn delete_layer(&mut self, index: usize) -> Result<()> {
        self.check_layer(index)?;
        if self.layers.len() == 1 {
            return Err(Error::Layer("cannot delete the last layer".to_string()));
        }
        let layer = self.layers.remove(index);
        self.mark_blocks_changed(layer.aggregate.blocks().map(|(id, _)| id).collect());
        if self.active_layer > index || self.active_layer == self.layers.len() {
            self.active_layer -= 1;
        }
        self.history.push(HistoryEntry::DeleteLayer { index, layer: Some(layer) });
        Ok(())
    }

    pub fn set_active_layer(&mut self, index: usize) -> Result<()> {
        self.check_layer(index)?;
        self.active_layer = index;
        Ok(())
    }

    pub fn set_layer_visible(&mut self, index: usize, visible: bool) -> Result<()> {
        self.check_layer(index)?;
        let layer = &mut self.layers[index];
        if layer.visible != visible {
            layer.visible = visible;
            let ids = layer.aggregate.blocks().map(|(id, _)| id).collect();
            self.mark_blocks_changed(ids);
        }
        Ok(())
    }

    pub fn rename_layer(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        self.check_layer(index)?;
        self.layers[index].name = name.into();
        Ok(())
    }

    /// Undo the last step. Pending tool writes are discarded first.
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.cancel_tool_action();
        let mut changed = HashSet::new();
        let layer_change = match self.history.step_back() {
            Some(entry) => entry.restore(&mut self.layers, &mut changed),
            None => return false,
        };
        self.after_restore(changed, layer_change);
        true
    }

    /// Redo the next step. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.cancel_tool_action();
        let mut changed = HashSet::new();
        let layer_change = match self.history.step_forward() {
            Some(entry) => entry.restore(&mut self.layers, &mut changed),
            None => return false,
        };
        self.after_restore(changed, layer_change);
        true
    }

    /// Keep the active index on the same layer when one is inserted or
    /// removed below it.
    fn after_restore(&mut self, changed: HashSet<BlockId>, layer_change: Option<LayerChange>) {
        match layer_change {
            Some(LayerChange::Inserted(index)) if index <= self.active_layer => self.active_layer += 1,
            Some(LayerChange::Removed(index)) if index < self.active_layer => self.active_layer -= 1,
            _ => {}
        }
        if self.active_layer >= self.layers.len() {
            self.active_layer = self.layers.len().saturating_sub(1);
        }
        self.mark_blocks_changed(changed.into_iter().collect());
    }

    /// Whole blocks changed outside the tool layer.
    fn mark_blocks_changed(&mut self, ids: Vec<BlockId>) {
        for id in ids {
            self.changed_blocks.insert(id);
            self.dirty_volumes.insert(id, DirtyVolume::whole_block(id));
        }
    }

    fn check_layer(&self, index: usize) -> Result<()> {
        if index < self.layers.len() {
            Ok(())
        } else {
            Err(Error::Layer(format!(
                "no layer {} (have {})",
                index,
                self.layers.len()
            )))
        }
    }
}
