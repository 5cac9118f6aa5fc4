//! Sparse, copy-on-write map of chunks forming one voxel layer.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::core::types::IVec3;
use crate::math::{IBox, Ray, RayHit};
use super::block::{local_pos, BlockId, DirtyVolume, GRID_LEN};
use super::grid::{index_pos, VoxelGrid};
use super::memento::{AggregateMemento, GridMemento};
use super::voxel::VoxelEntry;

/// A sparse voxel volume: block id -> shared chunk.
///
/// Cloning an aggregate shares every chunk with the source. Chunks are only
/// ever mutated through [`Arc::make_mut`], so a chunk reachable from two
/// aggregates is privately copied before the first write.
#[derive(Clone, Debug, Default)]
pub struct VoxelAggregate {
    blocks: HashMap<BlockId, Arc<VoxelGrid>>,
}

/// Get a mutable chunk, copying it first if another aggregate references it.
fn make_private(id: BlockId, grid: &mut Arc<VoxelGrid>) -> &mut VoxelGrid {
    if Arc::strong_count(grid) > 1 {
        log::trace!("block {:?} is shared, creating private copy", id.origin());
    }
    Arc::make_mut(grid)
}

impl VoxelAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a voxel, creating its chunk on demand. Returns the touched block.
    pub fn set_voxel(&mut self, pos: IVec3, entry: VoxelEntry) -> BlockId {
        let id = BlockId::from_pos(pos);
        let grid = self.blocks.entry(id).or_insert_with(|| {
            log::debug!("creating grid at {:?}", id.origin());
            Arc::new(VoxelGrid::new(id.origin()))
        });
        make_private(id, grid).set_voxel(local_pos(pos), entry);
        id
    }

    /// Read a voxel. Missing chunks and missing voxels both read as None
    /// or an entry without the non-empty flag.
    pub fn voxel(&self, pos: IVec3) -> Option<&VoxelEntry> {
        self.blocks
            .get(&BlockId::from_pos(pos))
            .and_then(|grid| grid.voxel(local_pos(pos)))
    }

    /// Nearest collidable voxel along the ray, in world coordinates.
    ///
    /// Tests every chunk; layers are small enough that no acceleration
    /// structure is kept.
    pub fn ray_intersect(&self, ray: &Ray) -> Option<RayHit> {
        let mut nearest: Option<RayHit> = None;
        for grid in self.blocks.values() {
            if let Some(mut hit) = grid.ray_intersect(ray) {
                if nearest.is_none_or(|n| hit.t < n.t) {
                    hit.position += grid.origin();
                    nearest = Some(hit);
                }
            }
        }
        nearest
    }

    /// Drop every chunk.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Drop the given chunks.
    pub fn clear_blocks(&mut self, ids: impl IntoIterator<Item = BlockId>) {
        for id in ids {
            self.blocks.remove(&id);
        }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn contains_block(&self, id: BlockId) -> bool {
        self.blocks.contains_key(&id)
    }

    /// Chunk for a block id. Do not hold on to it across a mutating call.
    pub fn block(&self, id: BlockId) -> Option<&VoxelGrid> {
        self.blocks.get(&id).map(|grid| grid.as_ref())
    }

    pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &VoxelGrid)> {
        self.blocks.iter().map(|(id, grid)| (*id, grid.as_ref()))
    }

    /// Chunks modified since they were last meshed.
    pub fn dirty_blocks(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.blocks
            .iter()
            .filter(|(_, grid)| grid.is_dirty())
            .map(|(id, _)| *id)
    }

    /// Whether a chunk is currently referenced by more than one aggregate.
    pub fn is_shared(&self, id: BlockId) -> bool {
        self.blocks.get(&id).is_some_and(|grid| Arc::strong_count(grid) > 1)
    }

    /// Every non-empty voxel with its world position.
    pub fn voxels(&self) -> impl Iterator<Item = (IVec3, &VoxelEntry)> {
        self.blocks.values().flat_map(|grid| {
            let origin = grid.origin();
            grid.voxels()
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_non_empty())
                .map(move |(i, v)| (origin + index_pos(i), v))
        })
    }

    /// Overlay every chunk of `top` onto this aggregate.
    pub fn merge(&mut self, top: &VoxelAggregate) {
        self.merge_blocks(top, top.blocks.keys().copied());
    }

    /// Overlay the chunks of `top` listed in `ids`.
    ///
    /// Chunks this aggregate lacks are shared, not copied. Chunks it already
    /// references are left alone; distinct chunks are merged voxel by voxel.
    pub fn merge_blocks(&mut self, top: &VoxelAggregate, ids: impl IntoIterator<Item = BlockId>) {
        for id in ids {
            let Some(top_grid) = top.blocks.get(&id) else {
                continue;
            };
            match self.blocks.entry(id) {
                Entry::Vacant(e) => {
                    e.insert(Arc::clone(top_grid));
                }
                Entry::Occupied(mut e) => {
                    if !Arc::ptr_eq(e.get(), top_grid) {
                        make_private(id, e.get_mut()).merge(top_grid);
                    }
                }
            }
        }
    }

    /// Bake a tool layer into this aggregate, recording one grid memento per
    /// touched chunk. Chunks left without voxels are removed; their memento
    /// keeps the previous content. A chunk created here gets an empty memento.
    /// Chunks whose content ends up identical are not recorded.
    pub fn apply_changes(&mut self, tool: &VoxelAggregate, memento: &mut AggregateMemento) {
        for (&id, tool_grid) in &tool.blocks {
            match self.blocks.entry(id) {
                Entry::Vacant(e) => {
                    let mut grid = VoxelGrid::new(tool_grid.origin());
                    if grid.apply_changes(tool_grid, None) == 0 {
                        log::debug!("grid at {:?} still empty, skipping", id.origin());
                        continue;
                    }
                    e.insert(Arc::new(grid));
                    memento.blocks.insert(id, GridMemento::default());
                }
                Entry::Occupied(mut e) => {
                    let mut grid_memento = GridMemento::default();
                    let grid = make_private(id, e.get_mut());
                    let remaining = grid.apply_changes(tool_grid, Some(&mut grid_memento));
                    let unchanged = grid_memento.voxels() == Some(grid.voxels());
                    if remaining == 0 {
                        log::debug!("grid at {:?} now empty, removing", id.origin());
                        e.remove();
                    }
                    if unchanged {
                        log::trace!("grid at {:?} unchanged, not recorded", id.origin());
                        continue;
                    }
                    memento.blocks.insert(id, grid_memento);
                }
            }
        }
    }

    /// Swap every recorded chunk with its memento.
    ///
    /// A non-empty grid memento restores (or recreates) the chunk; an empty
    /// one means the chunk must not exist, so its content is saved into the
    /// memento and the chunk removed. Every touched id goes into `changed`.
    pub fn restore_state(&mut self, memento: &mut AggregateMemento, changed: &mut HashSet<BlockId>) {
        for (&id, grid_memento) in memento.blocks.iter_mut() {
            if !grid_memento.is_empty() {
                match self.blocks.entry(id) {
                    Entry::Vacant(e) => {
                        e.insert(Arc::new(VoxelGrid::from_memento(id.origin(), grid_memento)));
                    }
                    Entry::Occupied(mut e) => {
                        make_private(id, e.get_mut()).restore_state(grid_memento);
                    }
                }
            } else {
                match self.blocks.remove(&id) {
                    Some(grid) => grid.save_state(grid_memento),
                    None => log::warn!(
                        "unexpected erase of already absent grid at {:?}, ignoring",
                        id.origin()
                    ),
                }
            }
            changed.insert(id);
        }
    }

    /// Block ids whose mesh depends on voxels inside `volume`.
    ///
    /// `volume` must lie within one chunk. When it touches a chunk face the
    /// chunk across that face is included as well, up to 27 ids for a volume
    /// reaching every face.
    pub fn mark_dirty_blocks(volume: &DirtyVolume, out: &mut HashSet<BlockId>) {
        let mut start = IVec3::ZERO;
        let mut end = IVec3::ZERO;
        let low = local_pos(volume.low);
        let high = local_pos(volume.high);
        for axis in 0..3 {
            if low[axis] == 0 {
                start[axis] = -1;
            }
            if high[axis] == GRID_LEN - 1 {
                end[axis] = 1;
            }
        }
        for z in start.z..=end.z {
            for y in start.y..=end.y {
                for x in start.x..=end.x {
                    out.insert(BlockId::from_pos(volume.low + IVec3::new(x, y, z) * GRID_LEN));
                }
            }
        }
    }

    /// The 3x3x3 chunks around `origin` (index 13 is the chunk itself),
    /// ordered x fastest, then y, then z.
    pub fn neighbours(&self, origin: IVec3) -> [Option<&VoxelGrid>; 27] {
        std::array::from_fn(|i| {
            let i = i as i32;
            let offset = IVec3::new(i % 3 - 1, (i / 3) % 3 - 1, i / 9 - 1);
            self.block(BlockId::from_pos(origin + offset * GRID_LEN))
        })
    }

    /// Union of all chunk bounds, None when empty.
    pub fn bound(&self) -> Option<IBox> {
        self.blocks.values().map(|grid| grid.bound()).reduce(|mut acc, b| {
            acc.join(&b);
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;
    use crate::math::HitFace;

    fn red() -> VoxelEntry {
        VoxelEntry::solid(255, 0, 0, 255)
    }

    fn blue() -> VoxelEntry {
        VoxelEntry::solid(0, 0, 255, 255)
    }

    #[test]
    fn test_write_read() {
        let mut ag = VoxelAggregate::new();
        for pos in [IVec3::new(0, 0, 0), IVec3::new(-1, -1, -1), IVec3::new(17, -33, 100)] {
            let id = ag.set_voxel(pos, red());
            assert_eq!(id, BlockId::from_pos(pos));
            assert_eq!(ag.voxel(pos), Some(&red()));
        }
        assert_eq!(ag.block_count(), 3);
        assert_eq!(ag.voxel(IVec3::new(500, 0, 0)), None);
        assert!(!ag.voxel(IVec3::new(1, 0, 0)).unwrap().is_non_empty());
    }

    #[test]
    fn test_clone_is_copy_on_write() {
        let mut a = VoxelAggregate::new();
        let pos = IVec3::new(4, 5, 6);
        let id = a.set_voxel(pos, red());

        let mut b = a.clone();
        assert!(a.is_shared(id));
        b.set_voxel(pos, blue());
        b.set_voxel(IVec3::new(4, 5, 7), blue());

        assert_eq!(a.voxel(pos), Some(&red()));
        assert!(!a.voxel(IVec3::new(4, 5, 7)).unwrap().is_non_empty());
        assert_eq!(b.voxel(pos), Some(&blue()));
        assert!(!a.is_shared(id));
    }

    #[test]
    fn test_clone_from_replaces_content() {
        let mut a = VoxelAggregate::new();
        a.set_voxel(IVec3::ZERO, red());
        let mut b = VoxelAggregate::new();
        b.set_voxel(IVec3::new(100, 0, 0), blue());

        b.clone_from(&a);
        assert_eq!(b.block_count(), 1);
        assert_eq!(b.voxel(IVec3::ZERO), Some(&red()));
        assert_eq!(b.voxel(IVec3::new(100, 0, 0)), None);
    }

    #[test]
    fn test_apply_and_restore_roundtrip() {
        let mut editing = VoxelAggregate::new();
        editing.set_voxel(IVec3::new(1, 1, 1), red());
        editing.set_voxel(IVec3::new(2, 1, 1), red());

        let mut tool = VoxelAggregate::new();
        tool.set_voxel(IVec3::new(1, 1, 1), VoxelEntry::ERASED);
        tool.set_voxel(IVec3::new(2, 1, 1), blue());
        tool.set_voxel(IVec3::new(40, 1, 1), blue());

        let mut memento = AggregateMemento::new();
        editing.apply_changes(&tool, &mut memento);
        assert_eq!(memento.len(), 2);
        assert!(!editing.voxel(IVec3::new(1, 1, 1)).unwrap().is_non_empty());
        assert_eq!(editing.voxel(IVec3::new(2, 1, 1)), Some(&blue()));
        assert_eq!(editing.voxel(IVec3::new(40, 1, 1)), Some(&blue()));

        // undo
        let mut changed = HashSet::new();
        editing.restore_state(&mut memento, &mut changed);
        assert_eq!(changed.len(), 2);
        assert_eq!(editing.voxel(IVec3::new(1, 1, 1)), Some(&red()));
        assert_eq!(editing.voxel(IVec3::new(2, 1, 1)), Some(&red()));
        assert_eq!(editing.voxel(IVec3::new(40, 1, 1)), None);
        assert_eq!(editing.block_count(), 1);

        // redo
        changed.clear();
        editing.restore_state(&mut memento, &mut changed);
        assert!(!editing.voxel(IVec3::new(1, 1, 1)).unwrap().is_non_empty());
        assert_eq!(editing.voxel(IVec3::new(2, 1, 1)), Some(&blue()));
        assert_eq!(editing.voxel(IVec3::new(40, 1, 1)), Some(&blue()));
        assert_eq!(editing.block_count(), 2);
    }

    #[test]
    fn test_chunk_eviction_and_recreation() {
        let mut editing = VoxelAggregate::new();
        let pos = IVec3::new(-3, 20, 7);
        let id = editing.set_voxel(pos, red());

        let mut tool = VoxelAggregate::new();
        tool.set_voxel(pos, VoxelEntry::ERASED);
        let mut memento = AggregateMemento::new();
        editing.apply_changes(&tool, &mut memento);
        assert!(!editing.contains_block(id));
        assert!(!memento.get(id).unwrap().is_empty());

        let mut changed = HashSet::new();
        editing.restore_state(&mut memento, &mut changed);
        assert!(editing.contains_block(id));
        assert_eq!(editing.voxel(pos), Some(&red()));
        assert!(memento.get(id).unwrap().is_empty());

        editing.restore_state(&mut memento, &mut changed);
        assert!(!editing.contains_block(id));
    }

    #[test]
    fn test_apply_erase_into_nothing_records_nothing() {
        let mut editing = VoxelAggregate::new();
        let mut tool = VoxelAggregate::new();
        tool.set_voxel(IVec3::new(5, 5, 5), VoxelEntry::ERASED);
        let mut memento = AggregateMemento::new();
        editing.apply_changes(&tool, &mut memento);
        assert!(memento.is_empty());
        assert!(editing.is_empty());
    }

    #[test]
    fn test_apply_without_effect_records_nothing() {
        let mut editing = VoxelAggregate::new();
        editing.set_voxel(IVec3::new(1, 1, 1), red());
        let mut tool = VoxelAggregate::new();
        tool.set_voxel(IVec3::new(5, 5, 5), VoxelEntry::ERASED);
        tool.set_voxel(IVec3::new(1, 1, 1), red());
        tool.set_voxel(IVec3::new(20, 1, 1), blue());

        let mut memento = AggregateMemento::new();
        editing.apply_changes(&tool, &mut memento);
        assert_eq!(memento.len(), 1);
        assert!(!memento.contains(BlockId::from_pos(IVec3::ZERO)));
        assert_eq!(editing.voxel(IVec3::new(1, 1, 1)), Some(&red()));
        assert_eq!(editing.voxel(IVec3::new(20, 1, 1)), Some(&blue()));
    }

    #[test]
    fn test_apply_does_not_touch_shared_chunk() {
        let mut editing = VoxelAggregate::new();
        editing.set_voxel(IVec3::ZERO, red());
        let render = editing.clone();

        let mut tool = VoxelAggregate::new();
        tool.set_voxel(IVec3::ZERO, VoxelEntry::ERASED);
        let mut memento = AggregateMemento::new();
        editing.apply_changes(&tool, &mut memento);

        assert_eq!(render.voxel(IVec3::ZERO), Some(&red()));
        assert!(editing.is_empty());
    }

    #[test]
    fn test_restore_does_not_touch_shared_chunk() {
        let mut editing = VoxelAggregate::new();
        let pos = IVec3::new(1, 1, 1);
        editing.set_voxel(pos, red());
        editing.set_voxel(IVec3::new(2, 1, 1), red());

        let mut tool = VoxelAggregate::new();
        tool.set_voxel(pos, VoxelEntry::ERASED);
        let mut memento = AggregateMemento::new();
        editing.apply_changes(&tool, &mut memento);

        let render = editing.clone();
        let id = BlockId::from_pos(pos);
        assert!(editing.is_shared(id));

        let mut changed = HashSet::new();
        editing.restore_state(&mut memento, &mut changed);
        assert!(!render.voxel(pos).unwrap().is_non_empty());
        assert_eq!(editing.voxel(pos), Some(&red()));
        assert!(!editing.is_shared(id));
    }

    #[test]
    fn test_restore_of_absent_chunk_is_noop() {
        let mut editing = VoxelAggregate::new();
        let mut tool = VoxelAggregate::new();
        tool.set_voxel(IVec3::ZERO, red());
        let mut memento = AggregateMemento::new();
        editing.apply_changes(&tool, &mut memento);

        // history confusion: chunk vanished behind the memento's back
        editing.clear();
        let mut changed = HashSet::new();
        editing.restore_state(&mut memento, &mut changed);
        assert!(editing.is_empty());
        assert_eq!(changed.len(), 1);
    }

    #[test]
    fn test_merge_shares_and_overlays() {
        let mut editing = VoxelAggregate::new();
        editing.set_voxel(IVec3::new(1, 0, 0), red());
        editing.set_voxel(IVec3::new(2, 0, 0), red());
        let mut tool = VoxelAggregate::new();
        tool.set_voxel(IVec3::new(1, 0, 0), VoxelEntry::ERASED);
        tool.set_voxel(IVec3::new(3, 0, 0), blue());
        tool.set_voxel(IVec3::new(50, 0, 0), blue());

        let mut render = VoxelAggregate::new();
        render.merge(&editing);
        let id = BlockId::from_pos(IVec3::ZERO);
        assert!(editing.is_shared(id));

        render.merge(&tool);
        assert!(!render.voxel(IVec3::new(1, 0, 0)).unwrap().is_non_empty());
        assert_eq!(render.voxel(IVec3::new(2, 0, 0)), Some(&red()));
        assert_eq!(render.voxel(IVec3::new(3, 0, 0)), Some(&blue()));
        assert_eq!(render.voxel(IVec3::new(50, 0, 0)), Some(&blue()));
        // source layers untouched
        assert_eq!(editing.voxel(IVec3::new(1, 0, 0)), Some(&red()));
        assert!(tool.is_shared(BlockId::from_pos(IVec3::new(50, 0, 0))));
    }

    #[test]
    fn test_merge_blocks_subset() {
        let mut top = VoxelAggregate::new();
        let a = top.set_voxel(IVec3::new(0, 0, 0), red());
        let b = top.set_voxel(IVec3::new(16, 0, 0), red());
        let mut render = VoxelAggregate::new();
        render.merge_blocks(&top, [a]);
        assert!(render.contains_block(a));
        assert!(!render.contains_block(b));
    }

    #[test]
    fn test_dirty_blocks_follow_writes() {
        let mut ag = VoxelAggregate::new();
        let a = ag.set_voxel(IVec3::ZERO, red());
        let b = ag.set_voxel(IVec3::new(16, 0, 0), red());
        assert_eq!(ag.dirty_blocks().count(), 2);

        let mirror = ag.clone();
        for (_, grid) in mirror.blocks() {
            grid.clear_dirty();
        }
        assert_eq!(ag.dirty_blocks().count(), 0);

        ag.set_voxel(IVec3::new(1, 0, 0), blue());
        assert_eq!(ag.dirty_blocks().collect::<Vec<_>>(), vec![a]);
        assert!(!mirror.block(a).unwrap().is_dirty());
        assert!(!ag.block(b).unwrap().is_dirty());
    }

    #[test]
    fn test_clear_blocks() {
        let mut ag = VoxelAggregate::new();
        let a = ag.set_voxel(IVec3::new(0, 0, 0), red());
        let b = ag.set_voxel(IVec3::new(0, 16, 0), red());
        ag.clear_blocks([a]);
        assert!(!ag.contains_block(a));
        assert!(ag.contains_block(b));
        ag.clear();
        assert!(ag.is_empty());
        assert!(ag.bound().is_none());
    }

    #[test]
    fn test_ray_picks_nearest_chunk() {
        let mut ag = VoxelAggregate::new();
        ag.set_voxel(IVec3::new(40, 2, 2), blue());
        ag.set_voxel(IVec3::new(20, 2, 2), red());
        ag.set_voxel(IVec3::new(-10, 2, 2), red());

        let ray = Ray::new(Vec3::new(0.5, 2.5, 2.5), Vec3::X);
        let hit = ag.ray_intersect(&ray).unwrap();
        assert_eq!(hit.position, IVec3::new(20, 2, 2));
        assert_eq!(hit.face, Some(HitFace { axis: 0, negative: false }));
        assert!((hit.t - 19.5).abs() < 1e-4);
        assert_eq!(hit.adjacent_voxel(), IVec3::new(19, 2, 2));

        let back = Ray::new(Vec3::new(0.5, 2.5, 2.5), -Vec3::X);
        assert_eq!(ag.ray_intersect(&back).unwrap().position, IVec3::new(-10, 2, 2));

        let miss = Ray::new(Vec3::new(0.5, 7.5, 2.5), Vec3::X);
        assert!(ag.ray_intersect(&miss).is_none());
    }

    fn dirty_count(low: IVec3, high: IVec3) -> HashSet<BlockId> {
        let mut out = HashSet::new();
        VoxelAggregate::mark_dirty_blocks(&DirtyVolume { low, high }, &mut out);
        out
    }

    #[test]
    fn test_mark_dirty_interior() {
        let out = dirty_count(IVec3::new(3, 4, 5), IVec3::new(6, 7, 8));
        assert_eq!(out.len(), 1);
        assert!(out.contains(&BlockId::from_pos(IVec3::ZERO)));
    }

    #[test]
    fn test_mark_dirty_min_face() {
        let out = dirty_count(IVec3::new(16, 20, 20), IVec3::new(18, 22, 22));
        assert_eq!(out.len(), 2);
        assert!(out.contains(&BlockId::from_pos(IVec3::new(16, 16, 16))));
        assert!(out.contains(&BlockId::from_pos(IVec3::new(0, 16, 16))));
    }

    #[test]
    fn test_mark_dirty_max_face_and_corner() {
        let out = dirty_count(IVec3::new(-5, 3, 3), IVec3::new(-1, 3, 3));
        assert_eq!(out.len(), 2);
        assert!(out.contains(&BlockId::from_pos(IVec3::new(0, 0, 0))));

        let corner = dirty_count(IVec3::new(0, 0, 0), IVec3::new(0, 0, 0));
        assert_eq!(corner.len(), 8);

        let whole = dirty_count(IVec3::new(0, 0, 0), IVec3::new(15, 15, 15));
        assert_eq!(whole.len(), 27);
    }

    #[test]
    fn test_neighbours() {
        let mut ag = VoxelAggregate::new();
        ag.set_voxel(IVec3::new(0, 0, 0), red());
        ag.set_voxel(IVec3::new(-16, 0, 0), red());
        ag.set_voxel(IVec3::new(16, 16, 16), red());

        let n = ag.neighbours(IVec3::ZERO);
        assert_eq!(n.iter().filter(|g| g.is_some()).count(), 3);
        assert_eq!(n[13].unwrap().origin(), IVec3::ZERO);
        assert_eq!(n[12].unwrap().origin(), IVec3::new(-16, 0, 0));
        assert_eq!(n[26].unwrap().origin(), IVec3::new(16, 16, 16));
    }

    #[test]
    fn test_bound_and_voxel_iter() {
        let mut ag = VoxelAggregate::new();
        ag.set_voxel(IVec3::new(-1, 0, 0), red());
        ag.set_voxel(IVec3::new(20, 5, 33), blue());
        let bound = ag.bound().unwrap();
        assert_eq!(bound.min, IVec3::new(-16, 0, 0));
        assert_eq!(bound.max, IVec3::new(32, 16, 48));

        let mut voxels: Vec<_> = ag.voxels().map(|(p, v)| (p, *v)).collect();
        voxels.sort_by_key(|(p, _)| p.x);
        assert_eq!(voxels, vec![(IVec3::new(-1, 0, 0), red()), (IVec3::new(20, 5, 33), blue())]);
    }
}
