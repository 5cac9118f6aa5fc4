//! Dense 16x16x16 voxel chunk

use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::types::{IVec3, Vec3};
use crate::math::{Aabb, HitFace, IBox, Ray, RayHit};
use super::block::{BlockId, GRID_LEN, GRID_VOLUME};
use super::memento::GridMemento;
use super::voxel::{flags, VoxelEntry};

/// Linear index of a chunk-local position (x fastest, then y, then z)
#[inline]
pub fn voxel_index(local: IVec3) -> usize {
    (local.x + local.y * GRID_LEN + local.z * GRID_LEN * GRID_LEN) as usize
}

/// Chunk-local position of a linear index
#[inline]
pub fn index_pos(index: usize) -> IVec3 {
    let i = index as i32;
    IVec3::new(i & (GRID_LEN - 1), (i >> 4) & (GRID_LEN - 1), i >> 8)
}

fn in_grid(local: IVec3) -> bool {
    local.cmpge(IVec3::ZERO).all() && local.cmplt(IVec3::splat(GRID_LEN)).all()
}

/// One fixed-size dense chunk anchored at a chunk-aligned origin.
#[derive(Debug)]
pub struct VoxelGrid {
    origin: IVec3,
    voxels: Box<[VoxelEntry]>,
    /// Set on every mutation; cleared once the chunk has been meshed.
    /// Atomic so a mesh consumer can clear it on a shared chunk.
    dirty: AtomicBool,
}

impl Clone for VoxelGrid {
    fn clone(&self) -> Self {
        Self {
            origin: self.origin,
            voxels: self.voxels.clone(),
            dirty: AtomicBool::new(self.is_dirty()),
        }
    }
}

impl VoxelGrid {
    /// Create an empty chunk. `origin` must be chunk-aligned.
    pub fn new(origin: IVec3) -> Self {
        debug_assert_eq!(origin, super::block::chunk_origin(origin));
        Self {
            origin,
            voxels: vec![VoxelEntry::EMPTY; GRID_VOLUME].into_boxed_slice(),
            dirty: AtomicBool::new(true),
        }
    }

    /// Recreate a chunk from a memento, moving the stored content out of it.
    /// The memento is left empty.
    pub fn from_memento(origin: IVec3, memento: &mut GridMemento) -> Self {
        let mut grid = Self::new(origin);
        if let Some(voxels) = memento.voxels.take() {
            grid.voxels = voxels;
        }
        grid
    }

    pub fn origin(&self) -> IVec3 {
        self.origin
    }

    pub fn id(&self) -> BlockId {
        BlockId::from_pos(self.origin)
    }

    /// Integer bound, `origin..origin + 16`
    pub fn bound(&self) -> IBox {
        IBox::new(self.origin, self.origin + IVec3::splat(GRID_LEN))
    }

    pub fn voxels(&self) -> &[VoxelEntry] {
        &self.voxels
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Relaxed)
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::Relaxed);
    }

    fn mark_dirty(&mut self) {
        *self.dirty.get_mut() = true;
    }

    /// Read a voxel at a chunk-local position; None outside `0..16`.
    pub fn voxel(&self, local: IVec3) -> Option<&VoxelEntry> {
        if !in_grid(local) {
            return None;
        }
        self.voxels.get(voxel_index(local))
    }

    /// Write a voxel at a chunk-local position.
    pub fn set_voxel(&mut self, local: IVec3, entry: VoxelEntry) {
        debug_assert!(in_grid(local), "local position out of range: {:?}", local);
        self.voxels[voxel_index(local)] = entry;
        self.mark_dirty();
    }

    pub fn non_empty_count(&self) -> usize {
        self.voxels.iter().filter(|v| v.is_non_empty()).count()
    }

    /// Bake a tool grid into this chunk.
    ///
    /// Erased tool entries clear the voxel, non-empty ones overwrite it with
    /// the no-collision flag dropped. The previous content is copied into
    /// `memento` first. Returns the number of non-empty voxels left.
    pub fn apply_changes(&mut self, tool: &VoxelGrid, memento: Option<&mut GridMemento>) -> usize {
        if let Some(memento) = memento {
            self.save_state(memento);
        }
        let mut count = 0;
        for (dst, src) in self.voxels.iter_mut().zip(tool.voxels.iter()) {
            if src.is_erased() {
                *dst = VoxelEntry::EMPTY;
            } else if src.is_non_empty() {
                *dst = *src;
                dst.flags &= !flags::NO_COLLISION;
            }
            if dst.is_non_empty() {
                count += 1;
            }
        }
        self.mark_dirty();
        count
    }

    /// Overlay another chunk: its erased voxels clear, its non-empty voxels
    /// replace. Flags are kept as-is, so preview voxels stay previews.
    pub fn merge(&mut self, top: &VoxelGrid) {
        for (dst, src) in self.voxels.iter_mut().zip(top.voxels.iter()) {
            if src.is_erased() {
                *dst = VoxelEntry::EMPTY;
            } else if src.is_non_empty() {
                *dst = *src;
            }
        }
        self.mark_dirty();
    }

    /// Swap content with the memento. Applying the same memento twice
    /// returns the chunk to where it started.
    pub fn restore_state(&mut self, memento: &mut GridMemento) {
        match memento.voxels.as_mut() {
            Some(stored) => {
                std::mem::swap(&mut self.voxels, stored);
                self.mark_dirty();
            }
            None => log::warn!("restore of chunk {:?} from an empty memento ignored", self.origin),
        }
    }

    /// Copy the current content into the memento without modifying the chunk.
    pub fn save_state(&self, memento: &mut GridMemento) {
        memento.voxels = Some(self.voxels.clone());
    }

    /// Walk the ray through the chunk cell by cell and return the first
    /// collidable voxel. The hit position is chunk-local.
    pub fn ray_intersect(&self, ray: &Ray) -> Option<RayHit> {
        let slab = ray.intersects_aabb(&Aabb::from(self.bound()))?;
        let (mut t, mut face) = if slab.t_near < ray.t_min {
            (ray.t_min, None)
        } else {
            (slab.t_near, slab.entry)
        };

        let entry_point: Vec3 = ray.at(t) - self.origin.as_vec3();
        let mut cell = IVec3::ZERO;
        let mut step = IVec3::ZERO;
        let mut exit = IVec3::ZERO;
        let mut next_t = Vec3::splat(f32::INFINITY);
        let mut delta_t = Vec3::splat(f32::INFINITY);

        for axis in 0..3 {
            let local = entry_point[axis];
            cell[axis] = (local.floor() as i32).clamp(0, GRID_LEN - 1);
            let dir = ray.direction[axis];
            if dir > 0.0 {
                step[axis] = 1;
                exit[axis] = GRID_LEN;
                next_t[axis] = t + ((cell[axis] + 1) as f32 - local) / dir;
                delta_t[axis] = 1.0 / dir;
            } else if dir < 0.0 {
                step[axis] = -1;
                exit[axis] = -1;
                next_t[axis] = t + (cell[axis] as f32 - local) / dir;
                delta_t[axis] = -1.0 / dir;
            }
        }

        loop {
            if self.voxels[voxel_index(cell)].is_collidable() {
                return Some(RayHit { position: cell, t, face });
            }

            let axis = if next_t.x < next_t.y {
                if next_t.x < next_t.z { 0 } else { 2 }
            } else if next_t.y < next_t.z {
                1
            } else {
                2
            };
            if step[axis] == 0 {
                return None;
            }

            cell[axis] += step[axis];
            face = Some(HitFace { axis, negative: step[axis] < 0 });
            t = next_t[axis];
            if cell[axis] == exit[axis] || t > ray.t_max {
                return None;
            }
            next_t[axis] += delta_t[axis];
        }
    }
}
