//! Block ids: the spatial hash mapping chunk-aligned positions to 64-bit keys.

use crate::core::types::IVec3;

/// Voxels per chunk side. Must be a power of two.
pub const GRID_LEN: i32 = 16;
/// log2(GRID_LEN)
pub const LOG_GRID_LEN: u32 = 4;
/// Voxels per chunk
pub const GRID_VOLUME: usize = (GRID_LEN * GRID_LEN * GRID_LEN) as usize;

const COORD_BITS: u32 = 21;
const COORD_MASK: u64 = (1 << COORD_BITS) - 1;

/// Identifier of one chunk, packing the three chunk coordinates into
/// 21 bits each (two's complement, so negative chunks map into the upper half).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u64);

impl BlockId {
    /// Id of the chunk containing the voxel at `pos`.
    pub fn from_pos(pos: IVec3) -> Self {
        let pack = |v: i32| ((v >> LOG_GRID_LEN) as i64 as u64) & COORD_MASK;
        BlockId(pack(pos.x) | pack(pos.y) << COORD_BITS | pack(pos.z) << (2 * COORD_BITS))
    }

    /// Chunk origin (minimum corner) for this id. Exact inverse of
    /// `from_pos` for every chunk origin in `[-2^24, 2^24)` per axis.
    pub fn origin(self) -> IVec3 {
        let unpack = |shift: u32| {
            let v = ((self.0 >> shift) & COORD_MASK) as u32;
            // sign-extend the 21-bit field
            (((v << (32 - COORD_BITS)) as i32) >> (32 - COORD_BITS)) << LOG_GRID_LEN
        };
        IVec3::new(unpack(0), unpack(COORD_BITS), unpack(2 * COORD_BITS))
    }

    /// Id of the chunk `offset` chunks away from this one.
    pub fn offset(self, offset: IVec3) -> Self {
        BlockId::from_pos(self.origin() + offset * GRID_LEN)
    }
}

/// Chunk origin of any voxel position
pub fn chunk_origin(pos: IVec3) -> IVec3 {
    IVec3::new(
        pos.x & !(GRID_LEN - 1),
        pos.y & !(GRID_LEN - 1),
        pos.z & !(GRID_LEN - 1),
    )
}

/// Chunk-relative coordinate of a voxel position
pub fn local_pos(pos: IVec3) -> IVec3 {
    IVec3::new(
        pos.x & (GRID_LEN - 1),
        pos.y & (GRID_LEN - 1),
        pos.z & (GRID_LEN - 1),
    )
}

/// Inclusive bounding box of voxels touched by a write burst.
///
/// Must stay inside one chunk; callers keep one volume per block id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtyVolume {
    pub low: IVec3,
    pub high: IVec3,
}

impl DirtyVolume {
    pub fn from_position(pos: IVec3) -> Self {
        Self { low: pos, high: pos }
    }

    /// The full extent of a chunk
    pub fn whole_block(id: BlockId) -> Self {
        let low = id.origin();
        Self { low, high: low + IVec3::splat(GRID_LEN - 1) }
    }

    /// Grow to include `pos`
    pub fn add_position(&mut self, pos: IVec3) {
        self.low = self.low.min(pos);
        self.high = self.high.max(pos);
    }
}
