//! Whole-aggregate voxel transforms.

use crate::core::types::IVec3;
use super::aggregate::VoxelAggregate;

/// A transform applied voxel by voxel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoxelTransform {
    /// Move every voxel by an integer offset
    Translate(IVec3),
}

impl VoxelTransform {
    /// New position of a voxel at `pos`.
    pub fn apply(&self, pos: IVec3) -> IVec3 {
        match *self {
            VoxelTransform::Translate(offset) => pos + offset,
        }
    }
}

/// Build a new aggregate holding every non-empty voxel of `source` at its
/// transformed position. `source` is left untouched.
pub fn transform_aggregate(source: &VoxelAggregate, transform: &VoxelTransform) -> VoxelAggregate {
    let mut transformed = VoxelAggregate::new();
    for (pos, voxel) in source.voxels() {
        transformed.set_voxel(transform.apply(pos), *voxel);
    }
    transformed
}
