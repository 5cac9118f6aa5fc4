//! Named, toggleable voxel layer.

use crate::voxel::aggregate::VoxelAggregate;

/// One editable layer of a scene.
#[derive(Clone, Debug)]
pub struct VoxelLayer {
    /// Human-readable name
    pub name: String,
    pub aggregate: VoxelAggregate,
    /// Hidden layers are left out of the render layer
    pub visible: bool,
}

impl VoxelLayer {
    /// Create an empty, visible layer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aggregate: VoxelAggregate::new(),
            visible: true,
        }
    }
}
