//! Voxel data structures and operations

pub mod voxel;
pub mod block;
pub mod grid;
pub mod memento;
pub mod aggregate;
pub mod mesh;
pub mod edit;
pub mod tools;
pub mod transform;

pub use voxel::{Material, Specular, VoxelEntry};
pub use block::{BlockId, DirtyVolume, GRID_LEN};
pub use grid::VoxelGrid;
pub use memento::{AggregateMemento, GridMemento};
pub use aggregate::VoxelAggregate;
pub use mesh::{quad_indices, ChunkMesh, VoxelVertex};
pub use edit::{EditHistory, HistoryEntry, Scene, VoxelLayer};
pub use tools::{flood_fill, FaceSelection, FillNeighbourhood};
pub use transform::{transform_aggregate, VoxelTransform};
