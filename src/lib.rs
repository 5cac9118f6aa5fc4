//! Voxedit - sparse voxel editing core
//!
//! Chunked copy-on-write voxel layers, reversible edits and per-chunk
//! mesh generation for a voxel art editor.

pub mod core;
pub mod math;
pub mod voxel;
