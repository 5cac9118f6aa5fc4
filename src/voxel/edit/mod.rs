//! Editing session with layers and undo/redo.
//!
//! Edits accumulate in a tool layer and are baked into the active layer as
//! one reversible step. Layer creation and deletion are undoable as well.

pub mod history;
pub mod layer;
pub mod scene;

pub use history::{EditHistory, HistoryEntry, LayerChange};
pub use layer::VoxelLayer;
pub use scene::Scene;
