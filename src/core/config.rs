//! Editor configuration, persisted as JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::types::Result;
use crate::voxel::voxel::{Material, Specular, VoxelEntry};

/// How the render layer is turned into meshes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Every visible face of every voxel.
    #[default]
    Full,
    /// Only voxels on one axis-aligned plane (2D slice view).
    Slice { axis: usize, level: i32 },
}

/// Options handed to the mesh builder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub mode: RenderMode,
}

impl RenderOptions {
    /// Slice view through `level` on `axis`.
    pub fn slice(axis: usize, level: i32) -> Self {
        Self { mode: RenderMode::Slice { axis, level } }
    }
}

/// Top-level editor configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// RGBA color of the voxel template used by drawing tools.
    pub template_color: [u8; 4],
    /// Material of the voxel template.
    pub template_material: Material,
    /// Specular model of the voxel template.
    pub template_specular: Specular,
    /// Maximum number of undo steps kept. 0 = unlimited.
    pub history_limit: usize,
    /// Height (Y) of the pick plane used when a ray misses every voxel.
    pub ground_level: i32,
    /// Half extent of the pick plane on X and Z.
    pub ground_radius: i32,
    /// Initial render options.
    pub render: RenderOptions,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            template_color: [128, 128, 255, 255],
            template_material: Material::Solid,
            template_specular: Specular::Rough,
            history_limit: 0,
            ground_level: 0,
            ground_radius: 16,
            render: RenderOptions::default(),
        }
    }
}

impl EditorConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Build the voxel template described by this config.
    pub fn template_voxel(&self) -> VoxelEntry {
        let [r, g, b, a] = self.template_color;
        let mut entry = VoxelEntry::solid(r, g, b, a);
        entry.set_material(self.template_material);
        entry.set_specular(self.template_specular);
        entry
    }
}
