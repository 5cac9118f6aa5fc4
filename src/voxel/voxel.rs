//! Voxel data type

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Voxel flags
pub mod flags {
    /// The voxel exists. Without it a voxel is absent regardless of color.
    pub const NON_EMPTY: u32 = 1 << 0;
    /// Tombstone, only meaningful inside a tool layer diff.
    pub const ERASED: u32 = 1 << 1;
    /// Preview voxel, ignored by ray picking.
    pub const NO_COLLISION: u32 = 1 << 2;
    /// Scratch marker for selection-based tools.
    pub const TOOL_SELECT: u32 = 1 << 3;

    pub const MATERIAL_MASK: u32 = 0xF00;
    pub const MATERIAL_SHIFT: u32 = 8;
    pub const SPECULAR_MASK: u32 = 0xF000;
    pub const SPECULAR_SHIFT: u32 = 12;
    /// Material codes of the glass kinds
    pub const TRANSPARENT_MASK: u32 = 0x600;
}

/// Surface material, stored in bits 8-11 of the flag word
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Material {
    #[default]
    Solid = 0,
    GlowingSolid = 1,
    Glass = 2,
    TiledGlass = 3,
    GlowingGlass = 4,
}

impl Material {
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Material::GlowingSolid,
            2 => Material::Glass,
            3 => Material::TiledGlass,
            4 => Material::GlowingGlass,
            _ => Material::Solid,
        }
    }
}

/// Specular model, stored in bits 12-15 of the flag word
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Specular {
    #[default]
    Rough = 0,
    Metal = 1,
    Water = 2,
    Iridescent = 3,
    Wave = 4,
    Waxy = 5,
}

impl Specular {
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Specular::Metal,
            2 => Specular::Water,
            3 => Specular::Iridescent,
            4 => Specular::Wave,
            5 => Specular::Waxy,
            _ => Specular::Rough,
        }
    }
}

/// Single voxel - 8 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct VoxelEntry {
    /// RGBA color
    pub color: [u8; 4],
    /// Flags plus packed material and specular codes
    pub flags: u32,
}

impl VoxelEntry {
    /// Absent voxel
    pub const EMPTY: VoxelEntry = VoxelEntry {
        color: [0; 4],
        flags: 0,
    };

    /// Tombstone written into a tool layer to erase a voxel
    pub const ERASED: VoxelEntry = VoxelEntry {
        color: [0; 4],
        flags: flags::ERASED,
    };

    pub fn new(color: [u8; 4], flags: u32) -> Self {
        Self { color, flags }
    }

    /// Non-empty, solid voxel with the given color
    pub fn solid(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            color: [r, g, b, a],
            flags: flags::NON_EMPTY,
        }
    }

    /// Create a copy with additional flag bits set
    pub fn with_flags(self, extra: u32) -> Self {
        Self { flags: self.flags | extra, ..self }
    }

    pub fn is_non_empty(&self) -> bool {
        self.flags & flags::NON_EMPTY != 0
    }

    pub fn is_erased(&self) -> bool {
        self.flags & flags::ERASED != 0
    }

    /// Non-empty and not a preview-only voxel
    pub fn is_collidable(&self) -> bool {
        self.is_non_empty() && self.flags & flags::NO_COLLISION == 0
    }

    pub fn is_tool_selected(&self) -> bool {
        self.flags & flags::TOOL_SELECT != 0
    }

    pub fn material(&self) -> Material {
        Material::from_code(((self.flags & flags::MATERIAL_MASK) >> flags::MATERIAL_SHIFT) as u8)
    }

    pub fn set_material(&mut self, material: Material) {
        self.flags &= !flags::MATERIAL_MASK;
        self.flags |= (material as u32) << flags::MATERIAL_SHIFT;
    }

    pub fn specular(&self) -> Specular {
        Specular::from_code(((self.flags & flags::SPECULAR_MASK) >> flags::SPECULAR_SHIFT) as u8)
    }

    pub fn set_specular(&mut self, specular: Specular) {
        self.flags &= !flags::SPECULAR_MASK;
        self.flags |= (specular as u32) << flags::SPECULAR_SHIFT;
    }

    /// Glass materials let light and neighbouring faces through
    pub fn is_transparent(&self) -> bool {
        self.flags & flags::TRANSPARENT_MASK != 0
    }

    /// Index into the shader's material table: solid voxels select by
    /// specular model, all other materials follow after the 6 specular slots.
    pub fn material_index(&self) -> u8 {
        match self.material() {
            Material::Solid => self.specular() as u8,
            other => other as u8 + 5,
        }
    }
}
