//! Axis-aligned bounding boxes (float and integer)

use crate::core::types::{IVec3, Vec3};

/// Axis-aligned bounding box defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Get center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get size (max - min)
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if point is inside AABB
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x &&
        p.y >= self.min.y && p.y <= self.max.y &&
        p.z >= self.min.z && p.z <= self.max.z
    }

    /// Return merged AABB containing both
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

impl From<IBox> for Aabb {
    fn from(b: IBox) -> Self {
        Aabb::new(b.min.as_vec3(), b.max.as_vec3())
    }
}

/// Integer box in voxel space. `min` is inclusive, `max` exclusive, so a
/// chunk at origin `o` spans `o..o + 16`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IBox {
    pub min: IVec3,
    pub max: IVec3,
}

impl IBox {
    pub fn new(min: IVec3, max: IVec3) -> Self {
        Self { min, max }
    }

    /// Extent along each axis
    pub fn size(&self) -> IVec3 {
        self.max - self.min
    }

    /// Check if a voxel position lies inside
    pub fn contains(&self, p: IVec3) -> bool {
        p.cmpge(self.min).all() && p.cmplt(self.max).all()
    }

    /// Grow to enclose another box
    pub fn join(&mut self, other: &IBox) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }
}
