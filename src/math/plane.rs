//! Axis-aligned pick plane used when a ray misses all voxels

use crate::core::types::{IVec3, Vec3};
use super::ray::{HitFace, Ray, RayHit};

const PARALLEL_EPSILON: f32 = 1e-7;

/// A bounded grid plane perpendicular to one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundPlane {
    pub axis: usize,
    pub level: i32,
    /// Half extent on the two in-plane axes
    pub radius: i32,
}

impl GroundPlane {
    /// Horizontal plane at height `level`
    pub fn horizontal(level: i32, radius: i32) -> Self {
        Self { axis: 1, level, radius }
    }

    /// Intersect the plane. The reported cell is the one on the far side of
    /// the plane, so `adjacent_voxel()` yields the cell the ray came from.
    pub fn ray_intersect(&self, ray: &Ray) -> Option<RayHit> {
        let dir = ray.direction[self.axis];
        if dir.abs() <= PARALLEL_EPSILON {
            return None;
        }
        let negative = dir < 0.0;
        let t = (self.level as f32 - ray.origin[self.axis]) / dir;
        if t < ray.t_min || t > ray.t_max {
            return None;
        }

        let p: Vec3 = ray.at(t);
        let mut position = p.floor().as_ivec3();
        position[self.axis] = if negative { self.level - 1 } else { self.level };

        let radius = self.radius;
        let inside = (0..3)
            .filter(|&a| a != self.axis)
            .all(|a| position[a] >= -radius && position[a] < radius);
        if !inside {
            return None;
        }

        Some(RayHit {
            position,
            t,
            face: Some(HitFace { axis: self.axis, negative }),
        })
    }
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self::horizontal(0, 16)
    }
}
