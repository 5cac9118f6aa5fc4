//! Ray type and operations

use crate::core::types::{IVec3, Vec3};
use super::aabb::Aabb;

/// A ray defined by origin, direction and a valid parameter interval
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Precomputed 1/direction for fast AABB intersection
    pub inv_direction: Vec3,
    pub t_min: f32,
    pub t_max: f32,
}

/// Face of a cell a ray crossed to enter it.
///
/// `negative` is set when the ray travels towards -axis, i.e. it entered
/// through the cell's +axis side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitFace {
    pub axis: usize,
    pub negative: bool,
}

/// Result of a slab test
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlabHit {
    pub t_near: f32,
    pub t_far: f32,
    /// Axis whose slab was entered last; None when the ray starts inside
    /// every slab it is not parallel to.
    pub entry: Option<HitFace>,
}

/// A ray hit against voxel data, in world voxel coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub position: IVec3,
    pub t: f32,
    pub face: Option<HitFace>,
}

impl RayHit {
    /// The cell in front of the hit face, where a new voxel would be placed.
    /// Falls back to the hit cell itself when the ray started inside it.
    pub fn adjacent_voxel(&self) -> IVec3 {
        let mut pos = self.position;
        if let Some(face) = self.face {
            pos[face.axis] += if face.negative { 1 } else { -1 };
        }
        pos
    }
}

impl Ray {
    /// Create a new ray covering `[0, inf)`
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: Vec3::new(
                1.0 / direction.x,
                1.0 / direction.y,
                1.0 / direction.z,
            ),
            t_min: 0.0,
            t_max: f32::INFINITY,
        }
    }

    /// Restrict the valid parameter interval
    pub fn with_range(mut self, t_min: f32, t_max: f32) -> Self {
        self.t_min = t_min;
        self.t_max = t_max;
        self
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray-AABB intersection using the slab method.
    ///
    /// Returns the slab interval and entry face when it overlaps
    /// `[t_min, t_max]`. `t_near` is not clamped.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> Option<SlabHit> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        let mut entry = None;

        for axis in 0..3 {
            if self.direction[axis] == 0.0 {
                // parallel: either always inside this slab or never
                if self.origin[axis] < aabb.min[axis] || self.origin[axis] > aabb.max[axis] {
                    return None;
                }
                continue;
            }
            let inv = self.inv_direction[axis];
            let mut t0 = (aabb.min[axis] - self.origin[axis]) * inv;
            let mut t1 = (aabb.max[axis] - self.origin[axis]) * inv;
            let negative = t0 > t1;
            if negative {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > t_near {
                t_near = t0;
                entry = Some(HitFace { axis, negative });
            }
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }

        if self.t_max >= t_near && t_far >= self.t_min {
            Some(SlabHit { t_near, t_far, entry })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(ray.at(5.0), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_intersects_aabb_hit() {
        let ray = Ray::new(Vec3::new(-2.0, 0.5, 0.5), Vec3::X);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let hit = ray.intersects_aabb(&aabb).unwrap();
        assert!((hit.t_near - 2.0).abs() < 0.001);
        assert!((hit.t_far - 3.0).abs() < 0.001);
        assert_eq!(hit.entry, Some(HitFace { axis: 0, negative: false }));
    }

    #[test]
    fn test_intersects_aabb_negative_direction() {
        let ray = Ray::new(Vec3::new(0.5, 4.0, 0.5), -Vec3::Y);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let hit = ray.intersects_aabb(&aabb).unwrap();
        assert!((hit.t_near - 3.0).abs() < 0.001);
        assert_eq!(hit.entry, Some(HitFace { axis: 1, negative: true }));
    }

    #[test]
    fn test_intersects_aabb_miss() {
        let ray = Ray::new(Vec3::new(-2.0, 5.0, 0.5), Vec3::X);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(ray.intersects_aabb(&aabb).is_none());
    }

    #[test]
    fn test_intersects_aabb_behind_or_out_of_range() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let behind = Ray::new(Vec3::new(2.0, 0.5, 0.5), Vec3::X);
        assert!(behind.intersects_aabb(&aabb).is_none());

        let short = Ray::new(Vec3::new(-2.0, 0.5, 0.5), Vec3::X).with_range(0.0, 1.0);
        assert!(short.intersects_aabb(&aabb).is_none());
    }

    #[test]
    fn test_intersects_aabb_inside() {
        let ray = Ray::new(Vec3::splat(0.5), Vec3::X);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let hit = ray.intersects_aabb(&aabb).unwrap();
        assert!(hit.t_near < 0.0);
    }

    #[test]
    fn test_adjacent_voxel() {
        let hit = RayHit {
            position: IVec3::new(3, 2, 5),
            t: 1.0,
            face: Some(HitFace { axis: 2, negative: true }),
        };
        assert_eq!(hit.adjacent_voxel(), IVec3::new(3, 2, 6));

        let hit = RayHit { face: Some(HitFace { axis: 0, negative: false }), ..hit };
        assert_eq!(hit.adjacent_voxel(), IVec3::new(2, 2, 5));
    }
}
