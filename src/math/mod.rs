//! Mathematical utilities and data structures

pub mod aabb;
pub mod ray;
pub mod plane;

pub use aabb::{Aabb, IBox};
pub use ray::{HitFace, Ray, RayHit, SlabHit};
pub use plane::GroundPlane;
