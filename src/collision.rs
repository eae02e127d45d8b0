//! Collision query result structures.
//!
//! These structures hold the results of physics queries (raycasts) used
//! by the wall probes. Backends fill them in; the core only reads them.

use bevy::prelude::*;

/// Information about a raycast collision.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionData {
    /// Distance to the hit point (if hit).
    pub distance: f32,
    /// Normal of the surface at hit point.
    pub normal: Vec3,
    /// World position of the hit point.
    pub point: Vec3,
    /// Entity that was hit (if any).
    pub entity: Option<Entity>,
}

impl CollisionData {
    /// Create a collision result.
    pub fn new(distance: f32, normal: Vec3, point: Vec3, entity: Option<Entity>) -> Self {
        Self {
            distance,
            normal,
            point,
            entity,
        }
    }
}
