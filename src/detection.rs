//! Detection result structures.
//!
//! Wall probes are sensed once per frame by the active physics backend and
//! stored here, so every sub-step of the frame sees the same results.

use bevy::prelude::*;

use crate::collision::CollisionData;
use crate::state::WallSide;

/// Per-frame wall probe results.
///
/// Filled in by the backend's sensor system before the movement step runs.
/// Probes are cast horizontally from the character center, out to the
/// configured wall check distance, on both sides.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct WallProbe {
    /// Left probe result. `None` if nothing was hit within range.
    #[reflect(ignore)]
    pub left: Option<CollisionData>,
    /// Right probe result. `None` if nothing was hit within range.
    #[reflect(ignore)]
    pub right: Option<CollisionData>,
}

impl WallProbe {
    /// Clear both probe results (called by sensors at the start of each frame).
    pub fn clear(&mut self) {
        self.left = None;
        self.right = None;
    }

    /// Check if either probe hit a wall.
    pub fn any_hit(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }

    /// The side a wall was detected on. Left wins if both probes hit.
    pub fn hit_side(&self) -> WallSide {
        if self.left.is_some() {
            WallSide::Left
        } else if self.right.is_some() {
            WallSide::Right
        } else {
            WallSide::None
        }
    }

    /// Check whether a wall was detected on the given side.
    pub fn has_hit(&self, side: WallSide) -> bool {
        match side {
            WallSide::Left => self.left.is_some(),
            WallSide::Right => self.right.is_some(),
            WallSide::None => false,
        }
    }
}
