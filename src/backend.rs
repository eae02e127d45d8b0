//! Physics backend abstraction.
//!
//! This module defines the trait that physics backends must implement
//! to work with the character controller. The core only ever computes motion
//! intent; grounding queries, collision-aware displacement, and wall probes
//! are the backend's job, so physics engines can be swapped freely.

use bevy::prelude::*;

/// Trait for physics backend implementations.
///
/// The character is kinematic: the controller integrates velocity itself and
/// hands the backend a per-frame displacement to apply with collision
/// resolution. The backend also answers the grounded query (sampled exactly
/// once per frame by the movement system) and senses wall probes through its
/// own sensor systems registered by [`plugin`](Self::plugin).
///
/// For an example implementation, see the `rapier` module's `Rapier3dBackend`
/// (enabled with the `rapier3d` feature), or the scripted backend the
/// integration tests use.
pub trait CharacterPhysicsBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend (sensor systems, etc.).
    fn plugin() -> impl Plugin;

    /// Whether the character is currently standing on ground.
    ///
    /// Called once at the top of each frame; every sub-step reuses the value.
    fn is_grounded(world: &World, entity: Entity) -> bool;

    /// Apply a frame's worth of positional delta, collision-aware.
    fn move_character(world: &mut World, entity: Entity, delta: Vec3);

    /// Get the current world position of an entity.
    fn get_position(world: &World, entity: Entity) -> Vec3;

    /// Set the world position of an entity (used by the lateral axis lock).
    fn set_position(world: &mut World, entity: Entity, position: Vec3);

    /// Rotate a roll visual about its local roll axis by `degrees`.
    ///
    /// The target entity is the opaque handle configured on the controller;
    /// the core never inspects it.
    fn rotate_roll_visual(world: &mut World, visual: Entity, degrees: f32);

    /// Get the fixed timestep delta time.
    fn get_fixed_timestep(world: &World) -> f32 {
        world
            .get_resource::<Time<Fixed>>()
            .map(|t| t.delta_secs())
            .filter(|&d| d > 0.0)
            .unwrap_or(1.0 / 60.0)
    }
}

/// Empty plugin for backends that don't need additional setup.
pub struct NoOpBackendPlugin;

impl Plugin for NoOpBackendPlugin {
    fn build(&self, _app: &mut App) {}
}
