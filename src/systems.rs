//! Core controller systems.
//!
//! [`update_movement`] is the single per-frame driver: it samples the
//! grounded flag once, steps the controller, and applies the resulting
//! displacement through the backend. [`sync_state_markers`] mirrors the
//! post-step locomotion state into marker components for external queries.

use bevy::prelude::*;

use crate::backend::CharacterPhysicsBackend;
use crate::config::MovementConfig;
use crate::controller::MovementController;
use crate::detection::WallProbe;
use crate::intent::MovementIntent;
use crate::state::{Airborne, Grounded, WallSticking};

/// Run the per-frame movement step for every character.
///
/// Ordering guarantee: the grounded flag and wall probes are read once per
/// entity per frame and reused for every sub-step (coyote update, strategy
/// tick, gravity integration). The frame is skipped entirely when the fixed
/// timestep is non-positive.
pub fn update_movement<B: CharacterPhysicsBackend>(world: &mut World) {
    let dt = B::get_fixed_timestep(world);
    if dt <= 0.0 {
        return;
    }

    // Collect entities first so backend calls can take &mut World.
    let entities: Vec<Entity> = world
        .query_filtered::<Entity, With<MovementController>>()
        .iter(world)
        .collect();

    for entity in entities {
        let grounded = B::is_grounded(world, entity);
        let intent = world
            .get::<MovementIntent>(entity)
            .copied()
            .unwrap_or_default();
        let config = world
            .get::<MovementConfig>(entity)
            .copied()
            .unwrap_or_default();
        let probe = world.get::<WallProbe>(entity).copied().unwrap_or_default();

        let Some(stored) = world.get::<MovementController>(entity) else {
            continue;
        };
        let mut controller = stored.clone();

        // Capture the locked axis value on the first frame after spawn.
        if config.lock_lateral_axis && controller.motion().locked_lateral.is_none() {
            controller.motion.locked_lateral = Some(B::get_position(world, entity).z);
        }

        let frame = controller.step_frame(&intent, &config, probe, dt, grounded);
        let roll_visual = controller.roll_visual();
        let locked_lateral = controller.motion().locked_lateral;

        if let Some(mut stored) = world.get_mut::<MovementController>(entity) {
            *stored = controller;
        }
        if let Some(mut stored_intent) = world.get_mut::<MovementIntent>(entity) {
            stored_intent.clear_queued_jump();
        }

        if frame.displacement != Vec3::ZERO {
            B::move_character(world, entity, frame.displacement);
        }

        if frame.roll_degrees != 0.0 {
            if let Some(visual) = roll_visual {
                B::rotate_roll_visual(world, visual, frame.roll_degrees);
            }
        }

        // Clamp the locked axis back to its spawn value so accumulated
        // physics drift never leaves the 2D plane.
        if config.lock_lateral_axis {
            if let Some(z) = locked_lateral {
                let position = B::get_position(world, entity);
                if position.z != z {
                    B::set_position(world, entity, Vec3::new(position.x, position.y, z));
                }
            }
        }
    }
}

/// Sync state marker components from the post-step controller state.
pub fn sync_state_markers(
    mut commands: Commands,
    q_controllers: Query<(
        Entity,
        &MovementController,
        Has<Grounded>,
        Has<Airborne>,
        Has<WallSticking>,
    )>,
) {
    for (entity, controller, has_grounded, has_airborne, has_sticking) in &q_controllers {
        let grounded = controller.motion().was_grounded;
        let sticking = controller.motion().is_sticking();

        if grounded && !has_grounded {
            commands.entity(entity).insert(Grounded).remove::<Airborne>();
        } else if !grounded && has_grounded {
            commands.entity(entity).remove::<Grounded>().insert(Airborne);
        } else if !grounded && !has_airborne {
            commands.entity(entity).insert(Airborne);
        }

        if sticking && !has_sticking {
            commands.entity(entity).insert(WallSticking);
        } else if !sticking && has_sticking {
            commands.entity(entity).remove::<WallSticking>();
        }
    }
}
