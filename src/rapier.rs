//! Rapier3D physics backend implementation.
//!
//! This module provides the physics backend for Bevy Rapier3D.
//! Enable with the `rapier3d` feature.
//!
//! The character is a kinematic body: per-frame displacement goes through
//! rapier's [`KinematicCharacterController`], which resolves collisions and
//! reports grounding. Wall probes are raycasts sensed once per frame by a
//! dedicated system that receives the rapier context as a system parameter.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::backend::CharacterPhysicsBackend;
use crate::collision::CollisionData;
use crate::config::MovementConfig;
use crate::controller::MovementController;
use crate::detection::WallProbe;
use crate::intent::MovementIntent;
use crate::CharacterControllerSet;

/// Rapier3D physics backend for the character controller.
pub struct Rapier3dBackend;

impl CharacterPhysicsBackend for Rapier3dBackend {
    fn plugin() -> impl Plugin {
        Rapier3dBackendPlugin
    }

    fn is_grounded(world: &World, entity: Entity) -> bool {
        world
            .get::<KinematicCharacterControllerOutput>(entity)
            .map(|output| output.grounded)
            .unwrap_or(false)
    }

    fn move_character(world: &mut World, entity: Entity, delta: Vec3) {
        if let Some(mut character) = world.get_mut::<KinematicCharacterController>(entity) {
            let pending = character.translation.unwrap_or(Vec3::ZERO);
            character.translation = Some(pending + delta);
        }
    }

    fn get_position(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<Transform>(entity)
            .map(|t| t.translation)
            .or_else(|| {
                world
                    .get::<GlobalTransform>(entity)
                    .map(|t| t.translation())
            })
            .unwrap_or(Vec3::ZERO)
    }

    fn set_position(world: &mut World, entity: Entity, position: Vec3) {
        if let Some(mut transform) = world.get_mut::<Transform>(entity) {
            transform.translation = position;
        }
    }

    fn rotate_roll_visual(world: &mut World, visual: Entity, degrees: f32) {
        if let Some(mut transform) = world.get_mut::<Transform>(visual) {
            transform.rotate_local_z(degrees.to_radians());
        }
    }
}

/// Plugin that sets up Rapier3D-specific sensor systems for the controller.
pub struct Rapier3dBackendPlugin;

impl Plugin for Rapier3dBackendPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            rapier_wall_probe.in_set(CharacterControllerSet::Sensors),
        );
    }
}

/// Components for a rapier-backed character.
///
/// Spawn together with a `Transform`, a [`MovementController`], and optionally
/// a custom [`MovementConfig`].
#[derive(Bundle)]
pub struct Rapier3dCharacterBundle {
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub character: KinematicCharacterController,
    pub intent: MovementIntent,
    pub probe: WallProbe,
}

impl Rapier3dCharacterBundle {
    /// A capsule character with a kinematic position-based body.
    pub fn capsule(half_height: f32, radius: f32) -> Self {
        Self {
            rigid_body: RigidBody::KinematicPositionBased,
            collider: Collider::capsule_y(half_height, radius),
            character: KinematicCharacterController {
                offset: CharacterLength::Absolute(0.02),
                ..default()
            },
            intent: MovementIntent::default(),
            probe: WallProbe::default(),
        }
    }
}

/// Rapier-specific wall probe sensor.
///
/// Casts left and right rays from the character center out to the configured
/// wall check distance and records the results once per frame, before the
/// movement step runs.
fn rapier_wall_probe(
    rapier_context: ReadRapierContext,
    mut q_probes: Query<
        (
            Entity,
            &GlobalTransform,
            &MovementConfig,
            Option<&CollisionGroups>,
            &mut WallProbe,
        ),
        With<MovementController>,
    >,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };

    for (entity, transform, config, collision_groups, mut probe) in &mut q_probes {
        probe.clear();

        let origin = transform.translation();

        // Probe filtering: the config's wall groups win, otherwise inherit
        // the character's own collision groups.
        let groups = config
            .wall_groups
            .or_else(|| collision_groups.map(|cg| (cg.memberships.bits(), cg.filters.bits())));

        probe.left = cast_wall_ray(
            &context,
            origin,
            Vec3::NEG_X,
            config.wall_check_distance,
            entity,
            groups,
        );
        probe.right = cast_wall_ray(
            &context,
            origin,
            Vec3::X,
            config.wall_check_distance,
            entity,
            groups,
        );
    }
}

/// Perform a single wall probe raycast.
fn cast_wall_ray(
    context: &RapierContext,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    exclude_entity: Entity,
    collision_groups: Option<(u32, u32)>,
) -> Option<CollisionData> {
    let mut filter = QueryFilter::default()
        .exclude_rigid_body(exclude_entity)
        .exclude_sensors();

    if let Some((memberships, filters)) = collision_groups {
        filter = filter.groups(CollisionGroups::new(
            Group::from_bits_truncate(memberships),
            Group::from_bits_truncate(filters),
        ));
    }

    context
        .cast_ray(origin, direction, max_distance, true, filter)
        .map(|(hit_entity, toi)| {
            // A flat wall's normal opposes the probe direction.
            CollisionData::new(toi, -direction, origin + direction * toi, Some(hit_entity))
        })
}
