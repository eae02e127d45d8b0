//! Shared test harness: a scripted in-memory physics backend.
//!
//! Window timing, bounce thresholds, and axis locking need exact frame
//! scripts, so the tests drive the movement system through a backend whose
//! grounded flag and probes are set directly instead of simulated.

#![allow(dead_code)]

use bevy::prelude::*;
use morph_character_controller::prelude::*;
use morph_character_controller::systems::update_movement;

pub const DT: f32 = 1.0 / 60.0;

/// Scripted physical state for one character.
#[derive(Component, Debug, Clone, Copy)]
pub struct TestBody {
    pub grounded: bool,
    pub position: Vec3,
    pub last_displacement: Vec3,
}

impl Default for TestBody {
    fn default() -> Self {
        Self {
            grounded: false,
            position: Vec3::ZERO,
            last_displacement: Vec3::ZERO,
        }
    }
}

/// Accumulates cosmetic roll rotation applied to a visual entity.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct TestRollVisual {
    pub total_degrees: f32,
}

/// Fixed timestep fed to the backend.
#[derive(Resource, Debug, Clone, Copy)]
pub struct TestTimestep(pub f32);

pub struct TestBackend;

impl CharacterPhysicsBackend for TestBackend {
    fn plugin() -> impl Plugin {
        NoOpBackendPlugin
    }

    fn is_grounded(world: &World, entity: Entity) -> bool {
        world
            .get::<TestBody>(entity)
            .map(|body| body.grounded)
            .unwrap_or(false)
    }

    fn move_character(world: &mut World, entity: Entity, delta: Vec3) {
        if let Some(mut body) = world.get_mut::<TestBody>(entity) {
            body.position += delta;
            body.last_displacement = delta;
        }
    }

    fn get_position(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<TestBody>(entity)
            .map(|body| body.position)
            .unwrap_or(Vec3::ZERO)
    }

    fn set_position(world: &mut World, entity: Entity, position: Vec3) {
        if let Some(mut body) = world.get_mut::<TestBody>(entity) {
            body.position = position;
        }
    }

    fn rotate_roll_visual(world: &mut World, visual: Entity, degrees: f32) {
        if let Some(mut roll) = world.get_mut::<TestRollVisual>(visual) {
            roll.total_degrees += degrees;
        }
    }

    fn get_fixed_timestep(world: &World) -> f32 {
        world
            .get_resource::<TestTimestep>()
            .map(|step| step.0)
            .unwrap_or(DT)
    }
}

pub fn test_world() -> World {
    let mut world = World::new();
    world.insert_resource(TestTimestep(DT));
    world
}

pub fn spawn_character(
    world: &mut World,
    controller: MovementController,
    config: MovementConfig,
) -> Entity {
    world
        .spawn((
            controller,
            config,
            MovementIntent::default(),
            WallProbe::default(),
            TestBody::default(),
        ))
        .id()
}

pub fn step(world: &mut World) {
    update_movement::<TestBackend>(world);
}

pub fn step_frames(world: &mut World, frames: usize) {
    for _ in 0..frames {
        step(world);
    }
}

pub fn set_grounded(world: &mut World, entity: Entity, grounded: bool) {
    world.get_mut::<TestBody>(entity).unwrap().grounded = grounded;
}

pub fn body(world: &World, entity: Entity) -> TestBody {
    *world.get::<TestBody>(entity).unwrap()
}

pub fn motion(world: &World, entity: Entity) -> MotionState {
    *world.get::<MovementController>(entity).unwrap().motion()
}

pub fn press_jump(world: &mut World, entity: Entity) {
    world.get_mut::<MovementIntent>(entity).unwrap().press_jump();
}

pub fn release_jump(world: &mut World, entity: Entity) {
    world
        .get_mut::<MovementIntent>(entity)
        .unwrap()
        .release_jump();
}

pub fn set_move_x(world: &mut World, entity: Entity, x: f32) {
    world
        .get_mut::<MovementIntent>(entity)
        .unwrap()
        .set_move_input(Vec2::new(x, 0.0));
}

pub fn set_wall_hit(world: &mut World, entity: Entity, side: WallSide) {
    let mut probe = world.get_mut::<WallProbe>(entity).unwrap();
    probe.clear();
    let hit = CollisionData::new(0.4, Vec3::X * -side.sign(), Vec3::ZERO, None);
    match side {
        WallSide::Left => probe.left = Some(hit),
        WallSide::Right => probe.right = Some(hit),
        WallSide::None => {}
    }
}

pub fn clear_wall_hit(world: &mut World, entity: Entity) {
    world.get_mut::<WallProbe>(entity).unwrap().clear();
}
