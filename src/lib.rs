//! # `morph_character_controller`
//!
//! A 2.5D shape-shifting character controller with pluggable movement
//! strategies and physics backend abstraction.
//!
//! This crate is the locomotion core of a platform character that swaps its
//! whole movement behavior when a shape is equipped:
//! - A shared per-frame gravity/jump integration loop with coyote-time and
//!   input-buffering windows
//! - Per-shape [`MovementStrategy`](strategy::MovementStrategy) variants:
//!   humanoid (immediate velocity), ball (momentum, landing bounce, rolling
//!   visual), cube (wall adhesion and wall jumps)
//! - Per-shape [`JumpProfile`](jump::JumpProfile)/[`JumpCurve`](jump::JumpCurve)
//!   tuning with defensive fallbacks
//! - A locked lateral axis that keeps motion confined to a 2D plane
//!
//! ## Architecture
//!
//! The controller computes motion intent only. Grounding queries,
//! collision-aware displacement, and wall probes live behind
//! [`CharacterPhysicsBackend`](backend::CharacterPhysicsBackend), so physics
//! engines can be swapped; a Bevy Rapier3D backend ships behind the
//! `rapier3d` feature. Input binding, shape selection, and UI are external
//! collaborators that talk to the core through
//! [`MovementIntent`](intent::MovementIntent) and the
//! [`MovementController`](controller::MovementController) setter API.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use bevy_rapier3d::prelude::*;
//! use morph_character_controller::prelude::*;
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
//!     .add_plugins(CharacterControllerPlugin::<Rapier3dBackend>::default())
//!     .run();
//! ```
//!
//! Equipping a shape from a selector system:
//!
//! ```rust
//! use std::sync::Arc;
//! use morph_character_controller::prelude::*;
//!
//! fn equip_ball(controller: &mut MovementController) {
//!     controller.set_speed_multiplier(1.2);
//!     controller.set_gravity_multiplier(0.9);
//!     controller.set_jump_profile(JumpProfile::bouncy());
//!     controller.set_jump_curve(Arc::new(StandardJumpCurve));
//!     controller.set_strategy(Arc::new(BallStrategy));
//! }
//!
//! let mut controller = MovementController::new();
//! equip_ball(&mut controller);
//! assert!(controller.has_strategy());
//! ```

use bevy::prelude::*;

pub mod backend;
pub mod collision;
pub mod config;
pub mod controller;
pub mod detection;
pub mod intent;
pub mod jump;
pub mod state;
pub mod strategy;
pub mod systems;

#[cfg(feature = "rapier3d")]
pub mod rapier;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::backend::{CharacterPhysicsBackend, NoOpBackendPlugin};
    pub use crate::collision::CollisionData;
    pub use crate::config::MovementConfig;
    pub use crate::controller::{
        FrameMotion, MovementController, StrategyContext, GROUNDED_VERTICAL_VELOCITY,
    };
    pub use crate::detection::WallProbe;
    pub use crate::intent::MovementIntent;
    pub use crate::jump::{JumpCurve, JumpProfile, StandardJumpCurve};
    pub use crate::state::{
        Airborne, Grounded, MotionState, WallSide, WallStick, WallSticking,
    };
    pub use crate::strategy::{BallStrategy, CubeStrategy, DefaultStrategy, MovementStrategy};
    pub use crate::{CharacterControllerPlugin, CharacterControllerSet};

    #[cfg(feature = "rapier3d")]
    pub use crate::rapier::{Rapier3dBackend, Rapier3dCharacterBundle};
}

/// System sets for the character controller, run in order in `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterControllerSet {
    /// Backend sensor systems (wall probes). Run before movement so every
    /// sub-step of the frame sees the same query results.
    Sensors,
    /// The movement step and state marker sync.
    Movement,
}

/// Main plugin for the character controller system.
///
/// Generic over a physics backend `B` which provides the actual physics
/// operations (grounding, displacement, raycasts).
pub struct CharacterControllerPlugin<B: backend::CharacterPhysicsBackend> {
    _marker: std::marker::PhantomData<B>,
}

impl<B: backend::CharacterPhysicsBackend> Default for CharacterControllerPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<B: backend::CharacterPhysicsBackend> Plugin for CharacterControllerPlugin<B> {
    fn build(&self, app: &mut App) {
        // Register core types
        app.register_type::<config::MovementConfig>();
        app.register_type::<controller::MovementController>();
        app.register_type::<detection::WallProbe>();
        app.register_type::<intent::MovementIntent>();
        app.register_type::<jump::JumpProfile>();
        app.register_type::<state::MotionState>();
        app.register_type::<state::WallSide>();
        app.register_type::<state::WallStick>();
        app.register_type::<state::Grounded>();
        app.register_type::<state::Airborne>();
        app.register_type::<state::WallSticking>();

        app.configure_sets(
            FixedUpdate,
            (
                CharacterControllerSet::Sensors,
                CharacterControllerSet::Movement,
            )
                .chain(),
        );

        // Add the physics backend plugin (sensor systems)
        app.add_plugins(B::plugin());

        // Core systems run in FixedUpdate for consistent physics behavior
        app.add_systems(
            FixedUpdate,
            (systems::update_movement::<B>, systems::sync_state_markers)
                .chain()
                .in_set(CharacterControllerSet::Movement),
        );
    }
}
