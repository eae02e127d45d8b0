//! Controller configuration.
//!
//! [`MovementConfig`] carries the per-character tunables that are not part of
//! a shape's jump profile: ground speeds, gravity, the 2.5D axis lock, and
//! the wall-stick and ball-momentum blocks. Configs are plain serde data so
//! they can live in RON tuning files next to the shape definitions.

use bevy::prelude::*;
use ron::extensions::Extensions;
use serde::{Deserialize, Serialize};

/// Move input below this magnitude is treated as no input.
pub const INPUT_DEADZONE: f32 = 0.01;
/// Move input past this magnitude counts as pushing toward a wall.
pub const WALL_PUSH_DEADZONE: f32 = 0.1;
/// Roll radii at or below this skip the rolling visual entirely.
pub const MIN_ROLL_RADIUS: f32 = 1.0e-4;

/// Configuration parameters for the character controller.
#[derive(Component, Reflect, Debug, Clone, Copy, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct MovementConfig {
    // === Ground Movement ===
    /// Horizontal speed while walking (units/second).
    pub walk_speed: f32,
    /// Horizontal speed while sprinting (units/second).
    pub sprint_speed: f32,

    // === Gravity ===
    /// Gravity acceleration (units/second^2). Negative pulls down. The
    /// absolute value feeds the jump velocity closed form.
    pub gravity: f32,

    // === 2.5D Axis Lock ===
    /// Clamp the world Z coordinate back to its spawn value every frame.
    pub lock_lateral_axis: bool,

    // === Wall Stick (Cube) ===
    /// How far the side probes reach from the character center.
    pub wall_check_distance: f32,
    /// Maximum descent speed while stuck to a wall (positive, units/second).
    pub wall_slide_speed: f32,
    /// Vertical velocity applied by a wall jump.
    pub wall_jump_up_velocity: f32,
    /// Horizontal momentum applied by a wall jump, directed away from the wall.
    pub wall_jump_push: f32,
    /// Optional collision group filter for the wall probes, as raw
    /// (memberships, filters) bits. `None` inherits the character's own groups.
    pub wall_groups: Option<(u32, u32)>,

    // === Ball Momentum (Ball) ===
    /// Lateral acceleration toward the target velocity (units/second^2).
    pub ball_acceleration: f32,
    /// Lateral deceleration toward zero when there is no input (units/second^2).
    pub ball_deceleration: f32,
    /// Momentum below this magnitude snaps to zero to avoid asymptotic creep.
    pub ball_stop_threshold: f32,
    /// Radius used by the no-slip rolling visual. Values near zero skip the
    /// visual rather than divide by it.
    pub ball_roll_radius: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 4.5,
            sprint_speed: 7.0,
            gravity: -25.0,
            lock_lateral_axis: true,
            wall_check_distance: 0.6,
            wall_slide_speed: 1.0,
            wall_jump_up_velocity: 8.0,
            wall_jump_push: 10.0,
            wall_groups: None,
            ball_acceleration: 35.0,
            ball_deceleration: 10.0,
            ball_stop_threshold: 0.05,
            ball_roll_radius: 0.5,
        }
    }
}

impl MovementConfig {
    /// Default tuning for a player character.
    pub fn player() -> Self {
        Self::default()
    }

    /// Override walk and sprint speeds.
    pub fn with_speeds(mut self, walk: f32, sprint: f32) -> Self {
        self.walk_speed = walk;
        self.sprint_speed = sprint;
        self
    }

    /// Override gravity. Positive inputs are flipped so gravity always pulls
    /// down.
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = -gravity.abs();
        self
    }

    /// Enable or disable the lateral axis lock.
    pub fn with_axis_lock(mut self, lock: bool) -> Self {
        self.lock_lateral_axis = lock;
        self
    }

    /// Override the wall-stick block.
    pub fn with_wall_stick(mut self, check_distance: f32, slide_speed: f32) -> Self {
        self.wall_check_distance = check_distance;
        self.wall_slide_speed = slide_speed;
        self
    }

    /// Override the ball momentum ramp.
    pub fn with_ball_momentum(mut self, acceleration: f32, deceleration: f32) -> Self {
        self.ball_acceleration = acceleration;
        self.ball_deceleration = deceleration;
        self
    }

    /// Unscaled gravity magnitude used by the jump velocity closed form.
    pub fn gravity_magnitude(&self) -> f32 {
        self.gravity.abs()
    }

    /// Parse a config from RON text.
    ///
    /// Missing fields fall back to their defaults, so tuning files only need
    /// to list what they change.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigLoadError> {
        ron_options()
            .from_str(text)
            .map_err(|e| ConfigLoadError {
                file: "<inline>".to_string(),
                message: format!("Parse error: {}", e),
            })
    }

    /// Load a config from a RON file on disk.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigLoadError> {
        let file_name = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigLoadError {
            file: file_name.clone(),
            message: format!("IO error: {}", e),
        })?;

        ron_options()
            .from_str(&contents)
            .map_err(|e| ConfigLoadError {
                file: file_name,
                message: format!("Parse error: {}", e),
            })
    }
}

/// RON options with extensions enabled for more flexible tuning files.
fn ron_options() -> ron::Options {
    ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
}

/// Error type for config loading failures.
#[derive(Debug)]
pub struct ConfigLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ConfigLoadError {}
