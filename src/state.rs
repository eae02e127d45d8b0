//! Controller-owned motion state and state marker components.
//!
//! [`MotionState`] is the single home for all per-character runtime state.
//! It is owned exclusively by the [`MovementController`](crate::controller::MovementController);
//! movement strategies never hold state of their own and mutate this struct
//! only through its methods or the tick context helpers.

use bevy::prelude::*;

/// Which side a wall was detected or stuck on.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallSide {
    /// No wall.
    #[default]
    None,
    /// Wall on the character's left (negative X).
    Left,
    /// Wall on the character's right (positive X).
    Right,
}

impl WallSide {
    /// Direction sign toward the wall: -1.0 for left, +1.0 for right, 0.0 for none.
    pub fn sign(self) -> f32 {
        match self {
            WallSide::None => 0.0,
            WallSide::Left => -1.0,
            WallSide::Right => 1.0,
        }
    }

    /// Direction sign pointing away from the wall (used for wall jump pushes).
    pub fn away_sign(self) -> f32 {
        -self.sign()
    }
}

/// Wall adhesion state (Cube shape).
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallStick {
    /// Whether the character is currently stuck to a wall.
    pub active: bool,
    /// The side being stuck to. Meaningful only while `active`.
    pub side: WallSide,
}

/// Runtime motion state, owned exclusively by the movement controller.
///
/// Strategies read and mutate this through the controller's tick context;
/// external collaborators only get shared access.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct MotionState {
    /// Vertical velocity in units/second. The single source of truth for
    /// vertical motion across all strategies.
    pub vertical_velocity: f32,
    /// Lateral momentum in units/second. Driven by the Ball strategy's
    /// acceleration ramp and by wall jump pushes.
    pub roll_velocity: f32,
    /// Spawn-time value of the locked lateral axis (world Z). Captured on the
    /// first frame and clamped back every frame while axis locking is enabled.
    pub locked_lateral: Option<f32>,
    /// Counts down while airborne; reset to the coyote time whenever grounded.
    pub coyote_timer: f32,
    /// Counts down from the buffer time on a jump press.
    pub jump_buffer_timer: f32,
    /// Grounded flag from the previous frame (landing edge detection).
    pub was_grounded: bool,
    /// Largest absolute fall speed seen while airborne and descending.
    /// Reset once grounded.
    pub peak_fall_speed: f32,
    /// Wall adhesion state.
    pub wall_stick: WallStick,
    /// Whether the rolling visual should be driven (Ball shape).
    pub roll_visual_active: bool,
    /// Whether landing bounces are enabled (Ball shape).
    pub bounce_active: bool,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            vertical_velocity: 0.0,
            roll_velocity: 0.0,
            locked_lateral: None,
            coyote_timer: 0.0,
            jump_buffer_timer: 0.0,
            was_grounded: false,
            peak_fall_speed: 0.0,
            wall_stick: WallStick::default(),
            roll_visual_active: false,
            bounce_active: false,
        }
    }
}

impl MotionState {
    /// Zero out lateral momentum.
    pub fn reset_lateral_momentum(&mut self) {
        self.roll_velocity = 0.0;
    }

    /// Clear wall adhesion state entirely.
    pub fn clear_wall_stick(&mut self) {
        self.wall_stick = WallStick::default();
    }

    /// Enable or disable the rolling visual.
    pub fn set_roll_visual_active(&mut self, active: bool) {
        self.roll_visual_active = active;
    }

    /// Enable or disable landing bounces.
    pub fn set_bounce_active(&mut self, active: bool) {
        self.bounce_active = active;
    }

    /// Check if the character is actively stuck to a wall on a real side.
    pub fn is_sticking(&self) -> bool {
        self.wall_stick.active && self.wall_stick.side != WallSide::None
    }
}

/// Marker component indicating the character was grounded last frame.
///
/// Synced automatically after the movement step. Mutually exclusive with
/// [`Airborne`]. Query these from animation/FX systems instead of reading
/// [`MotionState`] directly.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Grounded;

/// Marker component indicating the character was airborne last frame.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Airborne;

/// Marker component indicating the character is wall-sticking.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct WallSticking;
