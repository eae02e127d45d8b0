//! Movement intent component.
//!
//! Intent is the raw per-frame desire from player input or AI: a 2-axis move
//! vector, a sprint flag, and edge-triggered jump events. The external input
//! collaborator writes it; the controller systems read it. All setters are
//! idempotent and last-write-wins within a frame.

use bevy::prelude::*;

/// Raw movement intent for a character.
///
/// The jump events are edge-triggered: call [`press_jump`](Self::press_jump)
/// once per physical press and [`release_jump`](Self::release_jump) once per
/// release. The press queues a buffered jump request for the next movement
/// step; the held flag shapes the low-jump gravity multiplier for
/// hold-to-jump-higher behavior.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use morph_character_controller::prelude::*;
///
/// let mut intent = MovementIntent::default();
/// intent.set_move_input(Vec2::new(1.0, 0.0));
/// intent.set_sprint_held(true);
/// intent.press_jump();
///
/// assert!(intent.jump_held());
/// assert!(intent.has_queued_jump());
///
/// intent.release_jump();
/// assert!(!intent.jump_held());
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct MovementIntent {
    /// Raw 2-axis move vector, each axis clamped to [-1, 1]. Only the X axis
    /// drives lateral motion; Y is carried for collaborators that want it.
    move_input: Vec2,
    /// Whether sprint is currently held.
    sprint_held: bool,
    /// Whether the jump input is currently held.
    jump_held: bool,
    /// A press edge waiting to be consumed by the next movement step.
    pub(crate) jump_queued: bool,
}

impl MovementIntent {
    /// Create a new empty intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw move vector. Each axis is clamped to [-1, 1].
    pub fn set_move_input(&mut self, input: Vec2) {
        self.move_input = input.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    }

    /// Set whether sprint is held.
    pub fn set_sprint_held(&mut self, held: bool) {
        self.sprint_held = held;
    }

    /// Register a jump press edge.
    ///
    /// Sets the held flag and queues a buffered jump request. Calling this
    /// again before the step consumes the queue simply re-queues; the buffer
    /// window restarts from the most recent press.
    pub fn press_jump(&mut self) {
        self.jump_held = true;
        self.jump_queued = true;
    }

    /// Register a jump release edge. Only affects the low-jump gravity
    /// multiplier; an already-queued press still fires.
    pub fn release_jump(&mut self) {
        self.jump_held = false;
    }

    /// The current move vector.
    pub fn move_input(&self) -> Vec2 {
        self.move_input
    }

    /// Whether sprint is held.
    pub fn sprint_held(&self) -> bool {
        self.sprint_held
    }

    /// Whether the jump input is held.
    pub fn jump_held(&self) -> bool {
        self.jump_held
    }

    /// Whether a press edge is waiting for the movement step.
    pub fn has_queued_jump(&self) -> bool {
        self.jump_queued
    }

    pub(crate) fn clear_queued_jump(&mut self) {
        self.jump_queued = false;
    }
}
