//! Jump tuning profiles and jump curve strategies.
//!
//! A [`JumpProfile`] is passive data describing one shape's jump/fall/bounce
//! tuning. A [`JumpCurve`] maps a profile (plus the gravity magnitude) to the
//! concrete numbers the controller integrates with. The trait's default
//! methods are the documented fallbacks, so a controller with no curve
//! configured still behaves sanely instead of crashing.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Fallback coyote time when no curve overrides it, in seconds.
pub const DEFAULT_COYOTE_TIME: f32 = 0.1;
/// Fallback jump buffer time when no curve overrides it, in seconds.
pub const DEFAULT_BUFFER_TIME: f32 = 0.1;
/// Smallest jump height fed into the closed-form velocity (guards sqrt of 0).
pub const MIN_JUMP_HEIGHT: f32 = 0.01;
/// Smallest gravity magnitude fed into the closed-form velocity.
pub const MIN_GRAVITY_MAGNITUDE: f32 = 0.01;

/// Jump tuning for one shape.
///
/// Immutable value owned by the shape definition; the controller holds a copy
/// and replaces it wholesale when a shape is equipped. The curve-specific
/// fields are read only by [`JumpCurve`] implementations.
#[derive(Reflect, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpProfile {
    /// Apex height of a full jump, in world units. Must be positive.
    pub jump_height: f32,
    /// Minimum recorded fall speed for a landing bounce to trigger.
    /// This is a hard gate applied by the controller on top of the curve's
    /// bounce predicate.
    pub bounce_min_fall_speed: f32,
    /// Grace window after leaving the ground, in seconds.
    pub coyote_time: f32,
    /// Early-press grace window before landing, in seconds.
    pub buffer_time: f32,
    /// Gravity scale while descending.
    pub fall_multiplier: f32,
    /// Gravity scale while ascending with the jump input released.
    pub low_jump_multiplier: f32,
    /// Whether this shape bounces on landing at all.
    pub bounce: bool,
    /// Upward velocity applied when a landing bounce triggers.
    pub bounce_velocity: f32,
}

impl Default for JumpProfile {
    fn default() -> Self {
        Self::standard()
    }
}

impl JumpProfile {
    /// Grounded humanoid tuning: snappy fall, shortened hops on release.
    pub fn standard() -> Self {
        Self {
            jump_height: 1.5,
            bounce_min_fall_speed: 0.0,
            coyote_time: DEFAULT_COYOTE_TIME,
            buffer_time: DEFAULT_BUFFER_TIME,
            fall_multiplier: 2.5,
            low_jump_multiplier: 2.0,
            bounce: false,
            bounce_velocity: 0.0,
        }
    }

    /// Ball tuning: floatier arc and an elastic landing bounce.
    pub fn bouncy() -> Self {
        Self {
            jump_height: 1.2,
            bounce_min_fall_speed: 6.0,
            fall_multiplier: 1.8,
            low_jump_multiplier: 1.4,
            bounce: true,
            bounce_velocity: 5.0,
            ..Self::standard()
        }
    }

    /// Override the jump height.
    pub fn with_jump_height(mut self, height: f32) -> Self {
        self.jump_height = height;
        self
    }

    /// Override both airborne gravity multipliers.
    pub fn with_multipliers(mut self, fall: f32, low_jump: f32) -> Self {
        self.fall_multiplier = fall;
        self.low_jump_multiplier = low_jump;
        self
    }
}

/// Pure, stateless mapping from a [`JumpProfile`] to jump numbers.
///
/// Every method has a defensive default so shapes without curve tuning never
/// crash: coyote and buffer windows of 0.1 s, gravity multipliers of 1.0,
/// no bounce, and the closed-form jump velocity
/// `v0 = sqrt(2 * g * jump_height)` that reaches exactly `jump_height`
/// under constant gravity `g`.
pub trait JumpCurve: Send + Sync + 'static {
    /// Initial upward speed for a jump.
    ///
    /// `gravity_magnitude` is the unscaled, positive gravity strength.
    fn jump_velocity(&self, profile: &JumpProfile, gravity_magnitude: f32) -> f32 {
        let g = gravity_magnitude.max(MIN_GRAVITY_MAGNITUDE);
        let height = profile.jump_height.max(MIN_JUMP_HEIGHT);
        (2.0 * g * height).sqrt()
    }

    /// Grace window after leaving the ground, in seconds.
    fn coyote_time(&self, _profile: &JumpProfile) -> f32 {
        DEFAULT_COYOTE_TIME
    }

    /// Early-press grace window, in seconds.
    fn buffer_time(&self, _profile: &JumpProfile) -> f32 {
        DEFAULT_BUFFER_TIME
    }

    /// Gravity scale while descending.
    fn fall_multiplier(&self, _profile: &JumpProfile) -> f32 {
        1.0
    }

    /// Gravity scale while ascending with the jump input released.
    fn low_jump_multiplier(&self, _profile: &JumpProfile) -> f32 {
        1.0
    }

    /// Whether landing at `fall_speed` should rebound instead of stopping.
    ///
    /// The controller additionally gates on `profile.bounce_min_fall_speed`,
    /// so a predicate that passes on speed alone still will not bounce below
    /// that threshold.
    fn should_bounce_on_landing(&self, _profile: &JumpProfile, _fall_speed: f32) -> bool {
        false
    }

    /// Upward velocity applied when a bounce triggers.
    fn bounce_velocity(&self, _profile: &JumpProfile) -> f32 {
        0.0
    }
}

/// The stock curve: reads every knob straight from the profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardJumpCurve;

impl JumpCurve for StandardJumpCurve {
    fn coyote_time(&self, profile: &JumpProfile) -> f32 {
        profile.coyote_time.max(0.0)
    }

    fn buffer_time(&self, profile: &JumpProfile) -> f32 {
        profile.buffer_time.max(0.0)
    }

    fn fall_multiplier(&self, profile: &JumpProfile) -> f32 {
        profile.fall_multiplier
    }

    fn low_jump_multiplier(&self, profile: &JumpProfile) -> f32 {
        profile.low_jump_multiplier
    }

    fn should_bounce_on_landing(&self, profile: &JumpProfile, _fall_speed: f32) -> bool {
        profile.bounce
    }

    fn bounce_velocity(&self, profile: &JumpProfile) -> f32 {
        profile.bounce_velocity
    }
}

/// Curve used when the controller has none configured. Inherits every
/// trait default, which are exactly the documented fallback constants.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FallbackCurve;

impl JumpCurve for FallbackCurve {}

pub(crate) static FALLBACK_CURVE: FallbackCurve = FallbackCurve;
