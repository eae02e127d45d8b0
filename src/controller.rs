//! The movement controller component and per-frame algorithm.
//!
//! [`MovementController`] owns all runtime motion state, the active jump
//! profile/curve, and the active movement strategy. External collaborators
//! (shape selectors, UI) mutate it through the setter API; the
//! [`update_movement`](crate::systems::update_movement) system drives
//! [`step_frame`](MovementController::step_frame) once per fixed frame.
//!
//! Strategies never touch [`MotionState`] directly during a tick. They go
//! through [`StrategyContext`], which is the single mutation path shared by
//! all shapes: lateral movement helpers, the wall-stick handler, and the
//! shared gravity/vertical integration.

use std::sync::Arc;

use bevy::prelude::*;

use crate::config::{MovementConfig, INPUT_DEADZONE, MIN_ROLL_RADIUS, WALL_PUSH_DEADZONE};
use crate::detection::WallProbe;
use crate::intent::MovementIntent;
use crate::jump::{JumpCurve, JumpProfile, FALLBACK_CURVE};
use crate::state::{MotionState, WallSide, WallStick};
use crate::strategy::MovementStrategy;

/// Small negative vertical velocity held while grounded. Keeps the external
/// grounded query stable instead of snapping velocity to exactly zero.
pub const GROUNDED_VERTICAL_VELOCITY: f32 = -2.0;

/// Displacement and cosmetic rotation produced by one frame step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameMotion {
    /// Positional delta to apply through the backend's move primitive.
    pub displacement: Vec3,
    /// Cosmetic roll rotation (degrees about the roll axis) for the roll
    /// visual target, if one is set.
    pub roll_degrees: f32,
}

/// Central movement controller component.
///
/// Owns the [`MotionState`] exclusively; strategies are stateless and route
/// every effect through this component. Swapping strategies runs the
/// exit/enter transition and never leaks per-shape state across shapes.
#[derive(Component, Reflect, Clone)]
#[reflect(Component)]
pub struct MovementController {
    pub(crate) motion: MotionState,
    jump_profile: JumpProfile,
    #[reflect(ignore)]
    curve: Option<Arc<dyn JumpCurve>>,
    #[reflect(ignore)]
    strategy: Option<Arc<dyn MovementStrategy>>,
    speed_multiplier: f32,
    gravity_multiplier: f32,
    roll_visual: Option<Entity>,
}

impl Default for MovementController {
    fn default() -> Self {
        Self {
            motion: MotionState::default(),
            jump_profile: JumpProfile::default(),
            curve: None,
            strategy: None,
            speed_multiplier: 1.0,
            gravity_multiplier: 1.0,
            roll_visual: None,
        }
    }
}

impl MovementController {
    /// Create a controller with default tuning and no strategy.
    ///
    /// Until a strategy is set, frames still run the shared gravity step so
    /// the character falls instead of floating.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller with a jump curve already configured.
    pub fn with_curve(curve: Arc<dyn JumpCurve>) -> Self {
        Self {
            curve: Some(curve),
            ..Self::default()
        }
    }

    // ================== Mutation API ==================

    /// Per-shape horizontal speed scalar. Takes effect next frame.
    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.speed_multiplier = multiplier;
    }

    /// Per-shape gravity scalar. Scales integration only, never the jump
    /// velocity closed form. Takes effect next frame.
    pub fn set_gravity_multiplier(&mut self, multiplier: f32) {
        self.gravity_multiplier = multiplier;
    }

    /// Replace the active jump profile wholesale. Timers are left untouched.
    pub fn set_jump_profile(&mut self, profile: JumpProfile) {
        self.jump_profile = profile;
    }

    /// Replace the active jump curve.
    pub fn set_jump_curve(&mut self, curve: Arc<dyn JumpCurve>) {
        self.curve = Some(curve);
    }

    /// Set the opaque entity the Ball strategy rotates cosmetically. The core
    /// never inspects it; it is only handed back to the backend.
    pub fn set_roll_visual(&mut self, visual: Entity) {
        self.roll_visual = Some(visual);
    }

    /// Swap the active movement strategy.
    ///
    /// Assigning the same instance (reference identity) is a no-op and does
    /// not re-run the exit/enter hooks. Otherwise the old strategy's
    /// `on_exit` runs, the new strategy is assigned, and its `on_enter` runs.
    pub fn set_strategy(&mut self, strategy: Arc<dyn MovementStrategy>) {
        if let Some(current) = &self.strategy {
            if Arc::ptr_eq(current, &strategy) {
                return;
            }
            current.clone().on_exit(&mut self.motion);
        }
        self.strategy = Some(strategy.clone());
        strategy.on_enter(&mut self.motion);
        debug!("movement strategy set to {}", strategy.name());
    }

    // ================== Accessors ==================

    /// The controller-owned motion state.
    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    /// The active jump profile.
    pub fn jump_profile(&self) -> &JumpProfile {
        &self.jump_profile
    }

    /// Current speed multiplier.
    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Current gravity multiplier.
    pub fn gravity_multiplier(&self) -> f32 {
        self.gravity_multiplier
    }

    /// The roll visual target, if one is set.
    pub fn roll_visual(&self) -> Option<Entity> {
        self.roll_visual
    }

    /// Whether a strategy is currently assigned.
    pub fn has_strategy(&self) -> bool {
        self.strategy.is_some()
    }

    fn active_curve(&self) -> &dyn JumpCurve {
        self.curve.as_deref().unwrap_or(&FALLBACK_CURVE)
    }

    // ================== Per-Frame Step ==================

    /// Run one fixed frame.
    ///
    /// `grounded` must be sampled exactly once by the caller and is reused
    /// for every sub-step. Non-positive `dt` is a no-op frame. Returns the
    /// displacement and roll rotation to apply through the backend.
    pub fn step_frame(
        &mut self,
        intent: &MovementIntent,
        config: &MovementConfig,
        probe: WallProbe,
        dt: f32,
        grounded: bool,
    ) -> FrameMotion {
        if dt <= 0.0 {
            return FrameMotion::default();
        }

        // A queued press primes the buffer window, or wall-jumps immediately
        // while sticking. Wall jumps bypass the coyote/buffer gate entirely.
        if intent.has_queued_jump() {
            self.motion.jump_buffer_timer = self.active_curve().buffer_time(&self.jump_profile);
            if self.motion.is_sticking() {
                self.do_wall_jump(config);
            }
        }

        let coyote = self.active_curve().coyote_time(&self.jump_profile);
        self.motion.coyote_timer = if grounded {
            coyote
        } else {
            self.motion.coyote_timer - dt
        };
        self.motion.jump_buffer_timer -= dt;

        self.try_consume_jump(config);

        let strategy = self.strategy.clone();
        let mut ctx = StrategyContext {
            motion: &mut self.motion,
            profile: &self.jump_profile,
            curve: self.curve.as_deref().unwrap_or(&FALLBACK_CURVE),
            speed_multiplier: self.speed_multiplier,
            gravity_multiplier: self.gravity_multiplier,
            intent,
            config,
            probe,
            displacement: Vec3::ZERO,
            roll_degrees: 0.0,
        };

        match strategy {
            Some(strategy) => strategy.tick(&mut ctx, dt, grounded),
            // No strategy yet: still run gravity so the character does not
            // float.
            None => ctx.apply_gravity(dt, grounded, false),
        }

        let frame = FrameMotion {
            displacement: ctx.displacement,
            roll_degrees: ctx.roll_degrees,
        };

        self.motion.was_grounded = grounded;
        frame
    }

    /// Consume a buffered jump if both grace windows are open.
    ///
    /// Firing zeroes both timers, so one press produces at most one jump per
    /// buffer window no matter how many frames remain eligible.
    fn try_consume_jump(&mut self, config: &MovementConfig) {
        if self.motion.jump_buffer_timer <= 0.0 || self.motion.coyote_timer <= 0.0 {
            return;
        }

        let g = config.gravity_magnitude().max(crate::jump::MIN_GRAVITY_MAGNITUDE);
        let v0 = self.active_curve().jump_velocity(&self.jump_profile, g);

        self.motion.vertical_velocity = v0;
        self.motion.jump_buffer_timer = 0.0;
        self.motion.coyote_timer = 0.0;
        debug!("jump consumed, v0 = {v0:.2}");
    }

    /// Wall jump: fixed up velocity plus a fixed horizontal push away from
    /// the wall, stored as lateral momentum. Always immediate.
    fn do_wall_jump(&mut self, config: &MovementConfig) {
        let side = self.motion.wall_stick.side;
        self.motion.vertical_velocity = config.wall_jump_up_velocity;
        self.motion.roll_velocity = side.away_sign() * config.wall_jump_push;
        self.motion.clear_wall_stick();
        self.motion.jump_buffer_timer = 0.0;
        self.motion.coyote_timer = 0.0;
        debug!("wall jump off {side:?}");
    }
}

/// The single mutation path strategies use during a tick.
///
/// Borrowed from the controller for the duration of one strategy tick. All
/// lateral motion, wall adhesion, and the shared vertical integration go
/// through these helpers, so every shape composes against the same state
/// without corrupting it.
pub struct StrategyContext<'a> {
    motion: &'a mut MotionState,
    profile: &'a JumpProfile,
    curve: &'a dyn JumpCurve,
    speed_multiplier: f32,
    gravity_multiplier: f32,
    intent: &'a MovementIntent,
    config: &'a MovementConfig,
    probe: WallProbe,
    displacement: Vec3,
    roll_degrees: f32,
}

impl<'a> StrategyContext<'a> {
    /// The motion state, for strategies that mutate flags mid-tick.
    pub fn motion(&mut self) -> &mut MotionState {
        self.motion
    }

    /// The active config.
    pub fn config(&self) -> &MovementConfig {
        self.config
    }

    /// The active intent.
    pub fn intent(&self) -> &MovementIntent {
        self.intent
    }

    /// Effective lateral speed: walk or sprint speed, scaled by the shape's
    /// speed multiplier.
    pub fn current_speed(&self) -> f32 {
        let base = if self.intent.sprint_held() {
            self.config.sprint_speed
        } else {
            self.config.walk_speed
        };
        base * self.speed_multiplier
    }

    /// Immediate lateral motion: displacement follows input directly with no
    /// acceleration lag.
    pub fn move_horizontal_immediate(&mut self, dt: f32) {
        let x = self.intent.move_input().x;
        if x.abs() > INPUT_DEADZONE {
            self.displacement.x += x * self.current_speed() * dt;
        }
    }

    /// Momentum-based lateral motion: a linear ramp toward the target
    /// velocity, snapped to zero below the stop threshold to avoid
    /// asymptotic creep.
    pub fn move_horizontal_momentum(&mut self, dt: f32) {
        let x = self.intent.move_input().x;
        let target = x * self.current_speed();

        if x.abs() > INPUT_DEADZONE {
            self.motion.roll_velocity = move_toward(
                self.motion.roll_velocity,
                target,
                self.config.ball_acceleration * dt,
            );
        } else {
            self.motion.roll_velocity = move_toward(
                self.motion.roll_velocity,
                0.0,
                self.config.ball_deceleration * dt,
            );
        }

        if self.motion.roll_velocity.abs() < self.config.ball_stop_threshold {
            self.motion.roll_velocity = 0.0;
        }

        self.displacement.x += self.motion.roll_velocity * dt;
    }

    /// Airborne wall adhesion check (Cube).
    ///
    /// Sticks only while the player pushes into a probed wall on that side;
    /// otherwise adhesion is cleared unconditionally. While sticking, descent
    /// is clamped to the configured slide speed.
    pub fn handle_wall_stick(&mut self) {
        let x = self.intent.move_input().x;
        let pushing_left = x < -WALL_PUSH_DEADZONE;
        let pushing_right = x > WALL_PUSH_DEADZONE;

        if !pushing_left && !pushing_right {
            self.motion.clear_wall_stick();
            return;
        }

        let side = self.probe.hit_side();
        let pushing_into_wall = (side == WallSide::Left && pushing_left)
            || (side == WallSide::Right && pushing_right);

        if pushing_into_wall {
            self.motion.wall_stick = WallStick { active: true, side };
            if self.motion.vertical_velocity < -self.config.wall_slide_speed {
                self.motion.vertical_velocity = -self.config.wall_slide_speed;
            }
            return;
        }

        self.motion.clear_wall_stick();
    }

    /// Shared gravity/vertical integration. Invoked exactly once per frame by
    /// every strategy (or by the controller itself when no strategy is set).
    ///
    /// `allow_stick_override` lets an active wall stick replace the normal
    /// integration for this frame: the already-clamped velocity is applied as
    /// displacement and no further gravity accrues.
    pub fn apply_gravity(&mut self, dt: f32, grounded: bool, allow_stick_override: bool) {
        let just_landed = grounded && !self.motion.was_grounded;

        // Track the peak fall speed for the landing bounce decision.
        if !grounded && self.motion.vertical_velocity < 0.0 {
            self.motion.peak_fall_speed = self.motion.vertical_velocity.abs();
        }

        if grounded {
            if self.motion.vertical_velocity < 0.0 {
                if just_landed
                    && self.motion.bounce_active
                    && self
                        .curve
                        .should_bounce_on_landing(self.profile, self.motion.peak_fall_speed)
                    && self.motion.peak_fall_speed >= self.profile.bounce_min_fall_speed
                {
                    self.motion.vertical_velocity = self.curve.bounce_velocity(self.profile);
                    debug!(
                        "landing bounce at fall speed {:.2}",
                        self.motion.peak_fall_speed
                    );
                } else {
                    self.motion.vertical_velocity = GROUNDED_VERTICAL_VELOCITY;
                }
            }
            self.motion.peak_fall_speed = 0.0;
        }

        if allow_stick_override && self.motion.wall_stick.active {
            self.displacement.y += self.motion.vertical_velocity * dt;
            return;
        }

        let mut scale = 1.0;
        if !grounded {
            if self.motion.vertical_velocity < 0.0 {
                scale = self.curve.fall_multiplier(self.profile);
            } else if !self.intent.jump_held() {
                scale = self.curve.low_jump_multiplier(self.profile);
            }
        }

        self.motion.vertical_velocity += self.config.gravity * self.gravity_multiplier * scale * dt;
        self.displacement.y += self.motion.vertical_velocity * dt;
    }

    /// Drive the cosmetic roll rotation from lateral momentum, assuming
    /// no-slip rolling: angular rate = velocity / radius. Skipped entirely
    /// for radii near zero.
    pub fn apply_roll_visual(&mut self, dt: f32) {
        if !self.motion.roll_visual_active {
            return;
        }
        if self.config.ball_roll_radius <= MIN_ROLL_RADIUS {
            return;
        }

        let radians_per_sec = self.motion.roll_velocity / self.config.ball_roll_radius;
        self.roll_degrees -= radians_per_sec.to_degrees() * dt;
    }
}

/// Step `current` toward `target` by at most `max_delta`.
fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + delta.signum() * max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{BallStrategy, CubeStrategy, DefaultStrategy};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const DT: f32 = 1.0 / 60.0;

    fn step(
        controller: &mut MovementController,
        intent: &MovementIntent,
        config: &MovementConfig,
        grounded: bool,
    ) -> FrameMotion {
        controller.step_frame(intent, config, WallProbe::default(), DT, grounded)
    }

    // ==================== move_toward Tests ====================

    #[test]
    fn move_toward_ramps_and_snaps() {
        assert_eq!(move_toward(0.0, 10.0, 3.0), 3.0);
        assert_eq!(move_toward(9.0, 10.0, 3.0), 10.0);
        assert_eq!(move_toward(0.0, -10.0, 3.0), -3.0);
        assert_eq!(move_toward(5.0, 5.0, 3.0), 5.0);
    }

    // ==================== Strategy Switching Tests ====================

    struct CountingStrategy {
        enters: AtomicUsize,
        exits: AtomicUsize,
    }

    impl CountingStrategy {
        fn new() -> Self {
            Self {
                enters: AtomicUsize::new(0),
                exits: AtomicUsize::new(0),
            }
        }
    }

    impl MovementStrategy for CountingStrategy {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_enter(&self, _motion: &mut MotionState) {
            self.enters.fetch_add(1, Ordering::SeqCst);
        }

        fn on_exit(&self, _motion: &mut MotionState) {
            self.exits.fetch_add(1, Ordering::SeqCst);
        }

        fn tick(&self, _ctx: &mut StrategyContext, _dt: f32, _grounded: bool) {}
    }

    #[test]
    fn set_strategy_runs_enter_hook() {
        let mut controller = MovementController::new();
        let strategy = Arc::new(CountingStrategy::new());

        controller.set_strategy(strategy.clone());
        assert_eq!(strategy.enters.load(Ordering::SeqCst), 1);
        assert_eq!(strategy.exits.load(Ordering::SeqCst), 0);
        assert!(controller.has_strategy());
    }

    #[test]
    fn set_strategy_same_instance_is_noop() {
        let mut controller = MovementController::new();
        let strategy = Arc::new(CountingStrategy::new());

        controller.set_strategy(strategy.clone());
        controller.set_strategy(strategy.clone());
        controller.set_strategy(strategy.clone());

        // Hooks ran exactly once; redundant assignment never re-enters.
        assert_eq!(strategy.enters.load(Ordering::SeqCst), 1);
        assert_eq!(strategy.exits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn set_strategy_transition_runs_exit_then_enter() {
        let mut controller = MovementController::new();
        let first = Arc::new(CountingStrategy::new());
        let second = Arc::new(CountingStrategy::new());

        controller.set_strategy(first.clone());
        controller.set_strategy(second.clone());

        assert_eq!(first.exits.load(Ordering::SeqCst), 1);
        assert_eq!(second.enters.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn ball_to_cube_switch_clears_shape_state() {
        let mut controller = MovementController::new();
        controller.set_strategy(Arc::new(BallStrategy));
        controller.motion.roll_velocity = 3.5;
        controller.motion.wall_stick = WallStick {
            active: true,
            side: WallSide::Left,
        };

        controller.set_strategy(Arc::new(CubeStrategy));

        assert_eq!(controller.motion().roll_velocity, 0.0);
        assert!(!controller.motion().roll_visual_active);
        assert!(!controller.motion().bounce_active);
        assert!(!controller.motion().is_sticking());
    }

    #[test]
    fn default_enter_resets_ball_residue() {
        let mut controller = MovementController::new();
        controller.set_strategy(Arc::new(BallStrategy));
        controller.motion.roll_velocity = 2.0;

        controller.set_strategy(Arc::new(DefaultStrategy));
        assert_eq!(controller.motion().roll_velocity, 0.0);
    }

    // ==================== Jump Consumption Tests ====================

    #[test]
    fn jump_fires_only_with_both_windows_open() {
        let config = MovementConfig::default();
        let mut controller = MovementController::new();

        // Buffer open, coyote closed: no jump.
        controller.motion.jump_buffer_timer = 0.05;
        controller.motion.coyote_timer = 0.0;
        controller.try_consume_jump(&config);
        assert_eq!(controller.motion().vertical_velocity, 0.0);

        // Both open: jump fires and zeroes both timers.
        controller.motion.jump_buffer_timer = 0.05;
        controller.motion.coyote_timer = 0.05;
        controller.try_consume_jump(&config);
        assert!(controller.motion().vertical_velocity > 0.0);
        assert_eq!(controller.motion().jump_buffer_timer, 0.0);
        assert_eq!(controller.motion().coyote_timer, 0.0);
    }

    #[test]
    fn set_jump_profile_keeps_timers() {
        let mut controller = MovementController::new();
        controller.motion.coyote_timer = 0.07;
        controller.motion.jump_buffer_timer = 0.03;

        controller.set_jump_profile(JumpProfile::bouncy());

        assert_eq!(controller.motion().coyote_timer, 0.07);
        assert_eq!(controller.motion().jump_buffer_timer, 0.03);
    }

    #[test]
    fn wall_jump_bypasses_gate_and_pushes_away() {
        let config = MovementConfig::default();
        let mut intent = MovementIntent::new();
        let mut controller = MovementController::new();
        controller.set_strategy(Arc::new(CubeStrategy));

        // Long airborne: coyote window closed.
        controller.motion.coyote_timer = -1.0;
        controller.motion.wall_stick = WallStick {
            active: true,
            side: WallSide::Right,
        };

        intent.press_jump();
        step(&mut controller, &intent, &config, false);

        assert_eq!(
            controller.motion().vertical_velocity,
            config.wall_jump_up_velocity + config.gravity * DT
        );
        assert_eq!(controller.motion().roll_velocity, -config.wall_jump_push);
        assert!(!controller.motion().is_sticking());
        assert_eq!(controller.motion().jump_buffer_timer, -DT);
    }

    // ==================== Frame Step Tests ====================

    #[test]
    fn zero_dt_is_noop_frame() {
        let config = MovementConfig::default();
        let intent = MovementIntent::new();
        let mut controller = MovementController::new();
        controller.set_strategy(Arc::new(DefaultStrategy));
        controller.motion.vertical_velocity = -3.0;

        let frame = controller.step_frame(&intent, &config, WallProbe::default(), 0.0, false);

        assert_eq!(frame, FrameMotion::default());
        assert_eq!(controller.motion().vertical_velocity, -3.0);
    }

    #[test]
    fn no_strategy_still_applies_gravity() {
        let config = MovementConfig::default();
        let intent = MovementIntent::new();
        let mut controller = MovementController::new();

        let frame = step(&mut controller, &intent, &config, false);

        assert!(controller.motion().vertical_velocity < 0.0);
        assert!(frame.displacement.y < 0.0);
    }

    #[test]
    fn grounded_clamps_vertical_velocity() {
        let config = MovementConfig::default();
        let intent = MovementIntent::new();
        let mut controller = MovementController::new();
        controller.set_strategy(Arc::new(DefaultStrategy));
        controller.motion.vertical_velocity = -12.0;
        controller.motion.was_grounded = true;

        step(&mut controller, &intent, &config, true);

        // Clamp plus one grounded gravity tick.
        let expected = GROUNDED_VERTICAL_VELOCITY + config.gravity * DT;
        assert!((controller.motion().vertical_velocity - expected).abs() < 1e-5);
    }

    #[test]
    fn sprint_scales_immediate_movement() {
        let config = MovementConfig::default();
        let mut intent = MovementIntent::new();
        intent.set_move_input(Vec2::X);
        let mut controller = MovementController::new();
        controller.set_strategy(Arc::new(DefaultStrategy));
        controller.motion.was_grounded = true;

        let walk = step(&mut controller, &intent, &config, true);

        intent.set_sprint_held(true);
        let sprint = step(&mut controller, &intent, &config, true);

        assert!((walk.displacement.x - config.walk_speed * DT).abs() < 1e-6);
        assert!((sprint.displacement.x - config.sprint_speed * DT).abs() < 1e-6);
    }

    #[test]
    fn speed_multiplier_scales_movement() {
        let config = MovementConfig::default();
        let mut intent = MovementIntent::new();
        intent.set_move_input(Vec2::X);
        let mut controller = MovementController::new();
        controller.set_strategy(Arc::new(DefaultStrategy));
        controller.set_speed_multiplier(2.0);

        let frame = step(&mut controller, &intent, &config, true);
        assert!((frame.displacement.x - 2.0 * config.walk_speed * DT).abs() < 1e-6);
    }

    #[test]
    fn low_jump_multiplier_applies_when_released() {
        let config = MovementConfig::default().with_gravity(10.0);
        let profile = JumpProfile::standard().with_multipliers(1.0, 3.0);
        let mut intent = MovementIntent::new();
        let mut controller =
            MovementController::with_curve(Arc::new(crate::jump::StandardJumpCurve));
        controller.set_strategy(Arc::new(DefaultStrategy));
        controller.set_jump_profile(profile);

        // Ascending with jump held: scale 1.0.
        controller.motion.vertical_velocity = 5.0;
        intent.press_jump();
        intent.clear_queued_jump();
        step(&mut controller, &intent, &config, false);
        let held_v = controller.motion().vertical_velocity;
        assert!((held_v - (5.0 - 10.0 * DT)).abs() < 1e-5);

        // Ascending after release: low-jump multiplier.
        controller.motion.vertical_velocity = 5.0;
        intent.release_jump();
        step(&mut controller, &intent, &config, false);
        let released_v = controller.motion().vertical_velocity;
        assert!((released_v - (5.0 - 30.0 * DT)).abs() < 1e-5);
    }

    #[test]
    fn fall_multiplier_applies_while_descending() {
        let config = MovementConfig::default().with_gravity(10.0);
        let profile = JumpProfile::standard().with_multipliers(2.0, 1.0);
        let intent = MovementIntent::new();
        let mut controller =
            MovementController::with_curve(Arc::new(crate::jump::StandardJumpCurve));
        controller.set_strategy(Arc::new(DefaultStrategy));
        controller.set_jump_profile(profile);
        controller.motion.vertical_velocity = -1.0;

        step(&mut controller, &intent, &config, false);

        assert!((controller.motion().vertical_velocity - (-1.0 - 20.0 * DT)).abs() < 1e-5);
    }
}
