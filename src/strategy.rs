//! Per-shape movement strategies.
//!
//! Each equipped shape selects one strategy. Strategies are stateless: every
//! effect goes through the controller's [`StrategyContext`] or the
//! [`MotionState`] mutators in the enter/exit hooks, so switching shapes
//! never leaks behavior from the previous one.

use crate::controller::StrategyContext;
use crate::state::MotionState;

/// Behavior contract for one shape.
///
/// The controller holds exactly one strategy at a time behind an
/// `Arc<dyn MovementStrategy>` and swaps it transactionally: `on_exit` on the
/// old instance, assignment, `on_enter` on the new one. Assigning the same
/// instance again is a no-op.
///
/// Implementations must leave [`MotionState`] consistent on enter: clear the
/// rolling, bounce, and wall-stick channels unless the shape re-asserts them.
pub trait MovementStrategy: Send + Sync + 'static {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Called when this strategy becomes active.
    fn on_enter(&self, _motion: &mut MotionState) {}

    /// Called when this strategy is replaced.
    fn on_exit(&self, _motion: &mut MotionState) {}

    /// Run one frame: lateral movement plus the shared gravity step.
    fn tick(&self, ctx: &mut StrategyContext, dt: f32, grounded: bool);
}

/// Humanoid shape: immediate lateral velocity, plain gravity.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStrategy;

impl MovementStrategy for DefaultStrategy {
    fn name(&self) -> &'static str {
        "default"
    }

    fn on_enter(&self, motion: &mut MotionState) {
        motion.set_roll_visual_active(false);
        motion.set_bounce_active(false);
        motion.reset_lateral_momentum();
        motion.clear_wall_stick();
    }

    fn tick(&self, ctx: &mut StrategyContext, dt: f32, grounded: bool) {
        ctx.move_horizontal_immediate(dt);
        ctx.apply_gravity(dt, grounded, false);
    }
}

/// Ball shape: momentum-based lateral motion, landing bounce, rolling visual.
#[derive(Debug, Clone, Copy, Default)]
pub struct BallStrategy;

impl MovementStrategy for BallStrategy {
    fn name(&self) -> &'static str {
        "ball"
    }

    fn on_enter(&self, motion: &mut MotionState) {
        motion.reset_lateral_momentum();
        motion.set_roll_visual_active(true);
        motion.set_bounce_active(true);
        motion.clear_wall_stick();
    }

    fn on_exit(&self, motion: &mut MotionState) {
        motion.set_roll_visual_active(false);
        motion.set_bounce_active(false);
    }

    fn tick(&self, ctx: &mut StrategyContext, dt: f32, grounded: bool) {
        ctx.move_horizontal_momentum(dt);
        ctx.apply_gravity(dt, grounded, false);
        ctx.apply_roll_visual(dt);
    }
}

/// Cube shape: immediate lateral velocity plus airborne wall adhesion.
#[derive(Debug, Clone, Copy, Default)]
pub struct CubeStrategy;

impl MovementStrategy for CubeStrategy {
    fn name(&self) -> &'static str {
        "cube"
    }

    fn on_enter(&self, motion: &mut MotionState) {
        motion.set_roll_visual_active(false);
        motion.set_bounce_active(false);
        motion.reset_lateral_momentum();
        motion.clear_wall_stick();
    }

    fn on_exit(&self, motion: &mut MotionState) {
        motion.clear_wall_stick();
    }

    fn tick(&self, ctx: &mut StrategyContext, dt: f32, grounded: bool) {
        ctx.move_horizontal_immediate(dt);

        // Grounding always clears adhesion; the probe check only runs in
        // the air.
        if grounded {
            ctx.motion().clear_wall_stick();
        } else {
            ctx.handle_wall_stick();
        }

        ctx.apply_gravity(dt, grounded, true);
    }
}
