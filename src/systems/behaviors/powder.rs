//! PowderBehavior - sand
//!
//! Falls with velocity: up to `floor(vy)` contiguous empty cells per tick,
//! accelerating while airborne. Sinks through lighter fluids directly below,
//! otherwise slides diagonally, otherwise comes to rest with `vy` reset.

use super::{can_displace, is_corner_blocked, Behavior};
use crate::domain::Velocity;
use crate::systems::worker::UpdateContext;

/// Added to `vy` every tick spent falling.
pub const GRAVITY: f32 = 0.25;
/// Cells per tick.
pub const MAX_FALL_SPEED: f32 = 6.0;

const REST: Velocity = Velocity::new(0.0, 1.0);

pub struct PowderBehavior;

impl PowderBehavior {
    pub fn new() -> Self {
        Self
    }

    /// Contiguous empty cells along `(dx, 1)`, up to `reach`.
    fn free_run(&self, ctx: &UpdateContext, dx: i32, reach: i32) -> i32 {
        let mut n = 0;
        while n < reach && ctx.is_empty(ctx.x + dx * (n + 1), ctx.y + n + 1) {
            n += 1;
        }
        n
    }
}

impl Default for PowderBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for PowderBehavior {
    fn update(&self, ctx: &mut UpdateContext) {
        let (x, y) = (ctx.x, ctx.y);
        let kind = ctx.cell.kind;
        let vel = ctx.cell.velocity.unwrap_or(REST);

        // Straight down, as far as velocity carries it.
        let reach = (vel.dy.floor() as i32).max(1);
        let fall = self.free_run(ctx, 0, reach);
        if fall > 0 {
            ctx.move_to(x, y + fall);
            let dy = (vel.dy + GRAVITY).min(MAX_FALL_SPEED);
            ctx.cell.velocity = Some(Velocity::new(vel.dx, dy));
            return;
        }

        // Denser sinks: swap with lighter fluid below.
        if can_displace(ctx, kind, x, y + 1) {
            ctx.swap_with(x, y + 1);
            ctx.cell.velocity = Some(Velocity::new(vel.dx, REST.dy));
            return;
        }

        // Slide diagonally.
        let step = (vel.dx.abs().min(vel.dy).floor() as i32).max(1);
        let (first, second) = ctx.random_dir();
        for dx in [first, second] {
            if is_corner_blocked(ctx, dx, 1) {
                continue;
            }
            let n = self.free_run(ctx, dx, step);
            if n > 0 {
                ctx.move_to(x + dx * n, y + n);
                return;
            }
        }

        // At rest.
        ctx.cell.velocity = Some(Velocity::new(vel.dx, REST.dy));
    }
}
