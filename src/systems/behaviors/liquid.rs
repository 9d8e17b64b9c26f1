//! LiquidBehavior - water
//!
//! Down, else sink through lighter gas below, else a random free diagonal down,
//! else spread to a random free side.

use super::{can_displace, random_free_target, Behavior};
use crate::core::Point;
use crate::systems::worker::UpdateContext;

pub struct LiquidBehavior;

impl LiquidBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LiquidBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for LiquidBehavior {
    fn update(&self, ctx: &mut UpdateContext) {
        let (x, y) = (ctx.x, ctx.y);

        if ctx.is_empty(x, y + 1) {
            ctx.move_to(x, y + 1);
            return;
        }

        if can_displace(ctx, ctx.cell.kind, x, y + 1) {
            ctx.swap_with(x, y + 1);
            return;
        }

        let diagonal = random_free_target(ctx, Point::new(x - 1, y + 1), Point::new(x + 1, y + 1));
        if let Some(to) = diagonal {
            ctx.move_to(to.x, to.y);
            return;
        }

        if let Some(to) = random_free_target(ctx, Point::new(x - 1, y), Point::new(x + 1, y)) {
            ctx.move_to(to.x, to.y);
        }
    }
}
