//! GasBehavior - smoke rises: up, else a random free diagonal up, else sideways.

use super::{random_free_target, Behavior};
use crate::core::Point;
use crate::systems::worker::UpdateContext;

pub struct GasBehavior;

impl GasBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GasBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for GasBehavior {
    fn update(&self, ctx: &mut UpdateContext) {
        let (x, y) = (ctx.x, ctx.y);

        if ctx.is_empty(x, y - 1) {
            ctx.move_to(x, y - 1);
            return;
        }

        let target = random_free_target(ctx, Point::new(x - 1, y - 1), Point::new(x + 1, y - 1))
            .or_else(|| random_free_target(ctx, Point::new(x - 1, y), Point::new(x + 1, y)));
        if let Some(to) = target {
            ctx.move_to(to.x, to.y);
        }
    }
}
