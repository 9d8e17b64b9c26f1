//! Behaviors - per-category movement rules
//!
//! Each category gets one `Behavior`; `BehaviorRegistry` dispatches on the cell's
//! category and then runs the life-time pass, so it is the `CellRule` the world
//! drives by default.

mod gas;
mod liquid;
mod powder;

pub use gas::GasBehavior;
pub use liquid::LiquidBehavior;
pub use powder::PowderBehavior;

use crate::core::Point;
use crate::domain::{Category, Cell, CellType};
use crate::systems::worker::{CellRule, UpdateContext};

pub trait Behavior {
    fn update(&self, ctx: &mut UpdateContext);
}

/// First free target of two, tried in uniformly random order. `None` if both are taken.
#[inline]
pub fn random_free_target(ctx: &mut UpdateContext, a: Point, b: Point) -> Option<Point> {
    let (first, second) = if ctx.coin_flip() { (a, b) } else { (b, a) };
    if ctx.is_empty(first.x, first.y) {
        Some(first)
    } else if ctx.is_empty(second.x, second.y) {
        Some(second)
    } else {
        None
    }
}

/// Whether a mover of `kind` may swap with the occupant at `(x, y)`: the occupant
/// must be a non-solid, strictly lighter cell.
#[inline]
pub fn can_displace(ctx: &UpdateContext, kind: CellType, x: i32, y: i32) -> bool {
    let Some(mine) = kind.density() else {
        return false;
    };
    match ctx.get_cell(x, y).and_then(|c| c.kind.density()) {
        Some(theirs) => mine > theirs,
        None => false,
    }
}

/// Whether `(x, y)` blocks diagonal movement: a solid cell or the world edge.
#[inline]
pub fn is_solid_at(ctx: &UpdateContext, x: i32, y: i32) -> bool {
    match ctx.get_cell(x, y) {
        Some(cell) => cell.kind.category() == Category::Solid,
        None => true,
    }
}

/// Diagonal step guard: a 1-cell staircase of solids is watertight, so a move of
/// `(dx, dy)` is refused when both orthogonal neighbours are solid.
#[inline]
pub fn is_corner_blocked(ctx: &UpdateContext, dx: i32, dy: i32) -> bool {
    is_solid_at(ctx, ctx.x + dx, ctx.y) && is_solid_at(ctx, ctx.x, ctx.y + dy)
}

/// Count down `life_time`; on expiry Smoke vanishes and Fire turns into Smoke.
pub fn tick_life_time(ctx: &mut UpdateContext) {
    let Some(life) = ctx.cell.life_time else {
        return;
    };
    let left = life - ctx.delta;
    if left > 0.0 {
        ctx.cell.life_time = Some(left);
        return;
    }
    ctx.cell = match ctx.cell.kind {
        CellType::Fire => Cell::smoke(),
        CellType::Smoke => Cell::EMPTY,
        _ => Cell { life_time: None, ..ctx.cell },
    };
}

/// Dispatch by category.
pub struct BehaviorRegistry {
    powder: PowderBehavior,
    liquid: LiquidBehavior,
    gas: GasBehavior,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self {
            powder: PowderBehavior::new(),
            liquid: LiquidBehavior::new(),
            gas: GasBehavior::new(),
        }
    }

    pub fn update(&self, category: Category, ctx: &mut UpdateContext) {
        match category {
            Category::Powder => self.powder.update(ctx),
            Category::Liquid => self.liquid.update(ctx),
            Category::Gas => self.gas.update(ctx),
            // Solids and Fire stay put
            Category::Solid | Category::Energy | Category::None => {}
        }
    }
}

impl Default for BehaviorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CellRule for BehaviorRegistry {
    fn update_cell(&self, ctx: &mut UpdateContext) {
        self.update(ctx.cell.kind.category(), ctx);
        tick_life_time(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChunkDims, SimulationSettings, TickProfiler};
    use crate::domain::SMOKE_LIFE_TIME;
    use crate::spatial::ChunkManager;

    fn manager() -> ChunkManager {
        ChunkManager::new(&SimulationSettings {
            chunk: ChunkDims::new(16, 16, 1),
            ..SimulationSettings::default()
        })
    }

    #[test]
    fn stone_and_wood_never_move() {
        let mut m = manager();
        let mut profiler = TickProfiler::new();
        let rules = BehaviorRegistry::new();
        m.set_cell(4, 4, Cell::stone());
        m.set_cell(6, 4, Cell::wood());
        for _ in 0..10 {
            m.step(&rules, &mut profiler);
        }
        assert_eq!(m.kind_at(4, 4), Some(CellType::Stone));
        assert_eq!(m.kind_at(6, 4), Some(CellType::Wood));
        assert_eq!(m.filled_cells(), 2);
    }

    #[test]
    fn smoke_burns_out() {
        let mut m = ChunkManager::new(&SimulationSettings {
            chunk: ChunkDims::new(16, 16, 1),
            time_step: 0.5,
            ..SimulationSettings::default()
        });
        let mut profiler = TickProfiler::new();
        let rules = BehaviorRegistry::new();
        // boxed in so it cannot drift
        m.set_cell(5, 5, Cell::smoke());
        for (x, y) in [(4, 4), (5, 4), (6, 4), (4, 5), (6, 5), (4, 6), (5, 6), (6, 6)] {
            m.set_cell(x, y, Cell::stone());
        }

        let ticks = (SMOKE_LIFE_TIME / 0.5) as usize;
        for _ in 0..ticks - 1 {
            m.step(&rules, &mut profiler);
        }
        assert_eq!(m.kind_at(5, 5), Some(CellType::Smoke));
        m.step(&rules, &mut profiler);
        assert!(m.is_empty(5, 5));
    }

    #[test]
    fn fire_turns_into_smoke() {
        let mut m = ChunkManager::new(&SimulationSettings {
            chunk: ChunkDims::new(16, 16, 1),
            time_step: 0.5,
            ..SimulationSettings::default()
        });
        let mut profiler = TickProfiler::new();
        let rules = BehaviorRegistry::new();
        m.set_cell(5, 10, Cell::fire());
        m.step(&rules, &mut profiler);
        assert_eq!(m.kind_at(5, 10), Some(CellType::Fire));
        m.step(&rules, &mut profiler);
        let cell = m.peek_cell(5, 10).unwrap();
        assert_eq!(cell.kind, CellType::Smoke);
        assert_eq!(cell.life_time, Some(SMOKE_LIFE_TIME));
    }

    #[test]
    fn displacement_follows_density() {
        let mut m = manager();
        m.set_cell(0, 1, Cell::water());
        m.set_cell(1, 1, Cell::smoke());
        m.set_cell(2, 1, Cell::stone());
        let mut ctx = UpdateContext::new(&mut m, crate::spatial::ChunkId(0), 0, 0, Cell::sand(), 0.1);
        assert!(can_displace(&ctx, CellType::Sand, 0, 1));
        assert!(can_displace(&ctx, CellType::Sand, 1, 1));
        assert!(!can_displace(&ctx, CellType::Sand, 2, 1));
        assert!(!can_displace(&ctx, CellType::Smoke, 0, 1));
        assert!(can_displace(&ctx, CellType::Water, 1, 1));
        assert!(!can_displace(&ctx, CellType::Sand, 3, 1));
        assert!(random_free_target(&mut ctx, Point::new(2, 1), Point::new(3, 1)) == Some(Point::new(3, 1)));
    }
}
