use crate::domain::{Cell, CellType};

use super::WorldCore;

/// Largest brush radius honoured; larger values are clamped.
pub(super) const MAX_BRUSH_RADIUS: i32 = 256;

/// Cells of the disc of `radius` around `(cx, cy)`. Positions past the `i32`
/// range are skipped.
fn disc(cx: i32, cy: i32, radius: i32) -> impl Iterator<Item = (i32, i32)> {
    let r = radius.clamp(0, MAX_BRUSH_RADIUS);
    let r2 = r * r;
    (-r..=r)
        .flat_map(move |dy| (-r..=r).map(move |dx| (dx, dy)))
        .filter(move |&(dx, dy)| dx * dx + dy * dy <= r2)
        .filter_map(move |(dx, dy)| Some((cx.checked_add(dx)?, cy.checked_add(dy)?)))
}

/// Fill a disc of empty cells with `kind`. Occupied cells are left alone; colours
/// vary per position and frame. Returns how many cells were painted.
pub(super) fn paint(world: &mut WorldCore, cx: i32, cy: i32, radius: i32, kind: CellType) -> u32 {
    if kind == CellType::Empty {
        return erase(world, cx, cy, radius);
    }

    let frame = world.frame as u32;
    let mut painted = 0;

    for (x, y) in disc(cx, cy, radius) {
        // Also rejects positions outside the world.
        if !world.manager.is_empty(x, y) {
            continue;
        }

        let seed = (x.wrapping_mul(7) as u32)
            .wrapping_add(y.wrapping_mul(13) as u32)
            .wrapping_add(frame)
            & 31;
        let cell = Cell::of(kind);
        world.manager.set_cell(x, y, cell.with_colour(cell.colour.shaded(seed)));
        painted += 1;
    }

    painted
}

/// Clear a disc. Never creates chunks. Returns how many cells were cleared.
pub(super) fn erase(world: &mut WorldCore, cx: i32, cy: i32, radius: i32) -> u32 {
    let mut erased = 0;

    for (x, y) in disc(cx, cy, radius) {
        let occupied = world.manager.peek_cell(x, y).is_some_and(|c| !c.is_empty());
        if occupied {
            world.manager.set_cell(x, y, Cell::EMPTY);
            erased += 1;
        }
    }

    erased
}

pub(super) fn paint_at_pixel(world: &mut WorldCore, px: f32, py: f32, radius: i32, kind: CellType) -> u32 {
    let at = world.settings.chunk.pos_to_grid(px, py);
    paint(world, at.x, at.y, radius, kind)
}

pub(super) fn erase_at_pixel(world: &mut WorldCore, px: f32, py: f32, radius: i32) -> u32 {
    let at = world.settings.chunk.pos_to_grid(px, py);
    erase(world, at.x, at.y, radius)
}
