//! Per-chunk scan
//!
//! The worker walks a chunk's dirty rect and hands every occupied cell to a
//! `CellRule`. Rules see the grid as it was at tick start and can only queue
//! work through `UpdateContext`; nothing they do is visible until the apply pass.

use rand::Rng;

use crate::core::Point;
use crate::domain::{Cell, CellType};
use crate::spatial::{ChunkId, ChunkManager};

/// Per-cell update policy injected into `ChunkManager::update`/`step`.
pub trait CellRule {
    fn update_cell(&self, ctx: &mut UpdateContext);
}

impl<F> CellRule for F
where
    F: Fn(&mut UpdateContext),
{
    #[inline]
    fn update_cell(&self, ctx: &mut UpdateContext) {
        self(ctx)
    }
}

/// What a rule sees for one cell. Borrows the manager for the duration of the call.
pub struct UpdateContext<'a> {
    manager: &'a mut ChunkManager,
    chunk: ChunkId,
    /// World position of the cell being updated.
    pub x: i32,
    pub y: i32,
    /// Working copy. Committed as a deferred write if the rule changes it.
    pub cell: Cell,
    /// Seconds per tick.
    pub delta: f32,
    moved: bool,
}

impl<'a> UpdateContext<'a> {
    pub fn new(manager: &'a mut ChunkManager, chunk: ChunkId, x: i32, y: i32, cell: Cell, delta: f32) -> Self {
        Self { manager, chunk, x, y, cell, delta, moved: false }
    }

    /// Chunk being scanned.
    #[inline]
    pub fn chunk(&self) -> ChunkId {
        self.chunk
    }

    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether this cell already queued a move this tick.
    #[inline]
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Tick-start value at a world position. `None` outside the world.
    #[inline]
    pub fn get_cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.manager.peek_cell(x, y)
    }

    /// The world edge reads as occupied.
    #[inline]
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.manager.is_empty(x, y)
    }

    #[inline]
    pub fn has_type_at(&self, x: i32, y: i32, kind: CellType) -> bool {
        self.manager.kind_at(x, y) == Some(kind)
    }

    /// Queue a move of this cell to `(x, y)`.
    pub fn move_to(&mut self, x: i32, y: i32) -> bool {
        let from = self.position();
        self.move_cell(from, Point::new(x, y), false)
    }

    /// Queue a swap of this cell with the occupant of `(x, y)`.
    pub fn swap_with(&mut self, x: i32, y: i32) -> bool {
        let from = self.position();
        self.move_cell(from, Point::new(x, y), true)
    }

    pub fn move_cell(&mut self, from: Point, to: Point, swap: bool) -> bool {
        let queued = self.manager.move_cell(from, to, swap);
        if queued && from == self.position() {
            self.moved = true;
        }
        queued
    }

    /// Deferred write anywhere in the world.
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        self.manager.queue_write(x, y, cell);
    }

    /// Schedule a neighbourhood for the next tick's scan.
    pub fn wake_up(&mut self, x: i32, y: i32) {
        self.manager.wake_up(x, y);
    }

    #[inline]
    pub fn coin_flip(&mut self) -> bool {
        self.manager.rng_mut().gen_bool(0.5)
    }

    /// Uniform in `lo..hi`. Returns `lo` for empty ranges.
    #[inline]
    pub fn random_range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.manager.rng_mut().gen_range(lo..hi)
    }

    /// `(-1, 1)` or `(1, -1)`, picked uniformly: which side to try first.
    #[inline]
    pub fn random_dir(&mut self) -> (i32, i32) {
        if self.coin_flip() {
            (-1, 1)
        } else {
            (1, -1)
        }
    }
}

/// Run `rule` over every occupied cell in the chunk's dirty rect.
///
/// Rows go bottom to top so falling cells are decided before the cells above
/// them; `reverse_x` flips the row direction to avoid a sideways bias.
/// Returns how many cells of the rect were visited.
pub fn scan_chunk<R: CellRule + ?Sized>(
    manager: &mut ChunkManager,
    id: ChunkId,
    rule: &R,
    delta: f32,
    reverse_x: bool,
) -> u32 {
    let (rect, coord) = match manager.chunk(id) {
        Some(chunk) => (chunk.dirty_rect(), chunk.coord()),
        None => return 0,
    };
    if rect.is_empty() {
        return 0;
    }

    let dims = manager.dims();
    let origin = dims.chunk_origin(coord);
    let mut visited = 0u32;

    for ly in (rect.min_y..=rect.max_y).rev() {
        for i in 0..rect.width() {
            let lx = if reverse_x { rect.max_x - i } else { rect.min_x + i };
            visited += 1;

            let cell = match manager.chunk(id) {
                Some(chunk) => *chunk.get_cell(lx, ly),
                None => return visited,
            };
            if cell.is_empty() {
                continue;
            }

            let (x, y) = (origin.x.wrapping_add(lx), origin.y.wrapping_add(ly));
            let mut ctx = UpdateContext::new(manager, id, x, y, cell, delta);
            rule.update_cell(&mut ctx);

            if ctx.cell != cell {
                let updated = ctx.cell;
                manager.queue_write(x, y, updated);
            }
        }
    }

    visited
}
