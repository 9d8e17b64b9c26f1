//! World-coordinate cell access
//!
//! Resolves a world cell to (chunk, local), creating chunks lazily where the
//! operation allows it. Writes to a chunk border wake the neighbours that share it.

use tracing::trace;

use super::ChunkManager;
use crate::core::Point;
use crate::domain::{Cell, CellType};
use crate::spatial::ChunkId;

impl ChunkManager {
    /// Resolve a world cell to `(chunk coordinate, local coordinate)`.
    #[inline]
    pub fn locate(&self, x: i32, y: i32) -> (Point, Point) {
        (self.dims.grid_to_chunk(x, y), self.dims.grid_to_chunk_local(x, y))
    }

    /// Whether a world cell lies inside the configured world bounds.
    #[inline]
    pub fn in_world(&self, x: i32, y: i32) -> bool {
        self.bounds.contains(self.dims.grid_to_chunk(x, y))
    }

    /// Cell at a world position. `None` outside the world, otherwise the chunk is
    /// created if needed.
    pub fn get_cell(&mut self, x: i32, y: i32) -> Option<Cell> {
        let (coord, local) = self.locate(x, y);
        let id = self.get_or_create(coord)?;
        self.chunk(id).map(|c| *c.get_cell(local.x, local.y))
    }

    /// Read without creating chunks. `None` outside the world; a missing chunk
    /// reads as Empty.
    pub fn peek_cell(&self, x: i32, y: i32) -> Option<Cell> {
        let (coord, local) = self.locate(x, y);
        if !self.bounds.contains(coord) {
            return None;
        }
        Some(match self.chunk_at(coord) {
            Some(chunk) => *chunk.get_cell(local.x, local.y),
            None => Cell::EMPTY,
        })
    }

    /// Type at a world position without creating chunks.
    #[inline]
    pub fn kind_at(&self, x: i32, y: i32) -> Option<CellType> {
        self.peek_cell(x, y).map(|c| c.kind)
    }

    /// Never creates chunks. The world edge counts as solid.
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        let (coord, local) = self.locate(x, y);
        if !self.bounds.contains(coord) {
            return false;
        }
        match self.chunk_at(coord) {
            Some(chunk) => chunk.is_empty(local.x, local.y),
            None => true,
        }
    }

    /// Immediate write at a world position. Dropped outside the world.
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        let (coord, local) = self.locate(x, y);
        let Some(id) = self.get_or_create(coord) else {
            trace!(x, y, "set_cell outside world bounds dropped");
            return;
        };
        if let Some(chunk) = self.chunk_mut(id) {
            chunk.set_cell(local.x, local.y, cell);
        }
        self.wake_neighbours(coord, local);
    }

    /// Deferred write, applied in the next apply phase. Dropped outside the world.
    pub fn queue_write(&mut self, x: i32, y: i32, cell: Cell) {
        let (coord, local) = self.locate(x, y);
        let Some(id) = self.get_or_create(coord) else {
            trace!(x, y, "queue_write outside world bounds dropped");
            return;
        };
        if let Some(chunk) = self.chunk_mut(id) {
            chunk.queue_write(local.x, local.y, cell);
        }
    }

    /// Queue a move from one world cell to another. Both chunks are created as
    /// needed; returns `false` (and queues nothing) if either end is outside the world.
    pub fn move_cell(&mut self, from: Point, to: Point, swap: bool) -> bool {
        let (from_coord, from_local) = self.locate(from.x, from.y);
        let (to_coord, to_local) = self.locate(to.x, to.y);

        let Some(source) = self.get_or_create(from_coord) else {
            trace!(x = from.x, y = from.y, "move source outside world bounds");
            return false;
        };
        let Some(dest) = self.get_or_create(to_coord) else {
            trace!(x = to.x, y = to.y, "move destination outside world bounds");
            return false;
        };

        self.wake_neighbours(from_coord, from_local);

        match self.chunk_mut(dest) {
            Some(chunk) => {
                chunk.move_cell(from_local.x, from_local.y, to_local.x, to_local.y, swap, source);
                self.counters.moves_queued += 1;
                true
            }
            None => false,
        }
    }

    /// Schedule the neighbourhood of a world cell for rescanning, if its chunk exists.
    pub fn wake_up(&mut self, x: i32, y: i32) {
        let (coord, local) = self.locate(x, y);
        if let Some(chunk) = self.chunk_id(coord).and_then(|id| self.chunk_mut(id)) {
            chunk.wake_up(local.x, local.y);
        }
    }

    /// Wake the one to three existing chunks sharing the border a local cell sits on.
    pub(crate) fn wake_neighbours(&mut self, coord: Point, local: Point) {
        let w = self.dims.width;
        let h = self.dims.height;

        let nx = if local.x == 0 {
            -1
        } else if local.x == w - 1 {
            1
        } else {
            0
        };
        let ny = if local.y == 0 {
            -1
        } else if local.y == h - 1 {
            1
        } else {
            0
        };
        if nx == 0 && ny == 0 {
            return;
        }

        let world = self.dims.local_to_grid(coord, local);
        // neighbours past the i32 range do not exist
        let mut wake = |dx: i32, dy: i32| {
            if let (Some(x), Some(y)) = (world.x.checked_add(dx), world.y.checked_add(dy)) {
                self.wake_up(x, y);
            }
        };
        if nx != 0 {
            wake(nx, 0);
        }
        if ny != 0 {
            wake(0, ny);
        }
        if nx != 0 && ny != 0 {
            wake(nx, ny);
        }
    }

    /// Apply-phase write into an existing chunk slot, with border wake.
    pub(crate) fn write_index(&mut self, id: ChunkId, index: usize, cell: Cell) {
        let Some(chunk) = self.chunk_mut(id) else {
            return;
        };
        chunk.set_cell_at(index, cell);
        let coord = chunk.coord();
        let local = chunk.local_of(index);
        self.wake_neighbours(coord, local);
    }
}
