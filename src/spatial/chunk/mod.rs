//! Chunk - fixed-size dense grid of cells plus its per-tick bookkeeping
//!
//! A chunk owns:
//! - the authoritative cell grid (row-major, `x + y * width`)
//! - deferred writes and moves queued during a scan (`changes`)
//! - the intermediate/dirty/final rects (`rects`)
//! - a pixel cache regenerated only when something changed (`render`)
//!
//! Local coordinates outside `0..width` × `0..height` are a caller bug and panic.

mod changes;
mod rects;
mod render;

pub use changes::{PendingMove, PendingWrite};
pub use render::ChunkCanvas;

use crate::core::{ChunkDims, IntRect, Point};
use crate::domain::Cell;

pub struct Chunk {
    dims: ChunkDims,
    coord: Point,
    /// Top-left corner in world pixels.
    position: Point,
    cells: Vec<Cell>,
    filled_cells: usize,

    writes: Vec<PendingWrite>,
    moves: Vec<PendingMove>,

    intermediate: IntRect,
    dirty: IntRect,
    final_rect: IntRect,

    drawn: bool,
    pixels: Vec<u32>,
}

impl Chunk {
    pub fn new(dims: ChunkDims, coord: Point) -> Self {
        let area = dims.area();
        Self {
            dims,
            coord,
            position: dims.chunk_position_px(coord),
            cells: vec![Cell::EMPTY; area],
            filled_cells: 0,
            writes: Vec::new(),
            moves: Vec::new(),
            intermediate: IntRect::empty(dims.width, dims.height),
            dirty: IntRect::empty(dims.width, dims.height),
            final_rect: IntRect::empty(dims.width, dims.height),
            drawn: false,
            pixels: Vec::new(),
        }
    }

    #[inline]
    pub fn coord(&self) -> Point {
        self.coord
    }

    /// World pixel position of the top-left corner.
    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.dims.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.dims.height
    }

    #[inline]
    pub fn filled_cells(&self) -> usize {
        self.filled_cells
    }

    #[inline]
    pub fn should_remove(&self) -> bool {
        self.filled_cells == 0
    }

    /// Whether the pixel cache matches the grid.
    #[inline]
    pub fn is_drawn(&self) -> bool {
        self.drawn
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.dims.width && y < self.dims.height
    }

    /// Whether a local cell touches the chunk border.
    #[inline]
    pub fn on_edge(&self, x: i32, y: i32) -> bool {
        x == 0 || y == 0 || x == self.dims.width - 1 || y == self.dims.height - 1
    }

    #[inline]
    pub fn in_bounds_index(&self, index: usize) -> bool {
        index < self.cells.len()
    }

    /// Row-major index of a local coordinate.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> usize {
        assert!(self.in_bounds(x, y), "Chunk::index ({x}, {y}) out of bounds");
        (x + y * self.dims.width) as usize
    }

    #[inline]
    pub(crate) fn local_of(&self, index: usize) -> Point {
        let i = index as i32;
        Point::new(i % self.dims.width, i / self.dims.width)
    }

    /// Whether any write or move is queued.
    #[inline]
    pub fn has_pending(&self) -> bool {
        !self.writes.is_empty() || !self.moves.is_empty()
    }

    #[inline]
    pub fn get_cell(&self, x: i32, y: i32) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    #[inline]
    pub(crate) fn cell_at(&self, index: usize) -> &Cell {
        assert!(self.in_bounds_index(index), "Chunk::cell_at index {index} out of bounds");
        &self.cells[index]
    }

    #[inline]
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.get_cell(x, y).is_empty()
    }

    /// Immediate write. Keeps `filled_cells` in step, invalidates the pixel cache
    /// and wakes the neighbourhood for the next scan.
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        let index = self.index(x, y);
        self.set_cell_at(index, cell);
    }

    pub(crate) fn set_cell_at(&mut self, index: usize, cell: Cell) {
        assert!(self.in_bounds_index(index), "Chunk::set_cell index {index} out of bounds");
        let was_empty = self.cells[index].is_empty();
        let now_empty = cell.is_empty();
        self.cells[index] = cell;

        match (was_empty, now_empty) {
            (true, false) => self.filled_cells += 1,
            (false, true) => self.filled_cells -= 1,
            _ => {}
        }

        self.drawn = false;
        self.set_next_rect(index);
    }

    /// Iterate non-empty cells as `(local, cell)`.
    pub fn occupied(&self) -> impl Iterator<Item = (Point, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(move |(i, cell)| (self.local_of(i), cell))
    }
}
