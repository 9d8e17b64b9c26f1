//! Coordinate spaces
//!
//! - world/cell: signed cell coordinates, unbounded in principle
//! - chunk:      floored world / chunk dimension (negatives partition correctly)
//! - local:      cell offset inside its chunk, always in `0..width` / `0..height`
//! - pixel:      world cell × `cell_size`, what the camera and renderer speak

use serde::{Deserialize, Serialize};

/// Integer point, used for world, chunk and chunk-local coordinates alike.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Floored division used for world -> chunk conversion.
#[inline]
pub const fn floor_div(value: i32, size: i32) -> i32 {
    value.div_euclid(size)
}

/// Always-positive remainder used for world -> chunk-local conversion.
#[inline]
pub const fn wrap_local(value: i32, size: i32) -> i32 {
    value.rem_euclid(size)
}

/// Chunk geometry: cells per chunk on each axis and pixels per cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkDims {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Default for ChunkDims {
    fn default() -> Self {
        Self { width: 64, height: 64, cell_size: 4 }
    }
}

impl ChunkDims {
    #[inline]
    pub const fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Self { width, height, cell_size }
    }

    /// Cells per chunk.
    #[inline]
    pub const fn area(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// Pixel position -> world cell (floor, not truncation).
    #[inline]
    pub fn pos_to_grid(&self, px: f32, py: f32) -> Point {
        let size = self.cell_size as f32;
        Point::new((px / size).floor() as i32, (py / size).floor() as i32)
    }

    /// World cell -> chunk coordinate.
    #[inline]
    pub const fn grid_to_chunk(&self, x: i32, y: i32) -> Point {
        Point::new(floor_div(x, self.width), floor_div(y, self.height))
    }

    /// World cell -> chunk-local cell.
    #[inline]
    pub const fn grid_to_chunk_local(&self, x: i32, y: i32) -> Point {
        Point::new(wrap_local(x, self.width), wrap_local(y, self.height))
    }

    /// Pixel position -> chunk coordinate.
    #[inline]
    pub fn world_to_chunk(&self, px: f32, py: f32) -> Point {
        let w = (self.width * self.cell_size) as f32;
        let h = (self.height * self.cell_size) as f32;
        Point::new((px / w).floor() as i32, (py / h).floor() as i32)
    }

    /// World cell of a chunk's top-left corner. Wraps when the corner lies
    /// below `i32::MIN`; `local_to_grid` wraps back.
    #[inline]
    pub const fn chunk_origin(&self, chunk: Point) -> Point {
        Point::new(chunk.x.wrapping_mul(self.width), chunk.y.wrapping_mul(self.height))
    }

    /// Pixel position of a chunk's top-left corner. Wraps for chunks whose
    /// pixels lie past the `i32` range.
    #[inline]
    pub const fn chunk_position_px(&self, chunk: Point) -> Point {
        Point::new(
            chunk.x.wrapping_mul(self.width).wrapping_mul(self.cell_size),
            chunk.y.wrapping_mul(self.height).wrapping_mul(self.cell_size),
        )
    }

    /// Inverse of `grid_to_chunk` + `grid_to_chunk_local`.
    #[inline]
    pub const fn local_to_grid(&self, chunk: Point, local: Point) -> Point {
        let origin = self.chunk_origin(chunk);
        Point::new(origin.x.wrapping_add(local.x), origin.y.wrapping_add(local.y))
    }
}
