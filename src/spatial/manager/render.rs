//! View-culled render passes over live chunks.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::ChunkManager;
use crate::core::{ChunkDims, Point, ViewRect};
use crate::spatial::chunk::{Chunk, ChunkCanvas};

/// Pixel extent of the chunk at pixel position `pos`.
#[inline]
fn chunk_extent(dims: ChunkDims, pos: Point) -> ViewRect {
    ViewRect::new(
        pos.x as f32,
        pos.y as f32,
        (dims.width * dims.cell_size) as f32,
        (dims.height * dims.cell_size) as f32,
    )
}

impl ChunkManager {
    /// Chunk extent in world pixels.
    #[inline]
    pub fn chunk_view_rect(&self, chunk: &Chunk) -> ViewRect {
        chunk_extent(self.dims, chunk.position())
    }

    #[inline]
    pub fn is_chunk_in_view(&self, chunk: &Chunk, view: &ViewRect) -> bool {
        self.chunk_view_rect(chunk).intersects(view)
    }

    /// Regenerate the pixel caches of changed chunks intersecting `view`.
    /// Returns how many were regenerated.
    pub fn pre_draw(&mut self, view: &ViewRect) -> u32 {
        let dims = self.dims;
        let in_view = move |chunk: &Chunk| chunk_extent(dims, chunk.position()).intersects(view);

        // Render-only parallelism; the simulation tick itself stays single-threaded.
        #[cfg(feature = "parallel")]
        let redrawn: u32 = self
            .slots
            .par_iter_mut()
            .filter_map(Option::as_mut)
            .filter(|chunk| in_view(&**chunk))
            .map(|chunk| chunk.pre_draw() as u32)
            .sum();

        #[cfg(not(feature = "parallel"))]
        let redrawn: u32 = self
            .slots
            .iter_mut()
            .filter_map(Option::as_mut)
            .filter(|chunk| in_view(&**chunk))
            .map(|chunk| chunk.pre_draw() as u32)
            .sum();

        redrawn
    }

    /// Draw chunks intersecting `view` in iteration order. Returns how many were drawn.
    pub fn draw(&self, view: &ViewRect, debug: bool, canvas: &mut dyn ChunkCanvas) -> u32 {
        let mut drawn = 0;
        for chunk in self.chunks() {
            if self.is_chunk_in_view(chunk, view) {
                chunk.draw(canvas, debug);
                drawn += 1;
            }
        }
        drawn
    }
}
