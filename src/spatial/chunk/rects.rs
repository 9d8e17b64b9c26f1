//! Dirty-rect bookkeeping
//!
//! - intermediate: grown by every write/wake this tick
//! - dirty:        what the next scan visits
//! - final:        bounding box of occupied cells, render only

use super::Chunk;
use crate::core::IntRect;

/// Cells around a touched cell that must be rescanned (covers diagonal reach).
const WAKE_RADIUS: i32 = 2;

impl Chunk {
    /// Schedule the 5×5 neighbourhood of `(x, y)` for the next scan. No content change.
    pub fn wake_up(&mut self, x: i32, y: i32) {
        let index = self.index(x, y);
        self.set_next_rect(index);
    }

    pub(super) fn set_next_rect(&mut self, index: usize) {
        let p = self.local_of(index);
        let w = self.dims.width;
        let h = self.dims.height;

        let grown = IntRect::new(
            (p.x - WAKE_RADIUS).max(0),
            (p.y - WAKE_RADIUS).max(0),
            (p.x + WAKE_RADIUS).min(w - 1),
            (p.y + WAKE_RADIUS).min(h - 1),
        );
        self.intermediate.include_rect(&grown);
    }

    /// End of tick: the rect grown this tick becomes the next scan's rect.
    pub fn update_rect(&mut self) {
        self.dirty = self.intermediate;
        self.intermediate.reset(self.dims.width, self.dims.height);
    }

    /// Start of tick: fold edits made since the last tick into the scan about to run.
    pub fn absorb_pending_rect(&mut self) {
        self.dirty.include_rect(&self.intermediate);
        self.intermediate.reset(self.dims.width, self.dims.height);
    }

    #[inline]
    pub fn dirty_rect(&self) -> IntRect {
        self.dirty
    }

    #[inline]
    pub fn intermediate_rect(&self) -> IntRect {
        self.intermediate
    }

    #[inline]
    pub fn final_rect(&self) -> IntRect {
        self.final_rect
    }

    /// Recompute the render bounds by full scan.
    pub fn generate_bounds(&mut self) {
        let mut rect = IntRect::empty(self.dims.width, self.dims.height);
        for (p, _) in self.occupied() {
            rect.include(p.x, p.y);
        }
        self.final_rect = rect;
    }
}
