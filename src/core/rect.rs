//! Rectangles
//!
//! `IntRect` is the inclusive chunk-local rect behind the dirty/intermediate/final
//! bookkeeping. `ViewRect` is the camera rect in pixel space used for culling.

/// Inclusive integer rect in chunk-local cells.
///
/// The empty rect is canonically `min = (width, height)`, `max = (-1, -1)` so that
/// folding any real coordinate in with min/max shrinks it to that coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl IntRect {
    #[inline]
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Canonical empty rect for a `width × height` chunk.
    #[inline]
    pub const fn empty(width: i32, height: i32) -> Self {
        Self { min_x: width, min_y: height, max_x: -1, max_y: -1 }
    }

    #[inline]
    pub fn reset(&mut self, width: i32, height: i32) {
        *self = Self::empty(width, height);
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Fold a single cell in.
    #[inline]
    pub fn include(&mut self, x: i32, y: i32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Fold another rect in. Empty rects are ignored.
    #[inline]
    pub fn include_rect(&mut self, other: &IntRect) {
        if other.is_empty() {
            return;
        }
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    #[inline]
    pub fn union(mut self, other: &IntRect) -> IntRect {
        self.include_rect(other);
        self
    }

    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Cells on the x axis (0 for empty rects).
    #[inline]
    pub fn width(&self) -> i32 {
        if self.is_empty() { 0 } else { self.max_x - self.min_x + 1 }
    }

    #[inline]
    pub fn height(&self) -> i32 {
        if self.is_empty() { 0 } else { self.max_y - self.min_y + 1 }
    }
}

/// Camera/view rect in world pixel units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewRect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn intersects(&self, other: &ViewRect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}
