//! Framebuffer - ABGR pixel buffer for one camera view.
//!
//! Chunks blit their cached pixels in world pixel coordinates; the framebuffer
//! translates by the view origin, scales each cell to `cell_size` pixels and clips.
//! Transparent cells leave the background untouched. JS reads the buffer through
//! `ptr()`/`len()` as a `Uint8ClampedArray` of `width * height * 4` bytes.

use crate::core::{Point, ViewRect};
use crate::domain::Colour;
use crate::spatial::ChunkCanvas;

pub struct Framebuffer {
    width: i32,
    height: i32,
    origin: Point,
    background: u32,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            origin: Point::ZERO,
            background: Colour::BLANK.to_abgr(),
            pixels: Vec::new(),
        }
    }

    pub fn set_background(&mut self, colour: Colour) {
        self.background = colour.to_abgr();
    }

    /// Size the buffer to the view and clear it.
    pub fn begin(&mut self, view: &ViewRect) {
        self.width = view.width.ceil().max(0.0) as i32;
        self.height = view.height.ceil().max(0.0) as i32;
        self.origin = Point::new(view.x.floor() as i32, view.y.floor() as i32);

        let len = (self.width * self.height) as usize;
        self.pixels.clear();
        self.pixels.resize(len, self.background);
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    pub fn ptr(&self) -> *const u32 {
        self.pixels.as_ptr()
    }

    /// Length in pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at view-relative coordinates.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(x + y * self.width) as usize])
    }

    /// Fill a world-pixel rectangle, clipped to the view.
    fn fill(&mut self, x: i32, y: i32, width: i32, height: i32, packed: u32) {
        let x0 = (x - self.origin.x).max(0);
        let y0 = (y - self.origin.y).max(0);
        let x1 = (x - self.origin.x + width).min(self.width);
        let y1 = (y - self.origin.y + height).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for py in y0..y1 {
            let row = (py * self.width) as usize;
            self.pixels[row + x0 as usize..row + x1 as usize].fill(packed);
        }
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkCanvas for Framebuffer {
    fn blit(&mut self, origin: Point, width: i32, height: i32, cell_size: i32, pixels: &[u32]) {
        for cy in 0..height {
            for cx in 0..width {
                let packed = pixels[(cx + cy * width) as usize];
                // fully transparent: keep background
                if packed >> 24 == 0 {
                    continue;
                }
                self.fill(
                    origin.x + cx * cell_size,
                    origin.y + cy * cell_size,
                    cell_size,
                    cell_size,
                    packed,
                );
            }
        }
    }

    fn outline(&mut self, x: i32, y: i32, width: i32, height: i32, colour: Colour) {
        if width <= 0 || height <= 0 {
            return;
        }
        let packed = colour.to_abgr();
        self.fill(x, y, width, 1, packed);
        self.fill(x, y + height - 1, width, 1, packed);
        self.fill(x, y, 1, height, packed);
        self.fill(x + width - 1, y, 1, height, packed);
    }
}
