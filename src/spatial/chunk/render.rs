//! Chunk rendering: one ABGR pixel per cell, regenerated only when the grid changed.

use super::Chunk;
use crate::core::{IntRect, Point};
use crate::domain::Colour;

/// Render target the chunks draw into. All coordinates are world pixels.
pub trait ChunkCanvas {
    /// Copy a chunk's cell pixels (`width × height`, one per cell) to `origin`,
    /// each cell covering `cell_size × cell_size` pixels.
    fn blit(&mut self, origin: Point, width: i32, height: i32, cell_size: i32, pixels: &[u32]);

    /// 1-pixel rectangle outline.
    fn outline(&mut self, x: i32, y: i32, width: i32, height: i32, colour: Colour);

    /// Debug text. Targets without text support may ignore it.
    fn label(&mut self, _x: i32, _y: i32, _text: &str, _colour: Colour) {}
}

impl Chunk {
    /// Regenerate render bounds and the pixel cache if the grid changed since the
    /// last call. Returns whether anything was regenerated.
    pub fn pre_draw(&mut self) -> bool {
        if self.drawn {
            return false;
        }

        self.generate_bounds();

        let area = self.dims.area();
        self.pixels.clear();
        self.pixels.resize(area, Colour::BLANK.to_abgr());

        let rect = self.final_rect;
        if !rect.is_empty() {
            let w = self.dims.width;
            for y in rect.min_y..=rect.max_y {
                for x in rect.min_x..=rect.max_x {
                    let i = (x + y * w) as usize;
                    let cell = &self.cells[i];
                    if !cell.is_empty() {
                        self.pixels[i] = cell.colour.to_abgr();
                    }
                }
            }
        }

        self.drawn = true;
        true
    }

    /// Cached pixels from the last `pre_draw` (empty before the first one).
    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn draw(&self, canvas: &mut dyn ChunkCanvas, debug: bool) {
        let size = self.dims.cell_size;
        let w = self.dims.width;
        let h = self.dims.height;

        if !self.pixels.is_empty() {
            canvas.blit(self.position, w, h, size, &self.pixels);
        }

        if !debug {
            return;
        }

        let pos = self.position;
        canvas.outline(pos.x, pos.y, w * size, h * size, Colour::GREEN);

        // An empty dirty rect means the chunk is asleep.
        if self.dirty.is_empty() {
            canvas.outline(pos.x, pos.y, w * size, h * size, Colour::BLUE);
        } else {
            outline_rect(canvas, pos, size, &self.dirty, Colour::RED);
        }

        if !self.final_rect.is_empty() {
            outline_rect(canvas, pos, size, &self.final_rect, Colour::WHITE);
        }

        canvas.label(pos.x, pos.y, &self.filled_cells.to_string(), Colour::YELLOW);
    }
}

fn outline_rect(canvas: &mut dyn ChunkCanvas, pos: Point, size: i32, rect: &IntRect, colour: Colour) {
    canvas.outline(
        pos.x + rect.min_x * size,
        pos.y + rect.min_y * size,
        rect.width() * size,
        rect.height() * size,
        colour,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChunkDims;
    use crate::domain::Cell;

    #[derive(Default)]
    struct Recorder {
        blits: usize,
        outlines: Vec<(i32, i32, i32, i32, Colour)>,
        labels: Vec<String>,
    }

    impl ChunkCanvas for Recorder {
        fn blit(&mut self, _origin: Point, _w: i32, _h: i32, _s: i32, _pixels: &[u32]) {
            self.blits += 1;
        }

        fn outline(&mut self, x: i32, y: i32, width: i32, height: i32, colour: Colour) {
            self.outlines.push((x, y, width, height, colour));
        }

        fn label(&mut self, _x: i32, _y: i32, text: &str, _colour: Colour) {
            self.labels.push(text.to_string());
        }
    }

    #[test]
    fn pre_draw_only_regenerates_after_changes() {
        let mut c = Chunk::new(ChunkDims::new(4, 4, 2), Point::ZERO);
        c.set_cell(1, 2, Cell::sand());
        assert!(c.pre_draw());
        assert!(!c.pre_draw());

        let pixels = c.pixels();
        assert_eq!(pixels.len(), 16);
        assert_eq!(pixels[1 + 2 * 4], Cell::sand().colour.to_abgr());
        assert_eq!(pixels[0], 0);

        c.set_cell(1, 2, Cell::EMPTY);
        assert!(c.pre_draw());
        assert!(c.pixels().iter().all(|&p| p == 0));
        assert!(c.final_rect().is_empty());
    }

    #[test]
    fn debug_draw_emits_overlay() {
        let mut c = Chunk::new(ChunkDims::new(4, 4, 2), Point::new(1, 0));
        c.set_cell(0, 0, Cell::stone());
        c.update_rect();
        c.pre_draw();

        let mut canvas = Recorder::default();
        c.draw(&mut canvas, true);

        assert_eq!(canvas.blits, 1);
        assert_eq!(canvas.outlines[0], (8, 0, 8, 8, Colour::GREEN));
        assert_eq!(canvas.outlines[1], (8, 0, 6, 6, Colour::RED));
        assert_eq!(canvas.outlines[2], (8, 0, 2, 2, Colour::WHITE));
        assert_eq!(canvas.labels, vec!["1".to_string()]);

        let mut plain = Recorder::default();
        c.draw(&mut plain, false);
        assert_eq!(plain.blits, 1);
        assert!(plain.outlines.is_empty());
    }
}
