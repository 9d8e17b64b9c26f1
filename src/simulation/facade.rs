use wasm_bindgen::prelude::*;

use crate::core::{Point, ViewRect};
use crate::domain::{Cell, CellType};

use super::perf_stats::PerfStats;
use super::WorldCore;

/// JavaScript handle to a simulation world.
#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// World with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> World {
        World { core: WorldCore::new() }
    }

    /// World from a `SimulationSettings` JSON document.
    pub fn with_settings_json(json: &str) -> Result<World, JsValue> {
        let core = WorldCore::from_settings_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(World { core })
    }

    pub fn settings_json(&self) -> String {
        self.core.settings().to_json()
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 {
        self.core.frame()
    }

    #[wasm_bindgen(getter)]
    pub fn ticks(&self) -> u64 {
        self.core.ticks()
    }

    #[wasm_bindgen(getter)]
    pub fn total_chunks(&self) -> usize {
        self.core.total_chunks()
    }

    #[wasm_bindgen(getter)]
    pub fn filled_cells(&self) -> usize {
        self.core.filled_cells()
    }

    // === CELLS ===

    /// Place a fresh cell of type `kind`. Unknown ids are ignored.
    pub fn set_cell(&mut self, x: i32, y: i32, kind: u8) -> bool {
        let Some(kind) = CellType::from_u8(kind) else {
            return false;
        };
        self.core.set_cell(x, y, Cell::of(kind));
        true
    }

    /// Type id at a position, or 255 outside the world.
    pub fn get_cell(&self, x: i32, y: i32) -> u8 {
        self.core.kind_at(x, y).map_or(u8::MAX, CellType::id)
    }

    pub fn move_cell(&mut self, from_x: i32, from_y: i32, to_x: i32, to_y: i32, swap: bool) -> bool {
        self.core.move_cell(Point::new(from_x, from_y), Point::new(to_x, to_y), swap)
    }

    /// Brush in cell coordinates. Returns cells painted.
    pub fn paint(&mut self, cx: i32, cy: i32, radius: i32, kind: u8) -> u32 {
        match CellType::from_u8(kind) {
            Some(kind) => self.core.paint(cx, cy, radius, kind),
            None => 0,
        }
    }

    /// Brush in world pixels.
    pub fn paint_at_pixel(&mut self, px: f32, py: f32, radius: i32, kind: u8) -> u32 {
        match CellType::from_u8(kind) {
            Some(kind) => self.core.paint_at_pixel(px, py, radius, kind),
            None => 0,
        }
    }

    pub fn erase(&mut self, cx: i32, cy: i32, radius: i32) -> u32 {
        self.core.erase(cx, cy, radius)
    }

    pub fn erase_at_pixel(&mut self, px: f32, py: f32, radius: i32) -> u32 {
        self.core.erase_at_pixel(px, py, radius)
    }

    /// Clear all cells
    pub fn clear(&mut self) {
        self.core.clear();
    }

    // === SIMULATION ===

    /// Advance by `delta` seconds of wall-clock time. Returns ticks run.
    pub fn update(&mut self, delta: f32) -> u32 {
        self.core.update(delta)
    }

    /// One fixed tick.
    pub fn step(&mut self) {
        self.core.step();
    }

    // === RENDERING ===

    pub fn pre_draw(&mut self, x: f32, y: f32, width: f32, height: f32) -> u32 {
        self.core.pre_draw(ViewRect::new(x, y, width, height))
    }

    pub fn draw(&mut self, x: f32, y: f32, width: f32, height: f32, debug: bool) -> u32 {
        self.core.draw(ViewRect::new(x, y, width, height), debug)
    }

    /// Pointer to the ABGR framebuffer (for JS `ImageData`).
    pub fn framebuffer_ptr(&self) -> *const u32 {
        self.core.framebuffer().ptr()
    }

    /// Framebuffer length in pixels.
    pub fn framebuffer_len(&self) -> usize {
        self.core.framebuffer().len()
    }

    pub fn framebuffer_byte_len(&self) -> usize {
        self.core.framebuffer().len() * std::mem::size_of::<u32>()
    }

    pub fn framebuffer_width(&self) -> i32 {
        self.core.framebuffer().width()
    }

    pub fn framebuffer_height(&self) -> i32 {
        self.core.framebuffer().height()
    }

    // === PERF ===

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
