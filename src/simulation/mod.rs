//! World - fixed-timestep driver over the chunk manager
//!
//! `WorldCore` owns the settings, the chunk manager, the behaviour registry, the
//! tick profiler and the framebuffer the chunks draw into. Host-facing operations
//! live in the submodules below and take the core by reference; `World` wraps it
//! for JavaScript.

use tracing::info;

use crate::core::error::Result;
use crate::core::{Point, SimulationSettings, TickProfiler, TickStats, ViewRect};
use crate::domain::{Cell, CellType};
use crate::spatial::ChunkManager;
use crate::systems::BehaviorRegistry;

#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "commands/commands.rs"]
mod commands;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "render/framebuffer.rs"]
mod framebuffer;
mod facade;

pub use facade::World;
pub use framebuffer::Framebuffer;
pub use perf_stats::PerfStats;

/// The simulation world
pub struct WorldCore {
    settings: SimulationSettings,
    manager: ChunkManager,
    behaviors: BehaviorRegistry,
    profiler: TickProfiler,
    framebuffer: Framebuffer,
    /// `update` calls so far; also seeds brush colour variation.
    frame: u64,
    /// Ticks run by the most recent `update`.
    last_substeps: u32,
}

impl WorldCore {
    /// World with default settings.
    pub fn new() -> Self {
        init::create_world_core(SimulationSettings::default())
    }

    pub fn with_settings(settings: SimulationSettings) -> Result<Self> {
        settings.validate()?;
        Ok(init::create_world_core(settings))
    }

    pub fn from_settings_json(json: &str) -> Result<Self> {
        let settings = SimulationSettings::from_json(json)?;
        info!(json_len = json.len(), "settings loaded");
        Ok(init::create_world_core(settings))
    }

    #[inline]
    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    #[inline]
    pub fn manager(&self) -> &ChunkManager {
        &self.manager
    }

    #[inline]
    pub fn manager_mut(&mut self) -> &mut ChunkManager {
        &mut self.manager
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.manager.ticks()
    }

    pub fn total_chunks(&self) -> usize {
        self.manager.total_chunks()
    }

    pub fn filled_cells(&self) -> usize {
        self.manager.filled_cells()
    }

    // === SIMULATION ===

    /// Advance by a frame's wall-clock time. Returns the number of ticks run.
    pub fn update(&mut self, frame_delta: f32) -> u32 {
        self.frame += 1;
        let ran = self.manager.update(frame_delta, &self.behaviors, &mut self.profiler);
        self.last_substeps = ran;
        ran
    }

    /// Exactly one tick, ignoring the accumulator.
    pub fn step(&mut self) {
        self.manager.step(&self.behaviors, &mut self.profiler);
    }

    // === CELLS ===

    /// Immediate write. Dropped outside the world.
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        self.manager.set_cell(x, y, cell);
    }

    /// Read without creating chunks.
    pub fn get_cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.manager.peek_cell(x, y)
    }

    pub fn kind_at(&self, x: i32, y: i32) -> Option<CellType> {
        self.manager.kind_at(x, y)
    }

    /// Queue a move, applied during the next tick.
    pub fn move_cell(&mut self, from: Point, to: Point, swap: bool) -> bool {
        self.manager.move_cell(from, to, swap)
    }

    pub fn paint(&mut self, cx: i32, cy: i32, radius: i32, kind: CellType) -> u32 {
        commands::paint(self, cx, cy, radius, kind)
    }

    pub fn erase(&mut self, cx: i32, cy: i32, radius: i32) -> u32 {
        commands::erase(self, cx, cy, radius)
    }

    pub fn paint_at_pixel(&mut self, px: f32, py: f32, radius: i32, kind: CellType) -> u32 {
        commands::paint_at_pixel(self, px, py, radius, kind)
    }

    pub fn erase_at_pixel(&mut self, px: f32, py: f32, radius: i32) -> u32 {
        commands::erase_at_pixel(self, px, py, radius)
    }

    /// Drop every chunk.
    pub fn clear(&mut self) {
        self.manager.clear();
    }

    // === RENDERING ===

    /// Refresh pixel caches of changed chunks in view. Returns how many were redrawn.
    pub fn pre_draw(&mut self, view: ViewRect) -> u32 {
        self.manager.pre_draw(&view)
    }

    /// Composite the chunks in view into the framebuffer. Returns how many were drawn.
    pub fn draw(&mut self, view: ViewRect, debug: bool) -> u32 {
        self.framebuffer.begin(&view);
        self.manager.draw(&view, debug, &mut self.framebuffer)
    }

    #[inline]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    // === PERF ===

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    pub fn perf_enabled(&self) -> bool {
        self.profiler.is_enabled()
    }

    pub fn last_tick_stats(&self) -> &TickStats {
        self.profiler.last()
    }

    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }
}

impl Default for WorldCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
