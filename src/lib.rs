//! Sandfall Engine - chunked falling-sand simulation in WASM
//!
//! Architecture:
//! - core/       - coordinates, rects, settings, errors, tick profiling
//! - domain/     - cell types and colours
//! - spatial/    - chunks and the chunk manager (tick pipeline lives here)
//! - systems/    - per-cell rules: worker context and category behaviours
//! - simulation/ - fixed-timestep world, brush, framebuffer, JS facade

pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Sandfall engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::{ChunkDims, ConfigError, IntRect, Point, SimulationSettings, ViewRect, WorldBounds};
pub use domain::{Cell, CellType, Colour};
pub use simulation::{Framebuffer, PerfStats, World, WorldCore};
pub use spatial::{Chunk, ChunkCanvas, ChunkId, ChunkManager};
pub use systems::{BehaviorRegistry, CellRule, UpdateContext};

// Export cell type ids for JS
#[wasm_bindgen]
pub fn cell_empty() -> u8 { CellType::Empty.id() }
#[wasm_bindgen]
pub fn cell_sand() -> u8 { CellType::Sand.id() }
#[wasm_bindgen]
pub fn cell_stone() -> u8 { CellType::Stone.id() }
#[wasm_bindgen]
pub fn cell_wood() -> u8 { CellType::Wood.id() }
#[wasm_bindgen]
pub fn cell_water() -> u8 { CellType::Water.id() }
#[wasm_bindgen]
pub fn cell_fire() -> u8 { CellType::Fire.id() }
#[wasm_bindgen]
pub fn cell_smoke() -> u8 { CellType::Smoke.id() }
