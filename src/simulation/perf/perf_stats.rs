use wasm_bindgen::prelude::*;

use crate::core::TickStats;

/// Snapshot of the last profiled tick, copied out for JavaScript.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) tick_ms: f64,
    pub(super) scan_ms: f64,
    pub(super) apply_ms: f64,
    pub(super) rotate_ms: f64,
    pub(super) purge_ms: f64,

    pub(super) chunks_scanned: u32,
    pub(super) cells_visited: u32,
    pub(super) moves_queued: u32,
    pub(super) moves_applied: u32,
    pub(super) moves_dropped: u32,
    pub(super) moves_skipped: u32,
    pub(super) writes_applied: u32,
    pub(super) chunks_created: u32,
    pub(super) chunks_removed: u32,
    pub(super) live_chunks: u32,

    pub(super) filled_cells: u32,
    pub(super) substeps: u32,
    pub(super) ticks_recorded: u32,
}

impl PerfStats {
    pub(crate) fn from_tick(stats: &TickStats, substeps: u32, filled_cells: usize, ticks_recorded: u64) -> Self {
        let c = &stats.counters;
        PerfStats {
            tick_ms: stats.tick_ms,
            scan_ms: stats.scan_ms,
            apply_ms: stats.apply_ms,
            rotate_ms: stats.rotate_ms,
            purge_ms: stats.purge_ms,
            chunks_scanned: c.chunks_scanned,
            cells_visited: c.cells_visited,
            moves_queued: c.moves_queued,
            moves_applied: c.moves_applied,
            moves_dropped: c.moves_dropped,
            moves_skipped: c.moves_skipped,
            writes_applied: c.writes_applied,
            chunks_created: c.chunks_created,
            chunks_removed: c.chunks_removed,
            live_chunks: c.live_chunks,
            filled_cells: filled_cells.min(u32::MAX as usize) as u32,
            substeps,
            ticks_recorded: ticks_recorded.min(u32::MAX as u64) as u32,
        }
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn tick_ms(&self) -> f64 { self.tick_ms }
    #[wasm_bindgen(getter)]
    pub fn scan_ms(&self) -> f64 { self.scan_ms }
    #[wasm_bindgen(getter)]
    pub fn apply_ms(&self) -> f64 { self.apply_ms }
    #[wasm_bindgen(getter)]
    pub fn rotate_ms(&self) -> f64 { self.rotate_ms }
    #[wasm_bindgen(getter)]
    pub fn purge_ms(&self) -> f64 { self.purge_ms }

    #[wasm_bindgen(getter)]
    pub fn chunks_scanned(&self) -> u32 { self.chunks_scanned }
    #[wasm_bindgen(getter)]
    pub fn cells_visited(&self) -> u32 { self.cells_visited }
    #[wasm_bindgen(getter)]
    pub fn moves_queued(&self) -> u32 { self.moves_queued }
    #[wasm_bindgen(getter)]
    pub fn moves_applied(&self) -> u32 { self.moves_applied }
    #[wasm_bindgen(getter)]
    pub fn moves_dropped(&self) -> u32 { self.moves_dropped }
    #[wasm_bindgen(getter)]
    pub fn moves_skipped(&self) -> u32 { self.moves_skipped }
    #[wasm_bindgen(getter)]
    pub fn writes_applied(&self) -> u32 { self.writes_applied }
    #[wasm_bindgen(getter)]
    pub fn chunks_created(&self) -> u32 { self.chunks_created }
    #[wasm_bindgen(getter)]
    pub fn chunks_removed(&self) -> u32 { self.chunks_removed }
    #[wasm_bindgen(getter)]
    pub fn live_chunks(&self) -> u32 { self.live_chunks }

    #[wasm_bindgen(getter)]
    pub fn filled_cells(&self) -> u32 { self.filled_cells }
    /// Ticks run by the last `update`.
    #[wasm_bindgen(getter)]
    pub fn substeps(&self) -> u32 { self.substeps }
    #[wasm_bindgen(getter)]
    pub fn ticks_recorded(&self) -> u32 { self.ticks_recorded }
}
