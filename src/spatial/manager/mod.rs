//! ChunkManager - owns every chunk and drives the tick
//!
//! Storage is an arena of slots addressed by `ChunkId`:
//! - `slots`:  `Vec<Option<Chunk>>`, freed slots go on `free` for reuse
//! - `lookup`: chunk coordinate -> id
//! - `order`:  live ids in creation order, the only iteration order ever used
//!
//! The three are kept in 1:1 correspondence by `lifecycle.rs`, the only code that
//! adds or removes chunks. Storage grows with live chunks only, never with the
//! size of the world bounds.

mod access;
mod lifecycle;
mod render;
mod tick;

use ahash::AHashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use super::chunk::{Chunk, PendingMove};
use super::ChunkId;
use crate::core::{ChunkDims, Point, SimulationSettings, TickCounters, WorldBounds};

pub struct ChunkManager {
    dims: ChunkDims,
    bounds: WorldBounds,
    time_step: f32,
    max_substeps: u32,

    slots: Vec<Option<Chunk>>,
    free: Vec<usize>,
    lookup: AHashMap<Point, ChunkId>,
    order: Vec<ChunkId>,

    rng: ChaCha8Rng,
    accumulator: f32,
    ticks: u64,
    counters: TickCounters,

    // per-tick scratch, reused to avoid allocating every tick
    scan_ids: Vec<ChunkId>,
    winners: Vec<PendingMove>,
    edges: Vec<Point>,
}

impl ChunkManager {
    pub fn new(settings: &SimulationSettings) -> Self {
        info!(
            width = settings.chunk.width,
            height = settings.chunk.height,
            cell_size = settings.chunk.cell_size,
            bounds = ?settings.bounds,
            "chunk manager created"
        );

        Self {
            dims: settings.chunk,
            bounds: settings.bounds,
            time_step: settings.time_step,
            max_substeps: settings.max_substeps,
            slots: Vec::new(),
            free: Vec::new(),
            lookup: AHashMap::new(),
            order: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(settings.seed),
            accumulator: 0.0,
            ticks: 0,
            counters: TickCounters::default(),
            scan_ids: Vec::new(),
            winners: Vec::new(),
            edges: Vec::new(),
        }
    }

    #[inline]
    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    #[inline]
    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    #[inline]
    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    /// Ticks run since creation.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Counters of the last completed tick.
    #[inline]
    pub fn counters(&self) -> &TickCounters {
        &self.counters
    }

    /// Unconsumed simulation time in seconds.
    #[inline]
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    #[inline]
    pub fn total_chunks(&self) -> usize {
        self.order.len()
    }

    /// Live chunk ids in iteration order.
    #[inline]
    pub fn chunk_ids(&self) -> &[ChunkId] {
        &self.order
    }

    #[inline]
    pub fn chunk(&self, id: ChunkId) -> Option<&Chunk> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn chunk_mut(&mut self, id: ChunkId) -> Option<&mut Chunk> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    #[inline]
    pub fn chunk_id(&self, coord: Point) -> Option<ChunkId> {
        self.lookup.get(&coord).copied()
    }

    #[inline]
    pub fn chunk_at(&self, coord: Point) -> Option<&Chunk> {
        self.chunk_id(coord).and_then(|id| self.chunk(id))
    }

    #[inline]
    pub fn contains_chunk(&self, coord: Point) -> bool {
        self.lookup.contains_key(&coord)
    }

    /// Live chunks in iteration order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.order.iter().filter_map(move |&id| self.chunk(id))
    }

    /// Total non-empty cells across all chunks.
    pub fn filled_cells(&self) -> usize {
        self.chunks().map(Chunk::filled_cells).sum()
    }

    #[inline]
    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

impl Default for ChunkManager {
    fn default() -> Self {
        Self::new(&SimulationSettings::default())
    }
}
