//! Chunk birth and death. The only code that touches `slots`, `free`, `lookup`
//! and `order` together.

use ahash::AHashSet;
use tracing::{debug, trace};

use super::ChunkManager;
use crate::core::Point;
use crate::spatial::chunk::Chunk;
use crate::spatial::ChunkId;

impl ChunkManager {
    /// Create the chunk at `coord`. `None` outside world bounds or if it exists.
    pub fn create_chunk(&mut self, coord: Point) -> Option<ChunkId> {
        if !self.bounds.contains(coord) {
            trace!(x = coord.x, y = coord.y, "chunk outside world bounds");
            return None;
        }
        if self.lookup.contains_key(&coord) {
            return None;
        }

        let chunk = Chunk::new(self.dims, coord);
        let id = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(chunk);
                ChunkId(slot)
            }
            None => {
                self.slots.push(Some(chunk));
                ChunkId(self.slots.len() - 1)
            }
        };

        self.lookup.insert(coord, id);
        self.order.push(id);
        self.counters.chunks_created += 1;

        debug!(x = coord.x, y = coord.y, slot = id.0, live = self.order.len(), "chunk created");
        Some(id)
    }

    /// Existing chunk at `coord`, or a new one when in bounds.
    pub fn get_or_create(&mut self, coord: Point) -> Option<ChunkId> {
        match self.lookup.get(&coord) {
            Some(&id) => Some(id),
            None => self.create_chunk(coord),
        }
    }

    /// Remove every chunk with no filled cells. Chunks still referenced by a
    /// queued move are kept until that move is applied. Returns the number removed.
    pub fn remove_empty_chunks(&mut self) -> u32 {
        let referenced: AHashSet<ChunkId> = self
            .chunks()
            .flat_map(|c| c.pending_moves().iter().map(|m| m.source))
            .collect();

        let mut removed = 0u32;
        let mut kept = Vec::with_capacity(self.order.len());
        for &id in &self.order {
            let Some(chunk) = self.slots[id.0].as_ref() else {
                continue;
            };
            if !chunk.should_remove() || chunk.has_pending() || referenced.contains(&id) {
                kept.push(id);
                continue;
            }

            let coord = chunk.coord();
            self.lookup.remove(&coord);
            self.slots[id.0] = None;
            self.free.push(id.0);
            removed += 1;

            debug!(x = coord.x, y = coord.y, slot = id.0, "chunk removed");
        }
        self.order = kept;
        self.counters.chunks_removed += removed;
        removed
    }

    /// Drop every chunk.
    pub fn clear(&mut self) {
        debug!(live = self.order.len(), "clearing all chunks");
        self.slots.clear();
        self.free.clear();
        self.lookup.clear();
        self.order.clear();
        self.accumulator = 0.0;
    }
}
