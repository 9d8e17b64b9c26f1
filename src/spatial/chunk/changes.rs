//! Deferred writes and moves
//!
//! Nothing queued here touches the grid until the apply phase. Writes go first,
//! then moves are arbitrated per destination and applied by the manager, which is
//! the only place that can reach both ends of a cross-chunk move.

use rand::Rng;

use super::Chunk;
use crate::core::Point;
use crate::domain::Cell;
use crate::spatial::ChunkId;

/// Overwrite of one cell, issued from inside a scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingWrite {
    pub index: usize,
    pub cell: Cell,
}

/// Move queued on the destination chunk.
///
/// `source` names the chunk holding `src_index`; it may be the destination chunk
/// itself. With `swap`, the destination's old value goes back into the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingMove {
    pub src_index: usize,
    pub dst_index: usize,
    pub swap: bool,
    pub source: ChunkId,
}

impl Chunk {
    /// Defer a write until `apply_pending_writes`.
    pub fn queue_write(&mut self, x: i32, y: i32, cell: Cell) {
        let index = self.index(x, y);
        self.writes.push(PendingWrite { index, cell });
    }

    /// Enqueue a move into `(to_x, to_y)` of this chunk from `(from_x, from_y)` of
    /// `source`. Both chunks share the same dimensions, so the source index is
    /// computed locally.
    pub fn move_cell(&mut self, from_x: i32, from_y: i32, to_x: i32, to_y: i32, swap: bool, source: ChunkId) {
        let src_index = self.index(from_x, from_y);
        let dst_index = self.index(to_x, to_y);
        self.moves.push(PendingMove { src_index, dst_index, swap, source });
    }

    #[inline]
    pub fn pending_writes(&self) -> &[PendingWrite] {
        &self.writes
    }

    #[inline]
    pub fn pending_moves(&self) -> &[PendingMove] {
        &self.moves
    }

    /// Apply queued writes in issue order (later writes to one cell win).
    ///
    /// Local positions of written border cells are pushed to `edges` so the caller
    /// can wake neighbouring chunks. Returns how many writes were applied.
    pub fn apply_pending_writes(&mut self, edges: &mut Vec<Point>) -> u32 {
        if self.writes.is_empty() {
            return 0;
        }
        let writes = std::mem::take(&mut self.writes);
        let applied = writes.len() as u32;
        for write in &writes {
            self.set_cell_at(write.index, write.cell);
            let local = self.local_of(write.index);
            if self.on_edge(local.x, local.y) {
                edges.push(local);
            }
        }
        // keep the allocation for the next tick
        self.writes = writes;
        self.writes.clear();
        applied
    }

    /// Destination conflict arbitration.
    ///
    /// Moves are stable-sorted by destination; within each run of equal
    /// destinations exactly one is picked uniformly at random. Winners are appended
    /// to `winners` in destination order and the move list is cleared.
    /// Returns the number of dropped moves.
    pub fn resolve_moves<R: Rng>(&mut self, rng: &mut R, winners: &mut Vec<PendingMove>) -> u32 {
        if self.moves.is_empty() {
            return 0;
        }

        self.moves.sort_by_key(|m| m.dst_index);

        let mut dropped = 0u32;
        let mut start = 0;
        while start < self.moves.len() {
            let dst = self.moves[start].dst_index;
            let mut end = start + 1;
            while end < self.moves.len() && self.moves[end].dst_index == dst {
                end += 1;
            }

            let chosen = if end - start == 1 { start } else { rng.gen_range(start..end) };
            winners.push(self.moves[chosen]);
            dropped += (end - start - 1) as u32;

            start = end;
        }

        self.moves.clear();
        dropped
    }
}
