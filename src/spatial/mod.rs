//! Spatial partitioning: fixed-size chunks and the manager that owns them.

pub mod chunk;
pub mod manager;

pub use chunk::{Chunk, ChunkCanvas, PendingMove, PendingWrite};
pub use manager::ChunkManager;

/// Stable handle to a chunk slot in the manager's arena.
///
/// Valid from creation until the purge that removes the chunk. Move records
/// carry it instead of a reference so chunk creation mid-tick never invalidates them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId(pub(crate) usize);

impl ChunkId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}
