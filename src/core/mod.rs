//! Core - coordinates, rects, settings, errors and tick profiling.

pub mod config;
pub mod coords;
pub mod error;
pub mod profile;
pub mod rect;

pub use config::{SimulationSettings, WorldBounds};
pub use coords::{ChunkDims, Point};
pub use error::ConfigError;
pub use profile::{TickCounters, TickPhase, TickProfiler, TickStats};
pub use rect::{IntRect, ViewRect};
