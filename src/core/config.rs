//! Simulation settings
//!
//! Loaded from JSON (every field optional, missing fields take the defaults below):
//!
//! ```json
//! {
//!   "chunk": { "width": 64, "height": 64, "cell_size": 4 },
//!   "bounds": { "bounded": { "min": { "x": -2, "y": -2 }, "max": { "x": 2, "y": 2 } } },
//!   "time_step": 0.016666668,
//!   "max_substeps": 8,
//!   "seed": 12345
//! }
//! ```
//!
//! `"bounds": "unbounded"` lets chunks be created anywhere.

use serde::{Deserialize, Serialize};

use super::coords::{ChunkDims, Point};
use super::error::{ConfigError, Result};

pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;
pub const DEFAULT_MAX_SUBSTEPS: u32 = 8;
pub const DEFAULT_SEED: u64 = 12345;

/// Which chunk coordinates may hold chunks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldBounds {
    /// Inclusive chunk-coordinate rectangle.
    Bounded { min: Point, max: Point },
    Unbounded,
}

impl Default for WorldBounds {
    fn default() -> Self {
        WorldBounds::Bounded { min: Point::new(-2, -2), max: Point::new(2, 2) }
    }
}

impl WorldBounds {
    #[inline]
    pub fn contains(&self, chunk: Point) -> bool {
        match *self {
            WorldBounds::Bounded { min, max } => {
                chunk.x >= min.x && chunk.x <= max.x && chunk.y >= min.y && chunk.y <= max.y
            }
            WorldBounds::Unbounded => true,
        }
    }

    /// Chunk capacity of a bounded world, saturating at `u64::MAX`.
    pub fn max_chunks(&self) -> Option<u64> {
        match *self {
            WorldBounds::Bounded { min, max } => {
                let w = (i64::from(max.x) - i64::from(min.x) + 1).max(0) as u64;
                let h = (i64::from(max.y) - i64::from(min.y) + 1).max(0) as u64;
                Some(w.saturating_mul(h))
            }
            WorldBounds::Unbounded => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub chunk: ChunkDims,
    pub bounds: WorldBounds,
    /// Fixed simulation step in seconds.
    pub time_step: f32,
    /// Upper bound on ticks run by a single `update` call.
    pub max_substeps: u32,
    /// Seed for movement tie-breaks and conflict arbitration.
    pub seed: u64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            chunk: ChunkDims::default(),
            bounds: WorldBounds::default(),
            time_step: DEFAULT_TIME_STEP,
            max_substeps: DEFAULT_MAX_SUBSTEPS,
            seed: DEFAULT_SEED,
        }
    }
}

impl SimulationSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: SimulationSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk.width <= 0 || self.chunk.height <= 0 {
            return Err(ConfigError::InvalidChunkSize {
                width: self.chunk.width,
                height: self.chunk.height,
            });
        }
        if self.chunk.cell_size <= 0 {
            return Err(ConfigError::InvalidCellSize(self.chunk.cell_size));
        }
        if let WorldBounds::Bounded { min, max } = self.bounds {
            if min.x > max.x || min.y > max.y {
                return Err(ConfigError::InvalidBounds {
                    min: (min.x, min.y),
                    max: (max.x, max.y),
                });
            }
        }
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(ConfigError::InvalidTimeStep(self.time_step));
        }
        if self.max_substeps == 0 {
            return Err(ConfigError::InvalidSubsteps(self.max_substeps));
        }
        Ok(())
    }
}
