use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid chunk size {width}x{height} (both axes must be > 0)")]
    InvalidChunkSize { width: i32, height: i32 },

    #[error("Invalid cell size {0} (must be > 0)")]
    InvalidCellSize(i32),

    #[error("Invalid world bounds: min {min:?} is greater than max {max:?}")]
    InvalidBounds { min: (i32, i32), max: (i32, i32) },

    #[error("Invalid time step {0} (must be finite and > 0)")]
    InvalidTimeStep(f32),

    #[error("Invalid max_substeps {0} (must be > 0)")]
    InvalidSubsteps(u32),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
