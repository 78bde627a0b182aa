//! Terrain generation error types.

/// Errors raised while configuring or running asteroid generation.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// No row of the populated grid offered a wide enough floor run.
    #[error("no landing site found (grid {grid_size}, seed {seed})")]
    NoLandingSite { grid_size: usize, seed: u64 },

    /// The requested grid size cannot hold an asteroid.
    #[error("invalid grid size: {0}")]
    InvalidGridSize(usize),

    /// A rule's radial band is malformed.
    #[error("rule '{name}' has invalid distance band [{start}, {end}]")]
    InvalidRuleBand { name: String, start: f64, end: f64 },

    /// A generation constant is out of range.
    #[error("invalid generation parameters: {0}")]
    InvalidParams(String),
}
