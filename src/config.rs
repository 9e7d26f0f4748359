//! Configuration for the chunked terrain generator.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

/// Default edge length of a chunk in tiles
pub const DEFAULT_CHUNK_SIZE: u32 = 8;

/// Largest accepted chunk edge length
pub const MAX_CHUNK_SIZE: u32 = 4096;

/// Default number of constrained attempts before giving up on a chunk
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Default Chebyshev radius scanned for biome-distance penalties
pub const DEFAULT_PENALTY_RADIUS: i32 = 2;

/// What to do when every constrained attempt for a chunk contradicts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Regenerate the chunk without boundary constraints. May leave a seam.
    #[default]
    Unconstrained,
    /// Return `TerrainError::Unsatisfiable` to the caller.
    FailLoudly,
}

/// Generator settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Master seed for the world
    pub world_seed: u64,
    /// Edge length of a chunk in tiles
    pub chunk_size: u32,
    /// Constrained attempts per chunk before the fallback policy applies
    pub max_attempts: usize,
    /// Radius (8-directional) of collapsed tiles considered by the distance penalty
    pub penalty_radius: i32,
    /// Behaviour after retry exhaustion
    pub fallback: FallbackPolicy,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            world_seed: 0,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            penalty_radius: DEFAULT_PENALTY_RADIUS,
            fallback: FallbackPolicy::default(),
        }
    }
}

impl TerrainConfig {
    /// Default settings with the given world seed.
    pub fn with_seed(world_seed: u64) -> Self {
        Self {
            world_seed,
            ..Self::default()
        }
    }

    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, TerrainError> {
        let text = fs::read_to_string(path)?;
        let config: TerrainConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.chunk_size == 0 {
            return Err(TerrainError::Config("chunk_size must be at least 1".into()));
        }
        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(TerrainError::Config(format!(
                "chunk_size {} exceeds the maximum of {}",
                self.chunk_size, MAX_CHUNK_SIZE
            )));
        }
        if self.max_attempts == 0 {
            return Err(TerrainError::Config("max_attempts must be at least 1".into()));
        }
        if self.penalty_radius < 0 {
            return Err(TerrainError::Config("penalty_radius must not be negative".into()));
        }
        Ok(())
    }
}
