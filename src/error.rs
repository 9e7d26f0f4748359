//! Error type for terrain generation, persistence and configuration.

use std::fmt;

use crate::coords::{ChunkCoord, WorldCoord};

/// Errors surfaced to callers of the terrain API.
///
/// Contradictions inside a generation attempt are not errors; they are
/// retried internally and only show up here when the fail-loudly fallback
/// policy is configured.
#[derive(Debug)]
pub enum TerrainError {
    /// IO error while reading or writing a save file
    Io(std::io::Error),
    /// JSON encoding or decoding error
    Json(serde_json::Error),
    /// PNG encoding error
    Image(image::ImageError),
    /// A persisted `"x,y"` key could not be parsed
    InvalidKey(String),
    /// Every constrained attempt for a chunk contradicted
    Unsatisfiable { chunk: ChunkCoord, attempts: usize },
    /// A restored chunk has no entry for a coordinate it owns
    MissingTile(WorldCoord),
    /// Invalid configuration value
    Config(String),
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainError::Io(e) => write!(f, "IO error: {}", e),
            TerrainError::Json(e) => write!(f, "JSON error: {}", e),
            TerrainError::Image(e) => write!(f, "Image error: {}", e),
            TerrainError::InvalidKey(k) => write!(f, "Invalid coordinate key: {:?}", k),
            TerrainError::Unsatisfiable { chunk, attempts } => write!(
                f,
                "Chunk ({}) contradicted on all {} attempts",
                chunk, attempts
            ),
            TerrainError::MissingTile(c) => write!(f, "No tile stored at ({})", c),
            TerrainError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for TerrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerrainError::Io(e) => Some(e),
            TerrainError::Json(e) => Some(e),
            TerrainError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TerrainError {
    fn from(e: std::io::Error) -> Self {
        TerrainError::Io(e)
    }
}

impl From<serde_json::Error> for TerrainError {
    fn from(e: serde_json::Error) -> Self {
        TerrainError::Json(e)
    }
}

impl From<image::ImageError> for TerrainError {
    fn from(e: image::ImageError) -> Self {
        TerrainError::Image(e)
    }
}
