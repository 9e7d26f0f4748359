//! Chunked Wave Function Collapse terrain library
//!
//! Re-exports modules for use by binaries and tools.

pub mod chunks;
pub mod config;
pub mod coords;
pub mod error;
pub mod export;
pub mod locations;
pub mod tiles;
pub mod wfc;

pub use chunks::{BoundaryConditions, Chunk, ChunkManager, ChunkSource, GenerationStats, SavedTerrain, SeamViolation};
pub use config::{FallbackPolicy, TerrainConfig};
pub use coords::{chunk_seed, ChunkCoord, Direction, WorldCoord};
pub use error::TerrainError;
pub use locations::{passable_direction_names, passable_directions, WorldLocation};
pub use tiles::{RegionBias, TileCatalog, TileDef, TileId, WeightTable};
