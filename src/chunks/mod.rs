//! Chunk cache and stitching.
//!
//! The world is split into square chunks generated on demand. Each new chunk
//! copies the shared edges of its already-cached 4-neighbors as hard
//! constraints, so terrain lines up across chunk boundaries whenever the
//! constrained solve succeeds.

pub mod boundary;
pub mod chunk;
pub mod manager;
pub mod persist;
pub mod verify;

pub use boundary::BoundaryConditions;
pub use chunk::{Chunk, ChunkSource};
pub use manager::{ChunkManager, GenerationStats};
pub use persist::SavedTerrain;
pub use verify::SeamViolation;
