//! Save and restore of the chunk cache.
//!
//! The on-disk shape is fixed for save compatibility:
//!
//! ```json
//! {
//!   "world_seed": 42,
//!   "chunk_size": 8,
//!   "chunks": { "0,0": { "0,0": "plains", "1,0": "forest", ... } }
//! }
//! ```
//!
//! Only tile names are stored. Provenance, overrides and the region bias
//! are not, so every restored chunk comes back as [`ChunkSource::Restored`].

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::TerrainConfig;
use crate::coords::{ChunkCoord, WorldCoord};
use crate::error::TerrainError;
use crate::tiles::TileCatalog;

use super::chunk::{Chunk, ChunkSource};
use super::manager::ChunkManager;

/// Persisted form of a chunk manager.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTerrain {
    pub world_seed: u64,
    pub chunk_size: u32,
    /// `"cx,cy"` -> `"wx,wy"` -> tile name
    pub chunks: BTreeMap<String, BTreeMap<String, String>>,
}

impl ChunkManager {
    /// Snapshot every cached chunk.
    pub fn serialize(&self) -> SavedTerrain {
        let chunks = self
            .chunks
            .iter()
            .map(|(coord, chunk)| {
                let tiles = chunk
                    .tiles()
                    .iter()
                    .map(|(pos, name)| (pos.to_string(), name.clone()))
                    .collect();
                (coord.to_string(), tiles)
            })
            .collect();

        SavedTerrain {
            world_seed: self.world_seed(),
            chunk_size: self.chunk_size(),
            chunks,
        }
    }

    /// Rebuild a manager from a snapshot. Settings other than the seed and
    /// chunk size take their defaults.
    pub fn deserialize(saved: SavedTerrain, catalog: Arc<TileCatalog>) -> Result<Self, TerrainError> {
        let config = TerrainConfig {
            world_seed: saved.world_seed,
            chunk_size: saved.chunk_size,
            ..TerrainConfig::default()
        };
        let mut manager = ChunkManager::new(catalog, config)?;

        for (key, entries) in saved.chunks {
            let coord: ChunkCoord = key.parse()?;
            let mut tiles = BTreeMap::new();
            for (pos, name) in entries {
                let pos: WorldCoord = pos.parse()?;
                tiles.insert(pos, name);
            }
            let chunk = Chunk::new(coord, saved.chunk_size, tiles, ChunkSource::Restored);
            manager.chunks.insert(coord, chunk);
        }

        info!("Restored {} chunks for seed {}", manager.chunk_count(), saved.world_seed);
        Ok(manager)
    }

    pub fn to_json(&self) -> Result<String, TerrainError> {
        Ok(serde_json::to_string_pretty(&self.serialize())?)
    }

    /// Write the snapshot to a JSON file, creating parent directories.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), TerrainError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.serialize())?;
        writer.flush()?;

        info!("Saved {} chunks to {}", self.chunk_count(), path.display());
        Ok(())
    }

    pub fn load_json<P: AsRef<Path>>(path: P, catalog: Arc<TileCatalog>) -> Result<Self, TerrainError> {
        let file = File::open(path)?;
        let saved: SavedTerrain = serde_json::from_reader(BufReader::new(file))?;
        Self::deserialize(saved, catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(seed: u64) -> ChunkManager {
        let mut m = ChunkManager::new(Arc::new(TileCatalog::standard()), TerrainConfig::with_seed(seed)).unwrap();
        m.get_or_generate(0, 0).unwrap();
        m.get_or_generate(-1, 0).unwrap();
        m
    }

    #[test]
    fn test_serialized_shape() {
        let m = generated(42);
        let saved = m.serialize();
        assert_eq!(saved.world_seed, 42);
        assert_eq!(saved.chunk_size, 8);
        assert_eq!(saved.chunks.len(), 2);
        assert!(saved.chunks["0,0"].contains_key("7,7"));
        assert!(saved.chunks["-1,0"].contains_key("-8,0"));

        let value: serde_json::Value = serde_json::from_str(&m.to_json().unwrap()).unwrap();
        assert_eq!(value["world_seed"], 42);
        assert!(value["chunks"]["0,0"]["0,0"].is_string());
    }

    #[test]
    fn test_round_trip_marks_restored() {
        let m = generated(8);
        let restored = ChunkManager::deserialize(m.serialize(), Arc::new(TileCatalog::standard())).unwrap();
        assert_eq!(restored.cached_chunks(), m.cached_chunks());
        let chunk = restored.get_chunk(-1, 0).unwrap();
        assert_eq!(chunk.source, ChunkSource::Restored);
        assert_eq!(chunk.tiles(), m.get_chunk(-1, 0).unwrap().tiles());
    }

    #[test]
    fn test_bad_keys_rejected() {
        let mut saved = SavedTerrain {
            world_seed: 1,
            chunk_size: 8,
            chunks: BTreeMap::new(),
        };
        saved.chunks.insert("zero,0".into(), BTreeMap::new());
        let result = ChunkManager::deserialize(saved, Arc::new(TileCatalog::standard()));
        assert!(matches!(result, Err(TerrainError::InvalidKey(_))));
    }

    #[test]
    fn test_missing_restored_tile() {
        let mut chunks = BTreeMap::new();
        chunks.insert("0,0".to_string(), BTreeMap::from([("0,0".to_string(), "plains".to_string())]));
        let saved = SavedTerrain {
            world_seed: 1,
            chunk_size: 8,
            chunks,
        };
        let mut m = ChunkManager::deserialize(saved, Arc::new(TileCatalog::standard())).unwrap();
        assert_eq!(m.tile_at(0, 0).unwrap(), "plains");
        assert!(matches!(m.tile_at(1, 0), Err(TerrainError::MissingTile(_))));
    }

    #[test]
    fn test_oversized_chunk_size_rejected() {
        let mut chunks = BTreeMap::new();
        chunks.insert("0,0".to_string(), BTreeMap::from([("0,0".to_string(), "plains".to_string())]));
        let saved = SavedTerrain {
            world_seed: 1,
            chunk_size: 70_000,
            chunks,
        };
        let result = ChunkManager::deserialize(saved, Arc::new(TileCatalog::standard()));
        assert!(matches!(result, Err(TerrainError::Config(_))));
    }
}
