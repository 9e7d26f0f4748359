//! Lazy chunk cache and the generation driver.
//!
//! Chunks are generated the first time any of their tiles is queried and
//! kept for the lifetime of the manager. A new chunk copies the shared edge
//! of every cached 4-neighbor and is solved around those pinned cells.

use std::collections::HashMap;
use std::sync::Arc;

use log::{info, warn};

use crate::config::{FallbackPolicy, TerrainConfig};
use crate::coords::{chunk_seed, ChunkCoord, Direction, WorldCoord};
use crate::error::TerrainError;
use crate::locations::WorldLocation;
use crate::tiles::{RegionBias, TileCatalog, WeightTable};
use crate::wfc::{solve_with_retries, BaseGenerator, SolveOutcome, SolveParams, WfcBaseGenerator};

use super::boundary::BoundaryConditions;
use super::chunk::{Chunk, ChunkSource};

/// Counters for monitoring generation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Queries answered from the cache
    pub hits: usize,
    /// Queries that generated a chunk
    pub misses: usize,
    /// Chunks produced without neighbors
    pub unconstrained: usize,
    /// Chunks solved against neighbor edges
    pub constrained: usize,
    /// Chunks that fell back after exhausting their attempts
    pub fallbacks: usize,
    /// Attempts that ended in a contradiction
    pub failed_attempts: usize,
}

impl GenerationStats {
    /// Fraction of queries answered from the cache (0.0 to 1.0)
    pub fn hit_rate(&self) -> f32 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f32 / total as f32
        }
    }

    /// Format as human-readable string
    pub fn summary(&self) -> String {
        format!(
            "Hits: {} | Misses: {} | Rate: {:.1}% | Unconstrained: {} | Constrained: {} | Fallbacks: {} | Failed attempts: {}",
            self.hits,
            self.misses,
            self.hit_rate() * 100.0,
            self.unconstrained,
            self.constrained,
            self.fallbacks,
            self.failed_attempts,
        )
    }
}

/// Owner of the chunk cache.
pub struct ChunkManager {
    catalog: Arc<TileCatalog>,
    config: TerrainConfig,
    pub(super) chunks: HashMap<ChunkCoord, Chunk>,
    region_bias: Option<RegionBias>,
    base: Box<dyn BaseGenerator>,
    stats: GenerationStats,
}

impl ChunkManager {
    /// Create an empty manager using the default WFC base generator.
    pub fn new(catalog: Arc<TileCatalog>, config: TerrainConfig) -> Result<Self, TerrainError> {
        config.validate()?;
        if catalog.is_empty() {
            return Err(TerrainError::Config("tile catalog is empty".into()));
        }
        let base = WfcBaseGenerator::new(config.max_attempts, config.penalty_radius);
        Ok(Self {
            catalog,
            config,
            chunks: HashMap::new(),
            region_bias: None,
            base: Box::new(base),
            stats: GenerationStats::default(),
        })
    }

    /// Replace the generator used for unconstrained chunks and fallbacks.
    pub fn with_base_generator(mut self, base: Box<dyn BaseGenerator>) -> Self {
        self.base = base;
        self
    }

    pub fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn world_seed(&self) -> u64 {
        self.config.world_seed
    }

    pub fn chunk_size(&self) -> u32 {
        self.config.chunk_size
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    pub fn region_bias(&self) -> Option<&RegionBias> {
        self.region_bias.as_ref()
    }

    /// Install (or clear) the bias used for chunks generated from now on.
    /// Chunks already cached are not touched.
    pub fn set_region_bias(&mut self, bias: Option<RegionBias>) {
        self.region_bias = bias;
    }

    pub fn is_cached(&self, chunk_x: i32, chunk_y: i32) -> bool {
        self.chunks.contains_key(&ChunkCoord::new(chunk_x, chunk_y))
    }

    pub fn get_chunk(&self, chunk_x: i32, chunk_y: i32) -> Option<&Chunk> {
        self.chunks.get(&ChunkCoord::new(chunk_x, chunk_y))
    }

    /// Coordinates of every cached chunk, sorted.
    pub fn cached_chunks(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        coords.sort();
        coords
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Return the cached chunk, generating and caching it first if needed.
    pub fn get_or_generate(&mut self, chunk_x: i32, chunk_y: i32) -> Result<&Chunk, TerrainError> {
        let key = ChunkCoord::new(chunk_x, chunk_y);

        if self.chunks.contains_key(&key) {
            self.stats.hits += 1;
        } else {
            let chunk = self.generate(key)?;
            self.stats.misses += 1;
            self.chunks.insert(key, chunk);
        }

        Ok(&self.chunks[&key])
    }

    /// Tile name at a world position.
    pub fn tile_at(&mut self, world_x: i32, world_y: i32) -> Result<&str, TerrainError> {
        let pos = WorldCoord::new(world_x, world_y);
        let c = pos.chunk(self.config.chunk_size);
        let chunk = self.get_or_generate(c.x, c.y)?;
        chunk.tile(pos).ok_or(TerrainError::MissingTile(pos))
    }

    /// Whether the tile at a world position can be walked on.
    pub fn is_passable_at(&mut self, world_x: i32, world_y: i32) -> Result<bool, TerrainError> {
        let pos = WorldCoord::new(world_x, world_y);
        let c = pos.chunk(self.config.chunk_size);
        self.get_or_generate(c.x, c.y)?;
        let name = self.chunks[&c]
            .tile(pos)
            .ok_or(TerrainError::MissingTile(pos))?;
        Ok(self.catalog.is_passable(name))
    }

    /// Force a tile, generating its chunk first if necessary.
    pub fn set_tile_at(&mut self, world_x: i32, world_y: i32, tile: &str) -> Result<(), TerrainError> {
        let pos = WorldCoord::new(world_x, world_y);
        let c = pos.chunk(self.config.chunk_size);
        self.get_or_generate(c.x, c.y)?;
        if let Some(chunk) = self.chunks.get_mut(&c) {
            chunk.set_tile(pos, tile);
        }
        Ok(())
    }

    /// Stamp the terrain of every located world location into the cache.
    /// Returns the number of tiles written.
    pub fn sync_with_locations(
        &mut self,
        locations: &[WorldLocation],
        default_terrain: &str,
    ) -> Result<usize, TerrainError> {
        let mut written = 0;
        for loc in locations {
            let Some((x, y)) = loc.coordinates else {
                continue;
            };
            let terrain = loc.terrain.as_deref().unwrap_or(default_terrain);
            self.set_tile_at(x, y, terrain)?;
            written += 1;
        }
        info!("Synced {} location tiles into terrain", written);
        Ok(written)
    }

    /// Generate every chunk in a square around `center`, row by row.
    pub fn preload_area(&mut self, center: ChunkCoord, radius: i32) -> Result<(), TerrainError> {
        let radius = radius.max(0);
        for cy in center.y.saturating_sub(radius)..=center.y.saturating_add(radius) {
            for cx in center.x.saturating_sub(radius)..=center.x.saturating_add(radius) {
                self.get_or_generate(cx, cy)?;
            }
        }
        Ok(())
    }

    /// Edges of cached 4-neighbors that a chunk at `coord` must reproduce.
    pub fn boundary_conditions(&self, coord: ChunkCoord) -> BoundaryConditions {
        let mut boundaries = BoundaryConditions::new();
        for side in [Direction::West, Direction::East, Direction::North, Direction::South] {
            let Some(next) = coord.neighbor(side) else {
                continue;
            };
            if let Some(neighbor) = self.chunks.get(&next) {
                boundaries.set_from_neighbor(side, neighbor);
            }
        }
        boundaries
    }

    fn generate(&mut self, coord: ChunkCoord) -> Result<Chunk, TerrainError> {
        let size = self.config.chunk_size;
        let origin = coord.origin(size);
        let seed = chunk_seed(self.config.world_seed, coord);
        let weights = WeightTable::new(&self.catalog, self.region_bias.as_ref());
        let overrides = self.region_bias.as_ref().map(|_| &weights);

        let boundaries = self.boundary_conditions(coord);
        if boundaries.is_empty() {
            let tiles = self.base.generate(&self.catalog, origin, size, seed, overrides);
            self.stats.unconstrained += 1;
            info!("Generated chunk ({}) unconstrained", coord);
            return Ok(Chunk::new(coord, size, tiles, ChunkSource::Unconstrained));
        }

        let pins = boundaries.pins(origin, size);
        let params = SolveParams {
            catalog: &self.catalog,
            weights: &weights,
            penalty_radius: self.config.penalty_radius,
        };

        match solve_with_retries(origin, size, &pins, params, seed, self.config.max_attempts) {
            SolveOutcome::Solved { tiles, attempts } => {
                self.stats.constrained += 1;
                self.stats.failed_attempts += attempts - 1;
                info!(
                    "Generated chunk ({}) against {} neighbor edge(s) in {} attempt(s)",
                    coord,
                    boundaries.count(),
                    attempts
                );
                Ok(Chunk::new(coord, size, tiles, ChunkSource::Constrained { attempts }))
            }
            SolveOutcome::Exhausted { attempts } => {
                self.stats.failed_attempts += attempts;
                match self.config.fallback {
                    FallbackPolicy::FailLoudly => Err(TerrainError::Unsatisfiable { chunk: coord, attempts }),
                    FallbackPolicy::Unconstrained => {
                        warn!(
                            "Chunk ({}) contradicted {} times; generating without neighbor edges",
                            coord, attempts
                        );
                        let tiles = self.base.generate(&self.catalog, origin, size, seed, overrides);
                        self.stats.fallbacks += 1;
                        Ok(Chunk::new(coord, size, tiles, ChunkSource::Fallback))
                    }
                }
            }
        }
    }
}
