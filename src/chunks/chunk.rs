//! A generated chunk of terrain.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::coords::{ChunkCoord, Direction, WorldCoord};

/// How a chunk came to be in the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkSource {
    /// No cached neighbors; produced by the base generator
    Unconstrained,
    /// Solved against neighbor edges, succeeding on attempt `attempts`
    Constrained { attempts: usize },
    /// Every constrained attempt contradicted; produced by the base
    /// generator with neighbor edges ignored. May not match its neighbors.
    Fallback,
    /// Loaded from a save
    Restored,
}

impl fmt::Display for ChunkSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkSource::Unconstrained => write!(f, "unconstrained"),
            ChunkSource::Constrained { attempts } => write!(f, "constrained ({} attempts)", attempts),
            ChunkSource::Fallback => write!(f, "FALLBACK"),
            ChunkSource::Restored => write!(f, "restored"),
        }
    }
}

/// Square block of resolved tiles keyed by world coordinate.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    pub coord: ChunkCoord,
    pub size: u32,
    pub source: ChunkSource,
    tiles: BTreeMap<WorldCoord, String>,
    /// Positions written through `set_tile`, exempt from seam checks
    overridden: BTreeSet<WorldCoord>,
}

impl Chunk {
    pub fn new(
        coord: ChunkCoord,
        size: u32,
        tiles: BTreeMap<WorldCoord, String>,
        source: ChunkSource,
    ) -> Self {
        Self {
            coord,
            size,
            source,
            tiles,
            overridden: BTreeSet::new(),
        }
    }

    pub fn origin(&self) -> WorldCoord {
        self.coord.origin(self.size)
    }

    pub fn contains(&self, pos: WorldCoord) -> bool {
        pos.chunk(self.size) == self.coord
    }

    pub fn tile(&self, pos: WorldCoord) -> Option<&str> {
        self.tiles.get(&pos).map(String::as_str)
    }

    pub fn tiles(&self) -> &BTreeMap<WorldCoord, String> {
        &self.tiles
    }

    /// Overwrite one tile, e.g. to stamp an authored location's terrain.
    pub fn set_tile(&mut self, pos: WorldCoord, name: &str) {
        self.tiles.insert(pos, name.to_string());
        self.overridden.insert(pos);
    }

    pub fn is_overridden(&self, pos: WorldCoord) -> bool {
        self.overridden.contains(&pos)
    }

    /// Tiles along one edge, in increasing x (north/south) or y (east/west).
    pub fn extract_edge(&self, dir: Direction) -> Vec<Option<&str>> {
        let origin = self.origin();
        let n = self.size as i32;
        (0..n)
            .map(|i| {
                let pos = match dir {
                    Direction::North => WorldCoord::new(origin.x + i, origin.y),
                    Direction::South => WorldCoord::new(origin.x + i, origin.y + (n - 1)),
                    Direction::West => WorldCoord::new(origin.x, origin.y + i),
                    Direction::East => WorldCoord::new(origin.x + (n - 1), origin.y + i),
                };
                self.tile(pos)
            })
            .collect()
    }

    /// Number of tiles of each kind.
    pub fn histogram(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for name in self.tiles.values() {
            *counts.entry(name.as_str()).or_insert(0) += 1;
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
