//! Adjacency checks over the cached chunks.

use std::fmt;

use crate::coords::{Direction, WorldCoord};

use super::chunk::{Chunk, ChunkSource};
use super::manager::ChunkManager;

/// Two 4-adjacent tiles that are not mutually compatible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeamViolation {
    pub a: WorldCoord,
    pub b: WorldCoord,
    pub tile_a: String,
    pub tile_b: String,
    /// Whether the pair straddles a chunk boundary
    pub across_chunks: bool,
}

impl fmt::Display for SeamViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) {} | ({}) {}{}",
            self.a,
            self.tile_a,
            self.b,
            self.tile_b,
            if self.across_chunks { " [seam]" } else { "" }
        )
    }
}

impl ChunkManager {
    /// Every incompatible 4-adjacent pair among cached tiles, in coordinate
    /// order. Pairs touching a fallback chunk or an overwritten tile are
    /// skipped since neither is expected to agree with its surroundings.
    pub fn seam_violations(&self) -> Vec<SeamViolation> {
        let size = self.chunk_size();
        let mut violations = Vec::new();

        for coord in self.cached_chunks() {
            let chunk = &self.chunks[&coord];
            if chunk.source == ChunkSource::Fallback {
                continue;
            }

            for (pos, name) in chunk.tiles() {
                if chunk.is_overridden(*pos) {
                    continue;
                }
                for dir in [Direction::East, Direction::South] {
                    let Some(other_pos) = pos.step(dir) else {
                        continue;
                    };
                    let Some(other_chunk) = self.chunks.get(&other_pos.chunk(size)) else {
                        continue;
                    };
                    if skip_pair(other_chunk, other_pos) {
                        continue;
                    }
                    let Some(other) = other_chunk.tile(other_pos) else {
                        continue;
                    };
                    if !self.catalog().is_compatible(name, other) {
                        violations.push(SeamViolation {
                            a: *pos,
                            b: other_pos,
                            tile_a: name.clone(),
                            tile_b: other.to_string(),
                            across_chunks: other_chunk.coord != coord,
                        });
                    }
                }
            }
        }

        violations
    }
}

fn skip_pair(chunk: &Chunk, pos: WorldCoord) -> bool {
    chunk.source == ChunkSource::Fallback || chunk.is_overridden(pos)
}
