//! Coordinate types for the chunked terrain grid.
//!
//! World coordinates address single tiles; chunk coordinates address the
//! square blocks of tiles that are generated and cached together. Both are
//! plain ordered pairs with value equality so they can key hash and tree maps.

use std::fmt;
use std::str::FromStr;

use crate::error::TerrainError;

/// Position of a single terrain tile in the unbounded world grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorldCoord {
    pub x: i32,
    pub y: i32,
}

impl WorldCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Resolve the chunk that owns this tile (floor division by chunk size).
    pub fn chunk(&self, chunk_size: u32) -> ChunkCoord {
        let size = chunk_size as i32;
        ChunkCoord::new(self.x.div_euclid(size), self.y.div_euclid(size))
    }

    /// Step one tile in a cardinal direction; `None` past the edge of the
    /// `i32` grid.
    pub fn step(&self, dir: Direction) -> Option<WorldCoord> {
        let (dx, dy) = dir.offset();
        Some(WorldCoord::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }
}

impl fmt::Display for WorldCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for WorldCoord {
    type Err = TerrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = parse_pair(s)?;
        Ok(WorldCoord::new(x, y))
    }
}

/// Position of a chunk in chunk units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// World coordinate of the chunk's top-left (minimum) tile.
    pub fn origin(&self, chunk_size: u32) -> WorldCoord {
        let size = chunk_size as i32;
        WorldCoord::new(self.x * size, self.y * size)
    }

    /// The chunk one step away in a cardinal direction, if there is one.
    pub fn neighbor(&self, dir: Direction) -> Option<ChunkCoord> {
        let (dx, dy) = dir.offset();
        Some(ChunkCoord::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for ChunkCoord {
    type Err = TerrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = parse_pair(s)?;
        Ok(ChunkCoord::new(x, y))
    }
}

/// Parse the persisted `"x,y"` key form.
fn parse_pair(s: &str) -> Result<(i32, i32), TerrainError> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| TerrainError::InvalidKey(s.to_string()))?;
    let x = x.trim().parse().map_err(|_| TerrainError::InvalidKey(s.to_string()))?;
    let y = y.trim().parse().map_err(|_| TerrainError::InvalidKey(s.to_string()))?;
    Ok((x, y))
}

/// Cardinal directions. Declared in alphabetical order of their names so that
/// sorting directions sorts their names as well.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    East,
    North,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::North,
        Direction::South,
        Direction::West,
    ];

    /// Grid offset, with y growing southwards.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::East => "east",
            Direction::North => "north",
            Direction::South => "south",
            Direction::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Derive the seed for one chunk's generation stream.
///
/// Splitmix-style mixing of the world seed with both chunk coordinates,
/// masked to 32 bits so the value survives any save format that stores it.
pub fn chunk_seed(world_seed: u64, chunk: ChunkCoord) -> u64 {
    let mut hash = world_seed;

    hash = hash.wrapping_add(chunk.x as i64 as u64);
    hash ^= hash >> 30;
    hash = hash.wrapping_mul(0xbf58476d1ce4e5b9);

    hash = hash.wrapping_add(chunk.y as i64 as u64);
    hash ^= hash >> 27;
    hash = hash.wrapping_mul(0x94d049bb133111eb);

    hash ^= hash >> 31;

    hash & 0xFFFF_FFFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_division_for_negative_coords() {
        assert_eq!(WorldCoord::new(0, 0).chunk(8), ChunkCoord::new(0, 0));
        assert_eq!(WorldCoord::new(7, 7).chunk(8), ChunkCoord::new(0, 0));
        assert_eq!(WorldCoord::new(8, 0).chunk(8), ChunkCoord::new(1, 0));
        assert_eq!(WorldCoord::new(-1, 0).chunk(8), ChunkCoord::new(-1, 0));
        assert_eq!(WorldCoord::new(-8, -9).chunk(8), ChunkCoord::new(-1, -2));
    }

    #[test]
    fn test_origin() {
        assert_eq!(ChunkCoord::new(-2, 3).origin(8), WorldCoord::new(-16, 24));
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!("3,-4".parse::<ChunkCoord>().unwrap(), ChunkCoord::new(3, -4));
        assert_eq!("-10,12".parse::<WorldCoord>().unwrap(), WorldCoord::new(-10, 12));
        assert_eq!(WorldCoord::new(-10, 12).to_string(), "-10,12");
        assert!("3".parse::<ChunkCoord>().is_err());
        assert!("a,b".parse::<WorldCoord>().is_err());
    }

    #[test]
    fn test_chunk_seed_determinism() {
        let a = chunk_seed(42, ChunkCoord::new(1, 0));
        let b = chunk_seed(42, ChunkCoord::new(1, 0));
        assert_eq!(a, b);
        assert!(a <= 0xFFFF_FFFF);
        assert_ne!(a, chunk_seed(42, ChunkCoord::new(0, 1)));
        assert_ne!(a, chunk_seed(43, ChunkCoord::new(1, 0)));
    }

    #[test]
    fn test_directions_sort_by_name() {
        let mut names: Vec<&str> = Direction::ALL.iter().map(|d| d.name()).collect();
        let sorted = names.clone();
        names.sort();
        assert_eq!(names, sorted);
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_steps_stop_at_grid_edge() {
        let edge = WorldCoord::new(i32::MAX, i32::MIN);
        assert_eq!(edge.step(Direction::East), None);
        assert_eq!(edge.step(Direction::North), None);
        assert_eq!(edge.step(Direction::West), Some(WorldCoord::new(i32::MAX - 1, i32::MIN)));
        assert_eq!(edge.step(Direction::South), Some(WorldCoord::new(i32::MAX, i32::MIN + 1)));

        let last = ChunkCoord::new(i32::MIN, 0);
        assert_eq!(last.neighbor(Direction::West), None);
        assert_eq!(last.neighbor(Direction::East), Some(ChunkCoord::new(i32::MIN + 1, 0)));
    }
}
