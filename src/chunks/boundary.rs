//! Boundary conditions copied from already-generated neighbor chunks.

use crate::coords::{Direction, WorldCoord};

use super::chunk::Chunk;

/// Edge tiles a new chunk must reproduce, one optional edge per side.
///
/// Each edge lists the neighbor's shared edge in increasing x or y order.
/// `None` inside an edge means the neighbor had no tile there.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundaryConditions {
    pub north: Option<Vec<Option<String>>>,
    pub south: Option<Vec<Option<String>>>,
    pub east: Option<Vec<Option<String>>>,
    pub west: Option<Vec<Option<String>>>,
}

impl BoundaryConditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the edge of `neighbor`, which lies in direction `side` of the
    /// chunk being generated.
    pub fn set_from_neighbor(&mut self, side: Direction, neighbor: &Chunk) {
        let edge = neighbor
            .extract_edge(side.opposite())
            .into_iter()
            .map(|t| t.map(str::to_string))
            .collect();
        match side {
            Direction::North => self.north = Some(edge),
            Direction::South => self.south = Some(edge),
            Direction::East => self.east = Some(edge),
            Direction::West => self.west = Some(edge),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Number of constrained sides.
    pub fn count(&self) -> usize {
        [&self.north, &self.south, &self.east, &self.west]
            .iter()
            .filter(|e| e.is_some())
            .count()
    }

    /// Per-cell equality pins for a chunk at `origin`, in west, east, north,
    /// south order.
    pub fn pins(&self, origin: WorldCoord, size: u32) -> Vec<(WorldCoord, String)> {
        let n = size as i32;
        let mut pins = Vec::new();
        let sides = [
            (&self.west, Direction::West),
            (&self.east, Direction::East),
            (&self.north, Direction::North),
            (&self.south, Direction::South),
        ];

        for (edge, side) in sides {
            let Some(edge) = edge else {
                continue;
            };
            for (i, tile) in edge.iter().enumerate().take(size as usize) {
                let Some(tile) = tile else {
                    continue;
                };
                let i = i as i32;
                let pos = match side {
                    Direction::West => WorldCoord::new(origin.x, origin.y + i),
                    Direction::East => WorldCoord::new(origin.x + (n - 1), origin.y + i),
                    Direction::North => WorldCoord::new(origin.x + i, origin.y),
                    Direction::South => WorldCoord::new(origin.x + i, origin.y + (n - 1)),
                };
                pins.push((pos, tile.clone()));
            }
        }
        pins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunks::chunk::ChunkSource;
    use crate::coords::ChunkCoord;
    use std::collections::BTreeMap;

    fn filled(coord: ChunkCoord, size: u32, f: impl Fn(WorldCoord) -> String) -> Chunk {
        let origin = coord.origin(size);
        let mut tiles = BTreeMap::new();
        for y in 0..size as i32 {
            for x in 0..size as i32 {
                let pos = WorldCoord::new(origin.x + x, origin.y + y);
                tiles.insert(pos, f(pos));
            }
        }
        Chunk::new(coord, size, tiles, ChunkSource::Unconstrained)
    }

    #[test]
    fn test_west_neighbor_pins_first_column() {
        // neighbor at (0,0); new chunk at (1,0)
        let west = filled(ChunkCoord::new(0, 0), 3, |p| format!("r{}", p.y));
        let mut bc = BoundaryConditions::new();
        assert!(bc.is_empty());
        bc.set_from_neighbor(Direction::West, &west);
        assert_eq!(bc.count(), 1);

        let pins = bc.pins(ChunkCoord::new(1, 0).origin(3), 3);
        assert_eq!(
            pins,
            vec![
                (WorldCoord::new(3, 0), "r0".to_string()),
                (WorldCoord::new(3, 1), "r1".to_string()),
                (WorldCoord::new(3, 2), "r2".to_string()),
            ]
        );
    }

    #[test]
    fn test_north_neighbor_pins_first_row() {
        let north = filled(ChunkCoord::new(0, -1), 2, |p| format!("x{}y{}", p.x, p.y));
        let mut bc = BoundaryConditions::new();
        bc.set_from_neighbor(Direction::North, &north);
        let pins = bc.pins(WorldCoord::new(0, 0), 2);
        assert_eq!(
            pins,
            vec![
                (WorldCoord::new(0, 0), "x0y-1".to_string()),
                (WorldCoord::new(1, 0), "x1y-1".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_neighbor_tiles_are_skipped() {
        let mut bc = BoundaryConditions::new();
        bc.east = Some(vec![Some("a".into()), None]);
        let pins = bc.pins(WorldCoord::new(0, 0), 2);
        assert_eq!(pins, vec![(WorldCoord::new(1, 0), "a".to_string())]);
    }
}
