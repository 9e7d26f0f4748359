//! Authored world locations and movement queries on top of the terrain.

use serde::{Deserialize, Serialize};

use crate::chunks::ChunkManager;
use crate::coords::{Direction, WorldCoord};
use crate::error::TerrainError;

/// A named place placed by world or story authoring.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldLocation {
    pub name: String,
    /// Kind of place ("village", "shrine", ...), matched against tile hints
    #[serde(default)]
    pub location_type: Option<String>,
    /// World tile coordinates; unplaced locations are skipped by terrain sync
    #[serde(default)]
    pub coordinates: Option<(i32, i32)>,
    /// Terrain to stamp under the location
    #[serde(default)]
    pub terrain: Option<String>,
}

impl WorldLocation {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.coordinates = Some((x, y));
        self
    }

    pub fn of_type(mut self, kind: &str) -> Self {
        self.location_type = Some(kind.to_string());
        self
    }

    pub fn on(mut self, terrain: &str) -> Self {
        self.terrain = Some(terrain.to_string());
        self
    }
}

/// Cardinal directions out of `(x, y)` that lead onto passable terrain,
/// sorted by name. Directions off the edge of the grid are never open.
/// Generates chunks as needed.
pub fn passable_directions(
    terrain: &mut ChunkManager,
    x: i32,
    y: i32,
) -> Result<Vec<Direction>, TerrainError> {
    let here = WorldCoord::new(x, y);
    let mut open = Vec::new();
    for dir in Direction::ALL {
        let Some(to) = here.step(dir) else {
            continue;
        };
        if terrain.is_passable_at(to.x, to.y)? {
            open.push(dir);
        }
    }
    open.sort();
    Ok(open)
}

/// Same as [`passable_directions`], as lowercase names.
pub fn passable_direction_names(
    terrain: &mut ChunkManager,
    x: i32,
    y: i32,
) -> Result<Vec<&'static str>, TerrainError> {
    Ok(passable_directions(terrain, x, y)?
        .into_iter()
        .map(|d| d.name())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainConfig;
    use crate::tiles::TileCatalog;
    use std::sync::Arc;

    fn manager() -> ChunkManager {
        ChunkManager::new(Arc::new(TileCatalog::standard()), TerrainConfig::with_seed(17)).unwrap()
    }

    #[test]
    fn test_directions_follow_passability() {
        let mut m = manager();
        m.set_tile_at(1, 0, "plains").unwrap();
        m.set_tile_at(-1, 0, "mountain").unwrap();
        m.set_tile_at(0, -1, "lake").unwrap();
        m.set_tile_at(0, 1, "road").unwrap();
        let dirs = passable_directions(&mut m, 0, 0).unwrap();
        assert_eq!(dirs, vec![Direction::East, Direction::South]);
        assert_eq!(passable_direction_names(&mut m, 0, 0).unwrap(), vec!["east", "south"]);
    }

    #[test]
    fn test_grid_edge_is_closed() {
        let mut m = manager();
        m.set_tile_at(i32::MAX - 1, 0, "plains").unwrap();
        m.set_tile_at(i32::MAX, 1, "road").unwrap();
        let dirs = passable_directions(&mut m, i32::MAX, 0).unwrap();
        assert!(!dirs.contains(&Direction::East));
        assert!(dirs.contains(&Direction::West));
        assert!(dirs.contains(&Direction::South));
    }

    #[test]
    fn test_sync_stamps_terrain() {
        let mut m = manager();
        let locations = vec![
            WorldLocation::new("Millbrook").at(3, 4).of_type("village"),
            WorldLocation::new("Old Keep").at(-20, 9).on("ruins"),
            WorldLocation::new("Somewhere"),
        ];
        let written = m.sync_with_locations(&locations, "plains").unwrap();
        assert_eq!(written, 2);
        assert_eq!(m.tile_at(3, 4).unwrap(), "plains");
        assert_eq!(m.tile_at(-20, 9).unwrap(), "ruins");
        assert!(m.is_passable_at(3, 4).unwrap());
    }

    #[test]
    fn test_location_from_json() {
        let loc: WorldLocation =
            serde_json::from_str(r#"{"name": "Ford", "coordinates": [2, -3]}"#).unwrap();
        assert_eq!(loc.coordinates, Some((2, -3)));
        assert!(loc.terrain.is_none());
    }
}
