//! The fixed terrain table for the game world.

use std::collections::BTreeMap;

use super::catalog::TileDef;

struct TerrainRow {
    name: &'static str,
    weight: f64,
    passable: bool,
    dread: i32,
    category: &'static str,
    hints: &'static [&'static str],
}

const TERRAIN: &[TerrainRow] = &[
    // Temperate
    TerrainRow { name: "plains", weight: 3.0, passable: true, dread: 0, category: "grassland", hints: &["village", "farm", "camp"] },
    TerrainRow { name: "meadow", weight: 2.0, passable: true, dread: 0, category: "grassland", hints: &["farm", "shrine"] },
    TerrainRow { name: "forest", weight: 2.5, passable: true, dread: 1, category: "woodland", hints: &["camp", "hut"] },
    TerrainRow { name: "dense_forest", weight: 1.2, passable: true, dread: 2, category: "woodland", hints: &["hut", "lair"] },
    TerrainRow { name: "hills", weight: 1.5, passable: true, dread: 0, category: "highland", hints: &["watchtower", "mine"] },
    // Aquatic
    TerrainRow { name: "river", weight: 1.0, passable: false, dread: 0, category: "water", hints: &["mill", "bridge"] },
    TerrainRow { name: "lake", weight: 0.8, passable: false, dread: 0, category: "water", hints: &[] },
    TerrainRow { name: "swamp", weight: 0.9, passable: true, dread: 2, category: "wetland", hints: &["hut", "lair"] },
    TerrainRow { name: "shore", weight: 0.8, passable: true, dread: 0, category: "coast", hints: &["port", "village"] },
    // Arid
    TerrainRow { name: "scrubland", weight: 1.4, passable: true, dread: 0, category: "dryland", hints: &["camp", "outpost"] },
    TerrainRow { name: "desert", weight: 1.5, passable: true, dread: 1, category: "desert", hints: &["oasis", "outpost"] },
    TerrainRow { name: "dunes", weight: 0.9, passable: true, dread: 1, category: "desert", hints: &[] },
    TerrainRow { name: "badlands", weight: 0.8, passable: true, dread: 2, category: "desert", hints: &["lair", "mine"] },
    // Alpine
    TerrainRow { name: "foothills", weight: 1.2, passable: true, dread: 0, category: "highland", hints: &["mine", "watchtower"] },
    TerrainRow { name: "mountain", weight: 1.0, passable: false, dread: 1, category: "mountain", hints: &[] },
    TerrainRow { name: "snowfield", weight: 0.6, passable: true, dread: 2, category: "mountain", hints: &["shrine"] },
    // Neutral
    TerrainRow { name: "road", weight: 0.7, passable: true, dread: -1, category: "road", hints: &["crossroads", "inn"] },
    TerrainRow { name: "ruins", weight: 0.4, passable: true, dread: 3, category: "ruin", hints: &["dungeon", "shrine"] },
];

/// Undirected adjacency pairs. Every tile may also border itself.
const EDGES: &[(&str, &str)] = &[
    ("plains", "meadow"),
    ("plains", "forest"),
    ("plains", "hills"),
    ("plains", "river"),
    ("plains", "shore"),
    ("plains", "swamp"),
    ("plains", "scrubland"),
    ("plains", "foothills"),
    ("plains", "road"),
    ("plains", "ruins"),
    ("meadow", "forest"),
    ("meadow", "hills"),
    ("meadow", "river"),
    ("meadow", "lake"),
    ("meadow", "road"),
    ("meadow", "ruins"),
    ("forest", "dense_forest"),
    ("forest", "hills"),
    ("forest", "swamp"),
    ("forest", "river"),
    ("forest", "foothills"),
    ("forest", "road"),
    ("forest", "ruins"),
    ("dense_forest", "swamp"),
    ("dense_forest", "hills"),
    ("dense_forest", "ruins"),
    ("hills", "foothills"),
    ("hills", "scrubland"),
    ("hills", "river"),
    ("hills", "road"),
    ("hills", "ruins"),
    ("river", "lake"),
    ("river", "swamp"),
    ("river", "shore"),
    ("river", "road"),
    ("lake", "shore"),
    ("lake", "swamp"),
    ("swamp", "shore"),
    ("swamp", "ruins"),
    ("shore", "road"),
    ("scrubland", "desert"),
    ("scrubland", "badlands"),
    ("scrubland", "foothills"),
    ("scrubland", "road"),
    ("scrubland", "ruins"),
    ("desert", "dunes"),
    ("desert", "badlands"),
    ("desert", "road"),
    ("desert", "ruins"),
    ("dunes", "badlands"),
    ("badlands", "foothills"),
    ("badlands", "mountain"),
    ("badlands", "road"),
    ("badlands", "ruins"),
    ("foothills", "mountain"),
    ("foothills", "snowfield"),
    ("foothills", "road"),
    ("foothills", "ruins"),
    ("mountain", "snowfield"),
    ("road", "ruins"),
];

/// Build the standard tile set with symmetric compatibility lists.
pub fn standard_tiles() -> Vec<TileDef> {
    let mut neighbors: BTreeMap<&str, Vec<&str>> = TERRAIN
        .iter()
        .map(|row| (row.name, vec![row.name]))
        .collect();

    for &(a, b) in EDGES {
        if let Some(list) = neighbors.get_mut(a) {
            list.push(b);
        }
        if let Some(list) = neighbors.get_mut(b) {
            list.push(a);
        }
    }

    TERRAIN
        .iter()
        .map(|row| {
            TileDef::new(row.name, row.weight)
                .passable(row.passable)
                .dread(row.dread)
                .category(row.category)
                .hints(row.hints)
                .compatible_with(&neighbors[row.name])
        })
        .collect()
}
