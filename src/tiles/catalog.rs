//! Tile definitions and the immutable catalog the solver works against.

use std::collections::{BTreeSet, HashMap};

use super::terrain::standard_tiles;

/// Weight reported for names the catalog does not know
pub const UNKNOWN_WEIGHT: f64 = 1.0;

static NO_NEIGHBORS: BTreeSet<String> = BTreeSet::new();

/// Interned tile index. Ids follow the alphabetical order of tile names, so
/// ordered sets of ids iterate in name order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u16);

impl TileId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Static description of one terrain kind.
#[derive(Clone, Debug, PartialEq)]
pub struct TileDef {
    pub name: String,
    /// Relative frequency, must be > 0
    pub weight: f64,
    pub passable: bool,
    /// How much this terrain adds to a region's sense of dread
    pub dread: i32,
    /// Coarse label used by consumers (grassland, water, mountain, ...)
    pub category: String,
    /// Names of tiles allowed on any 4-adjacent side
    pub compatible: BTreeSet<String>,
    /// Location types that are typically placed on this terrain
    pub location_hints: Vec<String>,
}

impl TileDef {
    pub fn new(name: &str, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            weight,
            passable: true,
            dread: 0,
            category: "terrain".to_string(),
            compatible: BTreeSet::new(),
            location_hints: Vec::new(),
        }
    }

    pub fn passable(mut self, passable: bool) -> Self {
        self.passable = passable;
        self
    }

    pub fn dread(mut self, dread: i32) -> Self {
        self.dread = dread;
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn compatible_with(mut self, names: &[&str]) -> Self {
        self.compatible.extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn hints(mut self, hints: &[&str]) -> Self {
        self.location_hints = hints.iter().map(|h| h.to_string()).collect();
        self
    }
}

/// Lookup table from tile name to definition, with a precomputed mutual
/// compatibility matrix for the solver.
#[derive(Clone, Debug)]
pub struct TileCatalog {
    defs: Vec<TileDef>,
    index: HashMap<String, TileId>,
    /// `compat[a][b]` is true when `a` lists `b` and `b` lists `a`
    compat: Vec<Vec<bool>>,
}

impl TileCatalog {
    /// Build a catalog from an arbitrary tile set. A later definition with
    /// the same name replaces an earlier one.
    pub fn new(defs: Vec<TileDef>) -> Self {
        let mut by_name: std::collections::BTreeMap<String, TileDef> = Default::default();
        for def in defs {
            by_name.insert(def.name.clone(), def);
        }
        let defs: Vec<TileDef> = by_name.into_values().collect();
        assert!(defs.len() <= u16::MAX as usize, "too many tile kinds");

        let index: HashMap<String, TileId> = defs
            .iter()
            .enumerate()
            .map(|(i, d)| (d.name.clone(), TileId(i as u16)))
            .collect();

        let compat = defs
            .iter()
            .map(|a| {
                defs.iter()
                    .map(|b| a.compatible.contains(&b.name) && b.compatible.contains(&a.name))
                    .collect()
            })
            .collect();

        Self { defs, index, compat }
    }

    /// The fixed terrain table used by the game world.
    pub fn standard() -> Self {
        Self::new(standard_tiles())
    }

    pub fn get(&self, name: &str) -> Option<&TileDef> {
        self.index.get(name).map(|id| &self.defs[id.index()])
    }

    pub fn all_names(&self) -> BTreeSet<&str> {
        self.defs.iter().map(|d| d.name.as_str()).collect()
    }

    /// Declared neighbors of a tile; empty for unknown names.
    pub fn valid_neighbors(&self, name: &str) -> &BTreeSet<String> {
        self.get(name).map(|d| &d.compatible).unwrap_or(&NO_NEIGHBORS)
    }

    pub fn is_passable(&self, name: &str) -> bool {
        self.get(name).map(|d| d.passable).unwrap_or(false)
    }

    pub fn get_weight(&self, name: &str) -> f64 {
        self.get(name).map(|d| d.weight).unwrap_or(UNKNOWN_WEIGHT)
    }

    /// Whether two named tiles may touch, checked in both directions.
    pub fn is_compatible(&self, a: &str, b: &str) -> bool {
        match (self.id(a), self.id(b)) {
            (Some(a), Some(b)) => self.compatible(a, b),
            _ => false,
        }
    }

    /// Tiles whose location hints include `kind`, in name order.
    pub fn tiles_hinting(&self, kind: &str) -> Vec<&str> {
        self.defs
            .iter()
            .filter(|d| d.location_hints.iter().any(|h| h == kind))
            .map(|d| d.name.as_str())
            .collect()
    }

    pub fn id(&self, name: &str) -> Option<TileId> {
        self.index.get(name).copied()
    }

    pub fn name(&self, id: TileId) -> &str {
        &self.defs[id.index()].name
    }

    pub fn def(&self, id: TileId) -> &TileDef {
        &self.defs[id.index()]
    }

    #[inline]
    pub fn compatible(&self, a: TileId, b: TileId) -> bool {
        self.compat[a.index()][b.index()]
    }

    /// All ids in name order.
    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        (0..self.defs.len()).map(|i| TileId(i as u16))
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl Default for TileCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
