//! Region themes and the effective weight table threaded through generation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::{TileCatalog, TileDef, TileId};

/// Names of the built-in themes
pub const THEMES: &[&str] = &["coastal", "desolate", "frontier", "haunted", "wilderness"];

/// Extra scale per point of positive dread under the haunted theme
const HAUNTED_DREAD_STEP: f64 = 0.25;

/// Per-tile multipliers of a named theme, `None` for unknown themes.
fn theme_table(theme: &str) -> Option<&'static [(&'static str, f64)]> {
    let table: &'static [(&'static str, f64)] = match theme {
        "haunted" => &[("ruins", 3.0), ("dense_forest", 1.8), ("swamp", 1.6), ("road", 0.4)],
        "frontier" => &[("plains", 1.5), ("road", 2.0), ("hills", 1.2), ("ruins", 0.5)],
        "wilderness" => &[("forest", 1.5), ("dense_forest", 1.5), ("road", 0.2), ("ruins", 0.5)],
        "coastal" => &[("shore", 3.0), ("lake", 1.5), ("river", 1.5), ("mountain", 0.5)],
        "desolate" => &[
            ("desert", 2.0),
            ("badlands", 2.0),
            ("dunes", 1.5),
            ("snowfield", 1.5),
            ("plains", 0.5),
            ("meadow", 0.3),
        ],
        _ => return None,
    };
    Some(table)
}

/// Multiplier a named theme applies to one tile. Unknown themes are neutral.
pub fn theme_multiplier(theme: &str, def: &TileDef) -> f64 {
    let Some(table) = theme_table(theme) else {
        return 1.0;
    };
    let mut m = table
        .iter()
        .find(|(name, _)| *name == def.name)
        .map(|&(_, m)| m)
        .unwrap_or(1.0);
    if theme == "haunted" && def.dread > 0 {
        m *= 1.0 + HAUNTED_DREAD_STEP * def.dread as f64;
    }
    m
}

/// Base catalog weights scaled by a theme. An unknown theme returns the
/// unmodified base weights.
pub fn biased_weights(catalog: &TileCatalog, theme: &str) -> BTreeMap<String, f64> {
    catalog
        .ids()
        .map(|id| {
            let def = catalog.def(id);
            (def.name.clone(), def.weight * theme_multiplier(theme, def))
        })
        .collect()
}

/// Optional bias installed on a chunk manager for chunks generated later.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionBias {
    /// One of the built-in themes
    Theme(String),
    /// Explicit per-tile multipliers; unlisted tiles keep 1.0
    Multipliers(BTreeMap<String, f64>),
}

impl RegionBias {
    pub fn theme(name: &str) -> Self {
        RegionBias::Theme(name.to_string())
    }

    pub fn multiplier(&self, def: &TileDef) -> f64 {
        match self {
            RegionBias::Theme(theme) => theme_multiplier(theme, def),
            RegionBias::Multipliers(table) => table.get(&def.name).copied().unwrap_or(1.0),
        }
    }
}

/// Effective weight of every tile for one generation call: catalog weight
/// times the region bias multiplier. Built once and passed down explicitly.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightTable {
    weights: Vec<f64>,
}

impl WeightTable {
    pub fn new(catalog: &TileCatalog, bias: Option<&RegionBias>) -> Self {
        let weights = catalog
            .ids()
            .map(|id| {
                let def = catalog.def(id);
                let m = bias.map(|b| b.multiplier(def)).unwrap_or(1.0);
                (def.weight * m).max(0.0)
            })
            .collect();
        Self { weights }
    }

    /// Plain catalog weights.
    pub fn base(catalog: &TileCatalog) -> Self {
        Self::new(catalog, None)
    }

    #[inline]
    pub fn weight(&self, id: TileId) -> f64 {
        self.weights.get(id.index()).copied().unwrap_or(0.0)
    }
}
