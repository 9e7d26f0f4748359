//! Unconstrained single-chunk generation.

use std::collections::BTreeMap;

use log::warn;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::coords::WorldCoord;
use crate::tiles::{TileCatalog, TileId, WeightTable};

use super::collapse::weighted_choice;
use super::solver::{solve_with_retries, SolveOutcome, SolveParams};

/// Produces one chunk with no boundary constraints from outside.
pub trait BaseGenerator {
    fn generate(
        &self,
        catalog: &TileCatalog,
        origin: WorldCoord,
        size: u32,
        seed: u64,
        weight_overrides: Option<&WeightTable>,
    ) -> BTreeMap<WorldCoord, String>;
}

/// The default base generator: the same WFC loop with nothing pinned.
#[derive(Clone, Debug)]
pub struct WfcBaseGenerator {
    pub max_attempts: usize,
    pub penalty_radius: i32,
}

impl WfcBaseGenerator {
    pub fn new(max_attempts: usize, penalty_radius: i32) -> Self {
        Self {
            max_attempts,
            penalty_radius,
        }
    }
}

impl Default for WfcBaseGenerator {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_MAX_ATTEMPTS,
            crate::config::DEFAULT_PENALTY_RADIUS,
        )
    }
}

impl BaseGenerator for WfcBaseGenerator {
    fn generate(
        &self,
        catalog: &TileCatalog,
        origin: WorldCoord,
        size: u32,
        seed: u64,
        weight_overrides: Option<&WeightTable>,
    ) -> BTreeMap<WorldCoord, String> {
        let base;
        let weights = match weight_overrides {
            Some(w) => w,
            None => {
                base = WeightTable::base(catalog);
                &base
            }
        };
        let params = SolveParams {
            catalog,
            weights,
            penalty_radius: self.penalty_radius,
        };

        match solve_with_retries(origin, size, &[], params, seed, self.max_attempts) {
            SolveOutcome::Solved { tiles, .. } => tiles,
            SolveOutcome::Exhausted { attempts } => {
                warn!(
                    "Unconstrained chunk at ({}) failed {} attempts, scattering tiles",
                    origin, attempts
                );
                scatter_fill(catalog, origin, size, seed, weights)
            }
        }
    }
}

/// Last resort: independent weighted draws per cell, ignoring adjacency.
fn scatter_fill(
    catalog: &TileCatalog,
    origin: WorldCoord,
    size: u32,
    seed: u64,
    weights: &WeightTable,
) -> BTreeMap<WorldCoord, String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5CA7_7E12);
    let candidates: Vec<(TileId, f64)> = catalog.ids().map(|t| (t, weights.weight(t))).collect();
    let n = size as i32;
    let mut tiles = BTreeMap::new();
    for ly in 0..n {
        for lx in 0..n {
            let pos = WorldCoord::new(origin.x + lx, origin.y + ly);
            let tile = weighted_choice(&candidates, &mut rng);
            tiles.insert(pos, catalog.name(tile).to_string());
        }
    }
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::TileDef;

    #[test]
    fn test_base_chunk_is_full_and_consistent() {
        let cat = TileCatalog::standard();
        let gen = WfcBaseGenerator::default();
        let tiles = gen.generate(&cat, WorldCoord::new(-8, 16), 8, 99, None);
        assert_eq!(tiles.len(), 64);
        assert!(tiles.contains_key(&WorldCoord::new(-8, 16)));
        assert!(tiles.contains_key(&WorldCoord::new(-1, 23)));
        for (pos, name) in &tiles {
            if let Some(east) = tiles.get(&WorldCoord::new(pos.x + 1, pos.y)) {
                assert!(cat.is_compatible(name, east));
            }
            if let Some(south) = tiles.get(&WorldCoord::new(pos.x, pos.y + 1)) {
                assert!(cat.is_compatible(name, south));
            }
        }
    }

    #[test]
    fn test_base_is_deterministic() {
        let cat = TileCatalog::standard();
        let gen = WfcBaseGenerator::default();
        let a = gen.generate(&cat, WorldCoord::new(0, 0), 8, 5, None);
        let b = gen.generate(&cat, WorldCoord::new(0, 0), 8, 5, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_scatter_when_nothing_fits() {
        let cat = TileCatalog::new(vec![TileDef::new("a", 1.0), TileDef::new("b", 1.0)]);
        let gen = WfcBaseGenerator::new(3, 2);
        let tiles = gen.generate(&cat, WorldCoord::new(0, 0), 4, 1, None);
        assert_eq!(tiles.len(), 16);
        assert!(tiles.values().all(|t| t == "a" || t == "b"));
    }
}
