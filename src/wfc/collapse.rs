//! Weighted collapse of a single cell.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::tiles::{distance_penalty, TileCatalog, TileId, WeightTable};

use super::cell::{CellGrid, Contradiction};
use super::propagate::propagate;

/// Names of collapsed tiles within `radius` (Chebyshev, 8-directional) of a cell.
pub fn nearby_tiles<'a>(
    grid: &CellGrid,
    catalog: &'a TileCatalog,
    idx: usize,
    radius: i32,
) -> Vec<&'a str> {
    let (lx, ly) = grid.local(idx);
    let mut out = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx == 0 && dy == 0 {
                continue;
            }
            if let Some(n) = grid.index(lx + dx, ly + dy) {
                if let Some(t) = grid.cell(n).tile {
                    out.push(catalog.name(t));
                }
            }
        }
    }
    out
}

/// Effective weight of every remaining option at a cell: bias-adjusted
/// catalog weight times the biome distance penalty.
pub fn candidate_weights(
    grid: &CellGrid,
    catalog: &TileCatalog,
    weights: &WeightTable,
    idx: usize,
    radius: i32,
) -> Vec<(TileId, f64)> {
    let nearby = nearby_tiles(grid, catalog, idx, radius);
    grid.cell(idx)
        .options
        .iter()
        .map(|&t| {
            let penalty = distance_penalty(catalog.name(t), nearby.iter().copied());
            (t, weights.weight(t) * penalty)
        })
        .collect()
}

/// Weighted draw. Falls back to a uniform draw when every weight is zero.
pub fn weighted_choice<R: Rng>(candidates: &[(TileId, f64)], rng: &mut R) -> TileId {
    match WeightedIndex::new(candidates.iter().map(|&(_, w)| w)) {
        Ok(dist) => candidates[dist.sample(rng)].0,
        Err(_) => candidates[rng.gen_range(0..candidates.len())].0,
    }
}

/// Resolve one cell to a concrete tile and propagate the consequences.
///
/// # Panics
/// If the cell has no options left. Contradictions are caught during
/// propagation, so reaching this means the solver's bookkeeping is broken.
pub fn collapse_cell<R: Rng>(
    grid: &mut CellGrid,
    catalog: &TileCatalog,
    weights: &WeightTable,
    idx: usize,
    radius: i32,
    rng: &mut R,
) -> Result<TileId, Contradiction> {
    let candidates = candidate_weights(grid, catalog, weights, idx, radius);
    assert!(
        !candidates.is_empty(),
        "collapsing cell at ({}) with an empty possibility set",
        grid.cell(idx).pos
    );

    let chosen = weighted_choice(&candidates, rng);
    grid.set_collapsed(idx, chosen);
    propagate(grid, catalog, idx)?;
    Ok(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::WorldCoord;
    use crate::tiles::{TileDef, SEVERE_PENALTY};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_nearby_respects_radius() {
        let cat = TileCatalog::standard();
        let mut grid = CellGrid::new(WorldCoord::new(0, 0), 8, &cat);
        let desert = cat.id("desert").unwrap();
        let lake = cat.id("lake").unwrap();
        // (2,2) is within 2 of (0,0); (3,0) is not
        grid.set_collapsed(grid.index(2, 2).unwrap(), desert);
        grid.set_collapsed(grid.index(3, 0).unwrap(), lake);

        let near = nearby_tiles(&grid, &cat, 0, 2);
        assert_eq!(near, vec!["desert"]);
        assert!(nearby_tiles(&grid, &cat, 0, 1).is_empty());
    }

    #[test]
    fn test_candidate_weights_apply_penalty() {
        let cat = TileCatalog::standard();
        let weights = WeightTable::base(&cat);
        let mut grid = CellGrid::new(WorldCoord::new(0, 0), 8, &cat);
        grid.set_collapsed(grid.index(1, 1).unwrap(), cat.id("desert").unwrap());

        let lake = cat.id("lake").unwrap();
        let road = cat.id("road").unwrap();
        let cands = candidate_weights(&grid, &cat, &weights, 0, 2);
        let w = |id| cands.iter().find(|(t, _)| *t == id).unwrap().1;
        assert!((w(lake) - 0.8 * SEVERE_PENALTY).abs() < 1e-12);
        assert_eq!(w(road), 0.7);
    }

    #[test]
    fn test_weighted_choice_prefers_heavy_tiles() {
        let cands = vec![(TileId(0), 1.0), (TileId(1), 999.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let heavy = (0..200)
            .filter(|_| weighted_choice(&cands, &mut rng) == TileId(1))
            .count();
        assert!(heavy > 190);
    }

    #[test]
    fn test_weighted_choice_all_zero_is_uniform_not_panic() {
        let cands = vec![(TileId(0), 0.0), (TileId(1), 0.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let t = weighted_choice(&cands, &mut rng);
        assert!(t == TileId(0) || t == TileId(1));
    }

    #[test]
    fn test_collapse_fixes_cell_and_propagates() {
        let cat = TileCatalog::new(vec![
            TileDef::new("a", 1.0).compatible_with(&["a"]),
            TileDef::new("b", 1.0).compatible_with(&["b"]),
        ]);
        let weights = WeightTable::base(&cat);
        let mut grid = CellGrid::new(WorldCoord::new(0, 0), 3, &cat);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let tile = collapse_cell(&mut grid, &cat, &weights, 4, 2, &mut rng).unwrap();
        assert!(grid.cell(4).collapsed);
        assert_eq!(grid.cell(4).tile, Some(tile));
        // a and b never touch, so the whole grid follows
        for cell in grid.cells() {
            assert_eq!(cell.options.iter().copied().collect::<Vec<_>>(), vec![tile]);
        }
    }

    #[test]
    #[should_panic(expected = "empty possibility set")]
    fn test_collapse_empty_cell_panics() {
        let cat = TileCatalog::standard();
        let weights = WeightTable::base(&cat);
        let mut grid = CellGrid::new(WorldCoord::new(0, 0), 2, &cat);
        grid.cell_mut(0).options.clear();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let _ = collapse_cell(&mut grid, &cat, &weights, 0, 2, &mut rng);
    }
}
