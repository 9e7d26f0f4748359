//! Minimum-entropy cell selection.

use std::collections::BTreeSet;

use rand::Rng;

use crate::tiles::{TileId, WeightTable};

use super::cell::CellGrid;

/// Scale of the random jitter that breaks entropy ties
pub const TIE_JITTER: f64 = 1e-6;

/// Shannon entropy of a weighted distribution.
///
/// `H = ln(sum w) - sum(w ln w) / sum w`. Zero when the total weight is zero.
pub fn shannon_entropy<I>(weights: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut sum_wlogw = 0.0;
    for w in weights {
        if w > 0.0 {
            sum += w;
            sum_wlogw += w * w.ln();
        }
    }
    if sum <= 0.0 {
        return 0.0;
    }
    (sum.ln() - sum_wlogw / sum).max(0.0)
}

/// Entropy of a possibility set under the effective weights.
pub fn cell_entropy(options: &BTreeSet<TileId>, weights: &WeightTable) -> f64 {
    if options.len() <= 1 {
        return 0.0;
    }
    shannon_entropy(options.iter().map(|&t| weights.weight(t)))
}

/// Pick the uncollapsed cell with the lowest entropy.
///
/// Each candidate draws one jitter value from `rng`, in row-major order, so
/// the choice is reproducible for a given stream state.
pub fn select_cell<R: Rng>(
    grid: &CellGrid,
    weights: &WeightTable,
    rng: &mut R,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, cell) in grid.cells().iter().enumerate() {
        if cell.collapsed {
            continue;
        }
        let noisy = cell_entropy(&cell.options, weights) + rng.gen::<f64>() * TIE_JITTER;
        match best {
            Some((_, e)) if noisy >= e => {}
            _ => best = Some((idx, noisy)),
        }
    }

    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::WorldCoord;
    use crate::tiles::{TileCatalog, TileDef};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn catalog() -> TileCatalog {
        TileCatalog::new(vec![
            TileDef::new("a", 1.0).compatible_with(&["a", "b", "c"]),
            TileDef::new("b", 1.0).compatible_with(&["a", "b", "c"]),
            TileDef::new("c", 2.0).compatible_with(&["a", "b", "c"]),
        ])
    }

    #[test]
    fn test_entropy_floor() {
        let cat = catalog();
        let weights = WeightTable::base(&cat);
        let single: BTreeSet<TileId> = [cat.id("c").unwrap()].into_iter().collect();
        assert_eq!(cell_entropy(&single, &weights), 0.0);
        assert_eq!(cell_entropy(&BTreeSet::new(), &weights), 0.0);
        assert_eq!(shannon_entropy([0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_all_zero_weight_set() {
        let cat = catalog();
        let bias = crate::tiles::RegionBias::Multipliers(
            [("a", 0.0), ("b", 0.0), ("c", 0.0)]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        );
        let weights = WeightTable::new(&cat, Some(&bias));
        let all: BTreeSet<TileId> = cat.ids().collect();
        assert_eq!(cell_entropy(&all, &weights), 0.0);
    }

    #[test]
    fn test_uniform_entropy_is_ln_n() {
        let h = shannon_entropy([1.0, 1.0, 1.0, 1.0]);
        assert!((h - 4.0f64.ln()).abs() < 1e-12);
        // weights scale out
        let h2 = shannon_entropy([5.0, 5.0]);
        assert!((h2 - 2.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_skewed_weights_lower_entropy() {
        assert!(shannon_entropy([1.0, 9.0]) < shannon_entropy([5.0, 5.0]));
    }

    #[test]
    fn test_selects_most_constrained_cell() {
        let cat = catalog();
        let weights = WeightTable::base(&cat);
        let mut grid = CellGrid::new(WorldCoord::new(0, 0), 3, &cat);
        let a = cat.id("a").unwrap();
        let b = cat.id("b").unwrap();
        grid.cell_mut(7).options = [a, b].into_iter().collect();

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(select_cell(&grid, &weights, &mut rng), Some(7));
    }

    #[test]
    fn test_selection_is_reproducible_and_skips_collapsed() {
        let cat = catalog();
        let weights = WeightTable::base(&cat);
        let mut grid = CellGrid::new(WorldCoord::new(0, 0), 3, &cat);
        let first = {
            let mut rng = ChaCha8Rng::seed_from_u64(9);
            select_cell(&grid, &weights, &mut rng)
        };
        let second = {
            let mut rng = ChaCha8Rng::seed_from_u64(9);
            select_cell(&grid, &weights, &mut rng)
        };
        assert_eq!(first, second);

        for idx in 0..grid.len() {
            grid.set_collapsed(idx, cat.id("a").unwrap());
        }
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert_eq!(select_cell(&grid, &weights, &mut rng), None);
    }
}
