//! The observe/propagate loop for one chunk, with bounded retries.

use std::collections::BTreeMap;

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::coords::WorldCoord;
use crate::tiles::{TileCatalog, WeightTable};

use super::cell::{CellGrid, Contradiction};
use super::collapse::collapse_cell;
use super::entropy::select_cell;
use super::propagate::propagate;

/// Everything one generation call needs besides the RNG. Weights are passed
/// in per call rather than stored on the caller.
#[derive(Clone, Copy)]
pub struct SolveParams<'a> {
    pub catalog: &'a TileCatalog,
    pub weights: &'a WeightTable,
    pub penalty_radius: i32,
}

/// Result of the retry loop.
#[derive(Clone, Debug, PartialEq)]
pub enum SolveOutcome {
    /// A complete, adjacency-consistent assignment
    Solved {
        tiles: BTreeMap<WorldCoord, String>,
        /// 1-based attempt that succeeded
        attempts: usize,
    },
    /// Every attempt contradicted
    Exhausted { attempts: usize },
}

/// Run one full attempt: pin the boundary cells, then collapse until done.
pub fn solve_attempt<R: Rng>(
    origin: WorldCoord,
    size: u32,
    pins: &[(WorldCoord, String)],
    params: SolveParams<'_>,
    rng: &mut R,
) -> Result<BTreeMap<WorldCoord, String>, Contradiction> {
    let catalog = params.catalog;
    let mut grid = CellGrid::new(origin, size, catalog);

    for (pos, name) in pins {
        let Some(idx) = grid.index_of(*pos) else {
            continue;
        };
        grid.restrict(idx, catalog.id(name))?;
        propagate(&mut grid, catalog, idx)?;
    }

    while let Some(idx) = select_cell(&grid, params.weights, rng) {
        collapse_cell(
            &mut grid,
            catalog,
            params.weights,
            idx,
            params.penalty_radius,
            rng,
        )?;
    }

    debug_assert!(grid.is_complete(), "solve loop ended with open cells");
    Ok(grid.to_tiles(catalog))
}

/// Retry `solve_attempt` up to `max_attempts` times on one seeded stream.
///
/// The stream is never reseeded between attempts. After each failure one
/// extra value is drawn and discarded so the next attempt diverges.
pub fn solve_with_retries(
    origin: WorldCoord,
    size: u32,
    pins: &[(WorldCoord, String)],
    params: SolveParams<'_>,
    seed: u64,
    max_attempts: usize,
) -> SolveOutcome {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for attempt in 1..=max_attempts {
        match solve_attempt(origin, size, pins, params, &mut rng) {
            Ok(tiles) => return SolveOutcome::Solved { tiles, attempts: attempt },
            Err(c) => {
                debug!(
                    "Chunk at ({}) attempt {}/{} failed: {}",
                    origin, attempt, max_attempts, c
                );
                let _: u64 = rng.gen();
            }
        }
    }

    SolveOutcome::Exhausted { attempts: max_attempts }
}
