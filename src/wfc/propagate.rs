//! Arc-consistency propagation.

use std::collections::VecDeque;

use crate::tiles::{TileCatalog, TileId};

use super::cell::{CellGrid, Contradiction};

/// Shrink neighbors of `start` until every option in every reachable cell is
/// supported by at least one mutually compatible option next to it.
///
/// Breadth-first from `start`. Stops at the first empty cell; the grid is
/// then left half-propagated and the attempt must be thrown away.
pub fn propagate(
    grid: &mut CellGrid,
    catalog: &TileCatalog,
    start: usize,
) -> Result<(), Contradiction> {
    let mut queue = VecDeque::from([start]);
    let mut support: Vec<TileId> = Vec::new();

    while let Some(idx) = queue.pop_front() {
        support.clear();
        support.extend(grid.cell(idx).options.iter().copied());

        for n in grid.neighbors4(idx).into_iter().flatten() {
            let cell = grid.cell_mut(n);
            let before = cell.options.len();
            cell.options
                .retain(|&t| support.iter().any(|&s| catalog.compatible(s, t)));

            if cell.options.len() != before {
                if cell.options.is_empty() {
                    return Err(Contradiction { pos: cell.pos });
                }
                queue.push_back(n);
            }
        }
    }

    Ok(())
}
