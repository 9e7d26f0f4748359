//! Cells and the square grid a single chunk is solved on.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::coords::WorldCoord;
use crate::tiles::{TileCatalog, TileId};

/// One tile slot being solved.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub pos: WorldCoord,
    /// Tiles still possible here. Empty only after a contradiction.
    pub options: BTreeSet<TileId>,
    pub collapsed: bool,
    pub tile: Option<TileId>,
}

impl Cell {
    fn new(pos: WorldCoord, options: BTreeSet<TileId>) -> Self {
        Self {
            pos,
            options,
            collapsed: false,
            tile: None,
        }
    }
}

/// A cell's possibility set became empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contradiction {
    pub pos: WorldCoord,
}

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "contradiction at ({})", self.pos)
    }
}

/// Row-major grid of cells covering one chunk.
#[derive(Clone, Debug)]
pub struct CellGrid {
    origin: WorldCoord,
    size: u32,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Every cell starts with every catalog tile possible.
    pub fn new(origin: WorldCoord, size: u32, catalog: &TileCatalog) -> Self {
        let all: BTreeSet<TileId> = catalog.ids().collect();
        let n = size as i32;
        let mut cells = Vec::with_capacity((size * size) as usize);
        for ly in 0..n {
            for lx in 0..n {
                let pos = WorldCoord::new(origin.x + lx, origin.y + ly);
                cells.push(Cell::new(pos, all.clone()));
            }
        }
        Self { origin, size, cells }
    }

    pub fn origin(&self) -> WorldCoord {
        self.origin
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Index of a local position, if it lies inside the grid.
    pub fn index(&self, lx: i32, ly: i32) -> Option<usize> {
        let n = self.size as i32;
        if lx < 0 || ly < 0 || lx >= n || ly >= n {
            return None;
        }
        Some((ly * n + lx) as usize)
    }

    /// Index of a world position, if this grid covers it.
    pub fn index_of(&self, pos: WorldCoord) -> Option<usize> {
        self.index(pos.x - self.origin.x, pos.y - self.origin.y)
    }

    pub fn local(&self, idx: usize) -> (i32, i32) {
        let n = self.size as usize;
        ((idx % n) as i32, (idx / n) as i32)
    }

    pub fn cell(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    pub fn cell_mut(&mut self, idx: usize) -> &mut Cell {
        &mut self.cells[idx]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// In-grid 4-neighbors (east, north, south, west).
    pub fn neighbors4(&self, idx: usize) -> [Option<usize>; 4] {
        let (lx, ly) = self.local(idx);
        [
            self.index(lx + 1, ly),
            self.index(lx, ly - 1),
            self.index(lx, ly + 1),
            self.index(lx - 1, ly),
        ]
    }

    /// Intersect a cell's options with a single tile.
    pub fn restrict(&mut self, idx: usize, tile: Option<TileId>) -> Result<(), Contradiction> {
        let cell = &mut self.cells[idx];
        match tile {
            Some(t) if cell.options.contains(&t) => {
                cell.options.retain(|&o| o == t);
                Ok(())
            }
            _ => {
                cell.options.clear();
                Err(Contradiction { pos: cell.pos })
            }
        }
    }

    /// Fix a cell to one tile.
    pub fn set_collapsed(&mut self, idx: usize, tile: TileId) {
        let cell = &mut self.cells[idx];
        cell.options.clear();
        cell.options.insert(tile);
        cell.collapsed = true;
        cell.tile = Some(tile);
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|c| c.collapsed)
    }

    /// Resolved tile names by world coordinate. Uncollapsed cells are omitted.
    pub fn to_tiles(&self, catalog: &TileCatalog) -> BTreeMap<WorldCoord, String> {
        self.cells
            .iter()
            .filter_map(|c| c.tile.map(|t| (c.pos, catalog.name(t).to_string())))
            .collect()
    }
}
