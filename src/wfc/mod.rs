//! Wave Function Collapse over a single chunk.
//!
//! A chunk is solved on a square grid of cells, each holding the set of tiles
//! still possible there. The loop picks the lowest-entropy open cell,
//! collapses it to one weighted-random tile, and propagates the consequence
//! outward until every cell is resolved or some cell runs out of options.
//!
//! # Flow
//!
//! 1. Pin boundary cells copied from neighbors (if any) and propagate
//! 2. [`entropy::select_cell`] picks the most constrained cell
//! 3. [`collapse::collapse_cell`] draws a tile, weighted by catalog weight,
//!    region bias and biome distance penalty
//! 4. [`propagate::propagate`] restores arc consistency
//! 5. On contradiction the attempt is dropped and retried on the same stream

pub mod base;
pub mod cell;
pub mod collapse;
pub mod entropy;
pub mod propagate;
pub mod solver;

pub use base::{BaseGenerator, WfcBaseGenerator};
pub use cell::{Cell, CellGrid, Contradiction};
pub use collapse::{candidate_weights, collapse_cell, nearby_tiles, weighted_choice};
pub use entropy::{cell_entropy, select_cell, shannon_entropy, TIE_JITTER};
pub use propagate::propagate;
pub use solver::{solve_attempt, solve_with_retries, SolveOutcome, SolveParams};
