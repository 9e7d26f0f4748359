//! Terrain tile data: definitions, the fixed terrain table, biome families
//! and region themes.

pub mod bias;
pub mod biome;
pub mod catalog;
mod terrain;

pub use bias::{biased_weights, theme_multiplier, RegionBias, WeightTable, THEMES};
pub use biome::{
    biome_group, distance_penalty, groups_incompatible, is_natural_transition, BiomeGroup,
    SEVERE_PENALTY, TRANSITION_PENALTY,
};
pub use catalog::{TileCatalog, TileDef, TileId, UNKNOWN_WEIGHT};
pub use terrain::standard_tiles;
