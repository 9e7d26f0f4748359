//! Biome families and the distance penalty that keeps jarring terrain apart.
//!
//! Adjacency compatibility only constrains touching tiles. The penalty here
//! looks a little further out (a few tiles, 8-directional) and makes the
//! collapse step unlikely to pick a tile from a clashing biome family, or a
//! tile that does not naturally border what is already nearby.

use std::fmt;

/// Factor applied when a nearby tile belongs to an incompatible biome family
pub const SEVERE_PENALTY: f64 = 0.01;

/// Factor applied when a nearby tile is not a natural transition
pub const TRANSITION_PENALTY: f64 = 0.3;

/// Coarse terrain family
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BiomeGroup {
    Temperate,
    Arid,
    Aquatic,
    Alpine,
    /// Roads, ruins: fit anywhere and are never penalized
    Neutral,
}

impl BiomeGroup {
    pub fn name(&self) -> &'static str {
        match self {
            BiomeGroup::Temperate => "temperate",
            BiomeGroup::Arid => "arid",
            BiomeGroup::Aquatic => "aquatic",
            BiomeGroup::Alpine => "alpine",
            BiomeGroup::Neutral => "neutral",
        }
    }
}

impl fmt::Display for BiomeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Registered biome family of a tile, if it has one.
pub fn biome_group(tile: &str) -> Option<BiomeGroup> {
    let group = match tile {
        "plains" | "meadow" | "forest" | "dense_forest" | "hills" => BiomeGroup::Temperate,
        "river" | "lake" | "swamp" | "shore" => BiomeGroup::Aquatic,
        "scrubland" | "desert" | "dunes" | "badlands" => BiomeGroup::Arid,
        "foothills" | "mountain" | "snowfield" => BiomeGroup::Alpine,
        "road" | "ruins" => BiomeGroup::Neutral,
        _ => return None,
    };
    Some(group)
}

const INCOMPATIBLE_GROUPS: &[(BiomeGroup, BiomeGroup)] = &[
    (BiomeGroup::Arid, BiomeGroup::Aquatic),
    (BiomeGroup::Aquatic, BiomeGroup::Alpine),
];

/// Whether two biome families are a registered clashing pair (either order).
pub fn groups_incompatible(a: BiomeGroup, b: BiomeGroup) -> bool {
    INCOMPATIBLE_GROUPS
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// Cross-family borders that read as natural.
const NATURAL_TRANSITIONS: &[(&str, &str)] = &[
    ("plains", "river"),
    ("plains", "shore"),
    ("plains", "swamp"),
    ("plains", "scrubland"),
    ("plains", "foothills"),
    ("meadow", "river"),
    ("meadow", "lake"),
    ("forest", "swamp"),
    ("forest", "river"),
    ("forest", "foothills"),
    ("dense_forest", "swamp"),
    ("hills", "foothills"),
    ("hills", "scrubland"),
    ("hills", "river"),
    ("scrubland", "foothills"),
    ("badlands", "foothills"),
    ("badlands", "mountain"),
];

/// Whether `a` can naturally border `b` (checked in both orders). Identical
/// tiles and tiles of the same family always can.
pub fn is_natural_transition(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    if let (Some(ga), Some(gb)) = (biome_group(a), biome_group(b)) {
        if ga == gb {
            return true;
        }
    }
    NATURAL_TRANSITIONS
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// Weight factor for placing `candidate` given the collapsed tiles around it.
///
/// Returns the harshest factor any single nearby tile imposes: 0.01 for a
/// clashing family, 0.3 for an unnatural border, 1.0 otherwise. Neutral tiles
/// on either side never penalize, nor do tiles without a registered family.
pub fn distance_penalty<'a, I>(candidate: &str, nearby: I) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    let cand_group = match biome_group(candidate) {
        Some(BiomeGroup::Neutral) | None => return 1.0,
        Some(g) => g,
    };

    let mut factor = 1.0f64;
    for other in nearby {
        let other_group = match biome_group(other) {
            Some(BiomeGroup::Neutral) | None => continue,
            Some(g) => g,
        };
        if groups_incompatible(cand_group, other_group) {
            // nothing is harsher
            return SEVERE_PENALTY;
        }
        if !is_natural_transition(candidate, other) {
            factor = factor.min(TRANSITION_PENALTY);
        }
    }
    factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_immunity() {
        let everything = ["desert", "lake", "mountain", "plains", "ruins", "unknown"];
        assert_eq!(distance_penalty("road", everything), 1.0);
        assert_eq!(distance_penalty("ruins", everything), 1.0);
        assert_eq!(distance_penalty("road", []), 1.0);
    }

    #[test]
    fn test_severe_penalty_for_clashing_families() {
        assert_eq!(distance_penalty("desert", ["lake"]), SEVERE_PENALTY);
        assert_eq!(distance_penalty("lake", ["plains", "desert"]), SEVERE_PENALTY);
        assert_eq!(distance_penalty("mountain", ["river"]), SEVERE_PENALTY);
    }

    #[test]
    fn test_transition_penalty() {
        // temperate/arid is not a clash, but dense_forest next to desert is not natural
        assert_eq!(distance_penalty("dense_forest", ["desert"]), TRANSITION_PENALTY);
        assert_eq!(distance_penalty("plains", ["scrubland"]), 1.0);
        assert_eq!(distance_penalty("scrubland", ["plains"]), 1.0);
    }

    #[test]
    fn test_same_family_is_natural() {
        assert!(is_natural_transition("forest", "hills"));
        assert!(is_natural_transition("dunes", "dunes"));
        assert_eq!(distance_penalty("forest", ["plains", "meadow", "forest"]), 1.0);
    }

    #[test]
    fn test_nearby_neutral_and_unknown_are_ignored() {
        assert_eq!(distance_penalty("lake", ["road", "ruins", "mystery"]), 1.0);
    }

    #[test]
    fn test_unknown_candidate_is_not_penalized() {
        assert_eq!(distance_penalty("a", ["desert", "lake"]), 1.0);
    }

    #[test]
    fn test_incompatibility_is_symmetric() {
        assert!(groups_incompatible(BiomeGroup::Aquatic, BiomeGroup::Arid));
        assert!(groups_incompatible(BiomeGroup::Arid, BiomeGroup::Aquatic));
        assert!(!groups_incompatible(BiomeGroup::Temperate, BiomeGroup::Arid));
    }
}
