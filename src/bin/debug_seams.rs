//! Generate a grid of chunks and report how each was produced and where
//! adjacent tiles disagree.
//!
//! Usage: debug_seams [seed] [radius]

use std::env;
use std::sync::Arc;

use wfc_terrain::{ChunkCoord, ChunkManager, ChunkSource, TerrainConfig, TileCatalog};

fn main() {
    env_logger::init();

    let mut argv = env::args().skip(1);
    let seed: u64 = argv.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let radius: i32 = argv.next().and_then(|s| s.parse().ok()).unwrap_or(2);

    let catalog = Arc::new(TileCatalog::standard());
    let mut terrain = match ChunkManager::new(catalog, TerrainConfig::with_seed(seed)) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = terrain.preload_area(ChunkCoord::new(0, 0), radius) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    println!("=== SEAM DEBUG seed={} radius={} ===", seed, radius);
    println!();

    // one cell per chunk: U unconstrained, C constrained, F fallback
    for cy in -radius..=radius {
        let row: String = (-radius..=radius)
            .map(|cx| match terrain.get_chunk(cx, cy).map(|c| c.source) {
                Some(ChunkSource::Unconstrained) => 'U',
                Some(ChunkSource::Constrained { .. }) => 'C',
                Some(ChunkSource::Fallback) => 'F',
                Some(ChunkSource::Restored) => 'R',
                None => ' ',
            })
            .collect();
        println!("  {}", row);
    }
    println!();

    for coord in terrain.cached_chunks() {
        if let Some(chunk) = terrain.get_chunk(coord.x, coord.y) {
            println!("chunk ({:>6}): {}", coord, chunk.source);
        }
    }
    println!();
    println!("{}", terrain.stats().summary());

    let violations = terrain.seam_violations();
    let across = violations.iter().filter(|v| v.across_chunks).count();
    println!(
        "Violations: {} ({} across chunk boundaries)",
        violations.len(),
        across
    );
    for v in &violations {
        println!("  {}", v);
    }
}
