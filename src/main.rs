use std::fs;
use std::process;
use std::sync::Arc;

use clap::Parser;

use wfc_terrain::export::{export_ascii, export_png, legend, render_ascii};
use wfc_terrain::tiles::THEMES;
use wfc_terrain::{
    ChunkCoord, ChunkManager, FallbackPolicy, RegionBias, TerrainConfig, TerrainError, TileCatalog,
    WorldCoord, WorldLocation,
};

#[derive(Parser, Debug)]
#[command(name = "wfc_terrain")]
#[command(about = "Generate chunked terrain with Wave Function Collapse")]
struct Args {
    /// World seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with generator settings; flags below override it
    #[arg(short, long)]
    config: Option<String>,

    /// Chunk edge length in tiles
    #[arg(long)]
    chunk_size: Option<u32>,

    /// Constrained attempts per chunk before falling back
    #[arg(long)]
    max_attempts: Option<usize>,

    /// Abort instead of regenerating a chunk without its neighbor edges
    #[arg(long)]
    fail_loudly: bool,

    /// Chunk X at the center of the generated area
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    center_x: i32,

    /// Chunk Y at the center of the generated area
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    center_y: i32,

    /// Radius in chunks around the center
    #[arg(short, long, default_value = "1")]
    radius: i32,

    /// Region theme applied to every generated chunk
    #[arg(short, long)]
    theme: Option<String>,

    /// JSON list of world locations to stamp into the terrain
    #[arg(long)]
    locations: Option<String>,

    /// Restore a previously saved terrain before generating
    #[arg(long)]
    load: Option<String>,

    /// Save the terrain to a JSON file
    #[arg(long)]
    save: Option<String>,

    /// Export the area to a PNG
    #[arg(long)]
    export_png: Option<String>,

    /// Pixels per tile for PNG export
    #[arg(long, default_value = "4")]
    png_scale: u32,

    /// Export the area as an ASCII text file
    #[arg(long)]
    export_ascii: Option<String>,

    /// Do not print the map to stdout
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn build_config(args: &Args) -> Result<TerrainConfig, TerrainError> {
    let mut config = match &args.config {
        Some(path) => TerrainConfig::from_json_file(path)?,
        None => TerrainConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.world_seed = seed;
    } else if args.config.is_none() {
        config.world_seed = rand::random::<u32>() as u64;
    }
    if let Some(size) = args.chunk_size {
        config.chunk_size = size;
    }
    if let Some(attempts) = args.max_attempts {
        config.max_attempts = attempts;
    }
    if args.fail_loudly {
        config.fallback = FallbackPolicy::FailLoudly;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> Result<(), TerrainError> {
    let catalog = Arc::new(TileCatalog::standard());

    let mut terrain = match &args.load {
        Some(path) => {
            println!("Loading terrain from {}", path);
            ChunkManager::load_json(path, catalog)?
        }
        None => ChunkManager::new(catalog, build_config(&args)?)?,
    };
    println!(
        "Seed: {} | Chunk size: {} | Cached chunks: {}",
        terrain.world_seed(),
        terrain.chunk_size(),
        terrain.chunk_count()
    );

    if let Some(theme) = &args.theme {
        if !THEMES.contains(&theme.as_str()) {
            return Err(TerrainError::Config(format!(
                "unknown theme {:?} (expected one of {})",
                theme,
                THEMES.join(", ")
            )));
        }
        println!("Theme: {}", theme);
        terrain.set_region_bias(Some(RegionBias::theme(theme)));
    }

    if let Some(path) = &args.locations {
        let text = fs::read_to_string(path)?;
        let locations: Vec<WorldLocation> = serde_json::from_str(&text)?;
        let written = terrain.sync_with_locations(&locations, "plains")?;
        println!("Stamped {} of {} locations", written, locations.len());
    }

    let center = ChunkCoord::new(args.center_x, args.center_y);
    let radius = args.radius.max(0);
    terrain.preload_area(center, radius)?;

    let size = terrain.chunk_size();
    let min = ChunkCoord::new(center.x - radius, center.y - radius).origin(size);
    let end = ChunkCoord::new(center.x + radius + 1, center.y + radius + 1).origin(size);
    let max = WorldCoord::new(end.x - 1, end.y - 1);

    if !args.quiet {
        println!();
        print!("{}", render_ascii(&mut terrain, min, max)?);
        println!();
        print!("{}", legend());
    }

    println!();
    for coord in terrain.cached_chunks() {
        if let Some(chunk) = terrain.get_chunk(coord.x, coord.y) {
            println!("  chunk ({:>4}) {}", coord, chunk.source);
        }
    }
    println!("{}", terrain.stats().summary());

    let violations = terrain.seam_violations();
    if violations.is_empty() {
        println!("No adjacency violations");
    } else {
        println!("{} adjacency violations:", violations.len());
        for v in violations.iter().take(20) {
            println!("  {}", v);
        }
    }

    if let Some(path) = &args.export_png {
        export_png(&mut terrain, min, max, args.png_scale, path)?;
        println!("Exported PNG to {}", path);
    }
    if let Some(path) = &args.export_ascii {
        export_ascii(&mut terrain, min, max, path)?;
        println!("Exported ASCII map to {}", path);
    }
    if let Some(path) = &args.save {
        terrain.save_json(path)?;
        println!("Saved {} chunks to {}", terrain.chunk_count(), path);
    }

    Ok(())
}
