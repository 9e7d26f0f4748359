//! ASCII and PNG rendering of a generated area.
//!
//! All functions take an inclusive world rectangle and generate any chunk
//! inside it that is not cached yet.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Local;
use image::{Rgb, RgbImage};

use crate::chunks::ChunkManager;
use crate::coords::WorldCoord;
use crate::error::TerrainError;

/// Glyph for a tile name; `?` for anything not in the standard table.
pub fn tile_glyph(name: &str) -> char {
    match name {
        "plains" => '.',
        "meadow" => ',',
        "forest" => 'T',
        "dense_forest" => '&',
        "hills" => 'n',
        "river" => '~',
        "lake" => 'O',
        "swamp" => '%',
        "shore" => '_',
        "scrubland" => ';',
        "desert" => ':',
        "dunes" => 's',
        "badlands" => 'b',
        "foothills" => 'h',
        "mountain" => '^',
        "snowfield" => '*',
        "road" => '=',
        "ruins" => '#',
        _ => '?',
    }
}

pub fn tile_color(name: &str) -> Rgb<u8> {
    let rgb = match name {
        "plains" => [156, 196, 92],
        "meadow" => [176, 214, 120],
        "forest" => [54, 120, 54],
        "dense_forest" => [28, 82, 38],
        "hills" => [140, 150, 90],
        "river" => [64, 120, 210],
        "lake" => [40, 90, 180],
        "swamp" => [84, 104, 72],
        "shore" => [222, 210, 160],
        "scrubland" => [190, 176, 110],
        "desert" => [230, 204, 130],
        "dunes" => [240, 220, 150],
        "badlands" => [170, 100, 70],
        "foothills" => [150, 130, 100],
        "mountain" => [120, 110, 110],
        "snowfield" => [240, 244, 250],
        "road" => [150, 120, 90],
        "ruins" => [100, 90, 100],
        _ => [255, 0, 255],
    };
    Rgb(rgb)
}

fn rect(min: WorldCoord, max: WorldCoord) -> Result<(i32, i32), TerrainError> {
    if max.x < min.x || max.y < min.y {
        return Err(TerrainError::Config(format!(
            "empty export rectangle ({})..=({})",
            min, max
        )));
    }
    Ok((max.x - min.x + 1, max.y - min.y + 1))
}

/// One line per row, north at the top.
pub fn render_ascii(
    terrain: &mut ChunkManager,
    min: WorldCoord,
    max: WorldCoord,
) -> Result<String, TerrainError> {
    let (width, height) = rect(min, max)?;
    let mut out = String::with_capacity(((width + 1) * height) as usize);
    for y in min.y..=max.y {
        for x in min.x..=max.x {
            out.push(tile_glyph(terrain.tile_at(x, y)?));
        }
        out.push('\n');
    }
    Ok(out)
}

pub fn legend() -> String {
    const NAMES: [&str; 18] = [
        "plains", "meadow", "forest", "dense_forest", "hills", "river", "lake", "swamp", "shore",
        "scrubland", "desert", "dunes", "badlands", "foothills", "mountain", "snowfield", "road",
        "ruins",
    ];
    let mut out = String::from("=== LEGEND ===\n");
    for row in NAMES.chunks(3) {
        let line: Vec<String> = row
            .iter()
            .map(|n| format!("{} {:<13}", tile_glyph(n), n))
            .collect();
        out.push_str("  ");
        out.push_str(line.join("").trim_end());
        out.push('\n');
    }
    out
}

/// Write map, legend and tile counts to a text file.
pub fn export_ascii<P: AsRef<Path>>(
    terrain: &mut ChunkManager,
    min: WorldCoord,
    max: WorldCoord,
    path: P,
) -> Result<(), TerrainError> {
    let map = render_ascii(terrain, min, max)?;

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for y in min.y..=max.y {
        for x in min.x..=max.x {
            *counts.entry(terrain.tile_at(x, y)?.to_string()).or_insert(0) += 1;
        }
    }
    let total: usize = counts.values().sum();

    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "=== TERRAIN ===")?;
    writeln!(file, "Seed: {}", terrain.world_seed())?;
    writeln!(file, "Chunk size: {}", terrain.chunk_size())?;
    writeln!(file, "Area: ({})..=({})", min, max)?;
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;
    write!(file, "{}", map)?;
    writeln!(file)?;
    write!(file, "{}", legend())?;
    writeln!(file)?;
    writeln!(file, "=== STATISTICS ===")?;
    for (name, count) in &counts {
        writeln!(
            file,
            "  {:<13} {:>6} ({:.1}%)",
            name,
            count,
            *count as f64 * 100.0 / total as f64
        )?;
    }
    writeln!(file, "  {}", terrain.stats().summary())?;
    file.flush()?;
    Ok(())
}

/// Render the area as a PNG with `scale` pixels per tile.
pub fn export_png<P: AsRef<Path>>(
    terrain: &mut ChunkManager,
    min: WorldCoord,
    max: WorldCoord,
    scale: u32,
    path: P,
) -> Result<(), TerrainError> {
    let (width, height) = rect(min, max)?;
    let scale = scale.max(1);
    let mut img = RgbImage::new(width as u32 * scale, height as u32 * scale);

    for y in min.y..=max.y {
        for x in min.x..=max.x {
            let color = tile_color(terrain.tile_at(x, y)?);
            let px = (x - min.x) as u32 * scale;
            let py = (y - min.y) as u32 * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(px + dx, py + dy, color);
                }
            }
        }
    }

    img.save(path)?;
    Ok(())
}
