use std::sync::Arc;

use wfc_terrain::{ChunkCoord, ChunkManager, ChunkSource, TerrainConfig, TileCatalog};

fn catalog() -> Arc<TileCatalog> {
    Arc::new(TileCatalog::standard())
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saves").join("terrain.json");

    let mut original = ChunkManager::new(catalog(), TerrainConfig::with_seed(1234)).unwrap();
    original.preload_area(ChunkCoord::new(0, 0), 1).unwrap();
    original.set_tile_at(2, 2, "road").unwrap();
    original.save_json(&path).unwrap();

    let mut restored = ChunkManager::load_json(&path, catalog()).unwrap();
    assert_eq!(restored.world_seed(), 1234);
    assert_eq!(restored.chunk_size(), 8);
    assert_eq!(restored.cached_chunks(), original.cached_chunks());

    for coord in original.cached_chunks() {
        let chunk = original.get_chunk(coord.x, coord.y).unwrap().clone();
        for (pos, name) in chunk.tiles() {
            assert_eq!(restored.tile_at(pos.x, pos.y).unwrap(), name);
        }
        assert_eq!(restored.get_chunk(coord.x, coord.y).unwrap().source, ChunkSource::Restored);
    }
    assert_eq!(restored.tile_at(2, 2).unwrap(), "road");
}

#[test]
fn saved_file_uses_string_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("terrain.json");

    let mut m = ChunkManager::new(catalog(), TerrainConfig::with_seed(7)).unwrap();
    m.tile_at(-1, -1).unwrap();
    m.save_json(&path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["world_seed"], 7);
    assert_eq!(value["chunk_size"], 8);
    let chunk = &value["chunks"]["-1,-1"];
    assert!(chunk.is_object());
    assert_eq!(chunk.as_object().unwrap().len(), 64);
    assert!(chunk["-8,-8"].is_string());
    assert!(chunk["-1,-1"].is_string());
}

#[test]
fn restored_manager_keeps_generating_consistently() {
    let mut a = ChunkManager::new(catalog(), TerrainConfig::with_seed(99)).unwrap();
    a.get_or_generate(0, 0).unwrap();
    let mut b = ChunkManager::deserialize(a.serialize(), catalog()).unwrap();

    a.get_or_generate(1, 0).unwrap();
    b.get_or_generate(1, 0).unwrap();
    assert_eq!(a.get_chunk(1, 0).unwrap().tiles(), b.get_chunk(1, 0).unwrap().tiles());
}

#[test]
fn loading_a_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = ChunkManager::load_json(dir.path().join("nope.json"), catalog());
    assert!(matches!(result, Err(wfc_terrain::TerrainError::Io(_))));
}
