//! Tile map loading and drawing
//!
//! Consumes the subset of the Tiled JSON format the prototypes use: finite
//! orthogonal maps with tile layers and a single tileset. Files are
//! validated after parsing so a malformed map fails loudly at load time
//! instead of drawing garbage.

use std::fs;
use std::path::Path;

use macroquad::prelude::{vec2, Texture2D};
use serde::Deserialize;

use crate::render::{draw_tile, tile};

/// Validation limits to prevent resource exhaustion from malformed files
pub mod limits {
    /// Maximum map dimension (width or height) in tiles
    pub const MAX_MAP_SIZE: u32 = 1024;
    /// Maximum number of tile layers
    pub const MAX_LAYERS: usize = 16;
    /// Maximum tile pixel dimension
    pub const MAX_TILE_SIZE: u32 = 256;
}

/// Error type for map loading
#[derive(Debug)]
pub enum MapError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Validation(String),
}

impl From<std::io::Error> for MapError {
    fn from(e: std::io::Error) -> Self {
        MapError::Io(e)
    }
}

impl From<serde_json::Error> for MapError {
    fn from(e: serde_json::Error) -> Self {
        MapError::Parse(e)
    }
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::Io(e) => write!(f, "IO error: {}", e),
            MapError::Parse(e) => write!(f, "Parse error: {}", e),
            MapError::Validation(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for MapError {}

/// One tile layer: a row-major grid of global tile ids, 0 = empty.
#[derive(Debug, Clone, Deserialize)]
pub struct TileLayer {
    pub data: Vec<u32>,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

/// Tileset reference: maps global tile ids onto the atlas grid.
#[derive(Debug, Clone, Deserialize)]
pub struct Tileset {
    pub firstgid: u32,
    pub columns: u32,
    pub tilecount: u32,
    pub tilewidth: u32,
    pub tileheight: u32,
}

/// A parsed Tiled map (the subset we consume).
#[derive(Debug, Clone, Deserialize)]
pub struct TileMap {
    pub width: u32,
    pub height: u32,
    pub tilewidth: u32,
    pub tileheight: u32,
    pub layers: Vec<TileLayer>,
    pub tilesets: Vec<Tileset>,
}

impl TileMap {
    /// Atlas tile for a global tile id, or `None` for empty/unknown ids.
    pub fn tile_for_gid(&self, gid: u32) -> Option<crate::render::TileRef> {
        if gid == 0 {
            return None;
        }
        let set = self
            .tilesets
            .iter()
            .filter(|s| s.firstgid <= gid)
            .max_by_key(|s| s.firstgid)?;
        let local = gid - set.firstgid;
        if local >= set.tilecount {
            return None;
        }
        let col = local % set.columns;
        let row = local / set.columns;
        Some(tile(
            (col * set.tilewidth) as f32,
            (row * set.tileheight) as f32,
            set.tilewidth as f32,
            set.tileheight as f32,
        ))
    }

    /// Draw every visible layer, bottom layer first, centered on the origin.
    pub fn draw(&self, atlas: &Texture2D, camera_scale: f32) {
        let half_w = self.width as f32 / 2.0;
        let half_h = self.height as f32 / 2.0;

        for layer in self.layers.iter().filter(|l| l.visible) {
            for y in 0..layer.height {
                for x in 0..layer.width {
                    let gid = layer.data[(y * layer.width + x) as usize];
                    let Some(t) = self.tile_for_gid(gid) else {
                        continue;
                    };
                    // Tiled rows go top-down; world +y goes up.
                    let pos = vec2(
                        x as f32 - half_w + 0.5,
                        (layer.height - 1 - y) as f32 - half_h + 0.5,
                    );
                    draw_tile(atlas, t, pos, vec2(1.0, 1.0), camera_scale);
                }
            }
        }
    }
}

/// Read, parse and validate a Tiled JSON map.
pub fn load_map(path: impl AsRef<Path>) -> Result<TileMap, MapError> {
    let text = fs::read_to_string(path)?;
    let map: TileMap = serde_json::from_str(&text)?;
    validate_map(&map)?;
    Ok(map)
}

fn validate_map(map: &TileMap) -> Result<(), MapError> {
    let err = |msg: String| Err(MapError::Validation(msg));

    if map.width == 0 || map.height == 0 {
        return err("map dimensions must be non-zero".into());
    }
    if map.width > limits::MAX_MAP_SIZE || map.height > limits::MAX_MAP_SIZE {
        return err(format!(
            "map too large ({}x{} > {})",
            map.width,
            map.height,
            limits::MAX_MAP_SIZE
        ));
    }
    if map.layers.len() > limits::MAX_LAYERS {
        return err(format!(
            "too many layers ({} > {})",
            map.layers.len(),
            limits::MAX_LAYERS
        ));
    }

    let max_gid: u32 = map
        .tilesets
        .iter()
        .map(|s| s.firstgid + s.tilecount)
        .max()
        .unwrap_or(1);

    for (i, layer) in map.layers.iter().enumerate() {
        if layer.width != map.width || layer.height != map.height {
            return err(format!(
                "layer {} dimensions {}x{} do not match map {}x{}",
                i, layer.width, layer.height, map.width, map.height
            ));
        }
        if layer.data.len() != (layer.width * layer.height) as usize {
            return err(format!(
                "layer {} has {} tiles, expected {}",
                i,
                layer.data.len(),
                layer.width * layer.height
            ));
        }
        if let Some(&gid) = layer.data.iter().find(|&&g| g >= max_gid) {
            return err(format!("layer {} references unknown tile id {}", i, gid));
        }
    }

    for (i, set) in map.tilesets.iter().enumerate() {
        if set.columns == 0 || set.tilecount == 0 {
            return err(format!("tileset {} is empty", i));
        }
        if set.tilewidth == 0
            || set.tileheight == 0
            || set.tilewidth > limits::MAX_TILE_SIZE
            || set.tileheight > limits::MAX_TILE_SIZE
        {
            return err(format!("tileset {} has invalid tile size", i));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_json(data: &str) -> String {
        format!(
            r#"{{
                "width": 2, "height": 2, "tilewidth": 16, "tileheight": 16,
                "layers": [{{ "data": {data}, "width": 2, "height": 2, "name": "ground" }}],
                "tilesets": [{{ "firstgid": 1, "columns": 4, "tilecount": 8,
                                "tilewidth": 16, "tileheight": 16 }}]
            }}"#
        )
    }

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_valid_map() {
        let file = write_temp(&sample_json("[1, 2, 0, 8]"));
        let map = load_map(file.path()).unwrap();
        assert_eq!(map.width, 2);
        assert_eq!(map.layers[0].data, vec![1, 2, 0, 8]);
    }

    #[test]
    fn rejects_wrong_data_length() {
        let file = write_temp(&sample_json("[1, 2, 0]"));
        let err = load_map(file.path()).unwrap_err();
        assert!(matches!(err, MapError::Validation(_)), "got {err}");
    }

    #[test]
    fn rejects_unknown_gid() {
        // gid 9 is past firstgid (1) + tilecount (8)
        let file = write_temp(&sample_json("[1, 2, 0, 9]"));
        let err = load_map(file.path()).unwrap_err();
        assert!(matches!(err, MapError::Validation(_)), "got {err}");
    }

    #[test]
    fn rejects_malformed_json() {
        let file = write_temp("{ not json");
        let err = load_map(file.path()).unwrap_err();
        assert!(matches!(err, MapError::Parse(_)), "got {err}");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_map("does/not/exist.json").unwrap_err();
        assert!(matches!(err, MapError::Io(_)), "got {err}");
    }

    #[test]
    fn gid_zero_is_empty() {
        let file = write_temp(&sample_json("[0, 0, 0, 0]"));
        let map = load_map(file.path()).unwrap();
        assert_eq!(map.tile_for_gid(0), None);
    }

    #[test]
    fn gid_maps_into_atlas_grid() {
        let file = write_temp(&sample_json("[1, 2, 0, 8]"));
        let map = load_map(file.path()).unwrap();
        // gid 1 = local 0 -> top-left tile
        assert_eq!(map.tile_for_gid(1), Some(tile(0.0, 0.0, 16.0, 16.0)));
        // gid 6 = local 5 -> column 1, row 1
        assert_eq!(map.tile_for_gid(6), Some(tile(16.0, 16.0, 16.0, 16.0)));
    }
}
