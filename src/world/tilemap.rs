//! Tile map loading, saving and collision queries
//!
//! Maps are JSON documents with a sparse grid keyed by `"x;y"` plus a list of
//! off-grid tiles placed at pixel positions. Spawner markers live in the same
//! layers and are pulled out with [`Tilemap::extract`] when a level loads.

// Saving and in-memory editing complete the map format; the game itself only loads
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use macroquad::math::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rect::Rect;

/// Tile types that block movement
pub const PHYSICS_TILES: &[&str] = &["grass", "stone"];

/// Cells checked around a position, in query order
const NEIGHBOR_OFFSETS: [(i32, i32); 9] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (0, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Validation limits for map files
pub mod limits {
    /// Maximum number of grid plus off-grid tiles
    pub const MAX_TILES: usize = 1 << 20;
    /// Maximum tile edge length in pixels
    pub const MAX_TILE_SIZE: u32 = 256;
    /// Maximum absolute coordinate value
    pub const MAX_COORD: f32 = 1_000_000.0;
}

/// Error type for map loading and saving
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tile key {0:?} (expected \"x;y\")")]
    InvalidKey(String),
    #[error("validation error: {0}")]
    Validation(String),
}

/// A placed tile.
///
/// `pos` is in grid cells for grid tiles and in pixels for off-grid tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub kind: String,
    pub variant: u32,
    pub pos: Vec2,
}

impl Tile {
    pub fn new(kind: impl Into<String>, variant: u32, pos: Vec2) -> Self {
        Self { kind: kind.into(), variant, pos }
    }

    fn is_physics(&self) -> bool {
        PHYSICS_TILES.contains(&self.kind.as_str())
    }
}

/// A marker pulled out of the map at level load, always in pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: String,
    pub variant: u32,
    pub pos: Vec2,
}

/// On-disk tile record
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TileRecord {
    #[serde(rename = "type")]
    kind: String,
    variant: u32,
    pos: [f32; 2],
}

impl From<&Tile> for TileRecord {
    fn from(tile: &Tile) -> Self {
        Self {
            kind: tile.kind.clone(),
            variant: tile.variant,
            pos: [tile.pos.x, tile.pos.y],
        }
    }
}

/// On-disk map document
#[derive(Debug, Serialize, Deserialize)]
struct MapFile {
    tilemap: BTreeMap<String, TileRecord>,
    tile_size: u32,
    #[serde(default)]
    offgrid: Vec<TileRecord>,
}

/// Sparse tile grid plus free-placed decoration
#[derive(Debug, Clone, PartialEq)]
pub struct Tilemap {
    tile_size: u32,
    grid: HashMap<(i32, i32), Tile>,
    offgrid: Vec<Tile>,
}

fn parse_key(key: &str) -> Result<(i32, i32), LevelError> {
    let (x, y) = key
        .split_once(';')
        .ok_or_else(|| LevelError::InvalidKey(key.to_string()))?;
    let x = x.trim().parse().map_err(|_| LevelError::InvalidKey(key.to_string()))?;
    let y = y.trim().parse().map_err(|_| LevelError::InvalidKey(key.to_string()))?;
    Ok((x, y))
}

fn validate_record(record: &TileRecord, context: &str) -> Result<Vec2, LevelError> {
    let [x, y] = record.pos;
    for v in [x, y] {
        if !v.is_finite() || v.abs() > limits::MAX_COORD {
            return Err(LevelError::Validation(format!(
                "{}: invalid position {:?}",
                context, record.pos
            )));
        }
    }
    Ok(Vec2::new(x, y))
}

impl Tilemap {
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size,
            grid: HashMap::new(),
            offgrid: Vec::new(),
        }
    }

    /// Parse a map from its JSON text
    pub fn from_json_str(s: &str) -> Result<Self, LevelError> {
        let file: MapFile = serde_json::from_str(s)?;

        if file.tile_size == 0 || file.tile_size > limits::MAX_TILE_SIZE {
            return Err(LevelError::Validation(format!(
                "tile_size {} out of range 1..={}",
                file.tile_size,
                limits::MAX_TILE_SIZE
            )));
        }
        let total = file.tilemap.len() + file.offgrid.len();
        if total > limits::MAX_TILES {
            return Err(LevelError::Validation(format!(
                "too many tiles ({} > {})",
                total,
                limits::MAX_TILES
            )));
        }

        let mut map = Tilemap::new(file.tile_size);
        for (key, record) in &file.tilemap {
            let cell = parse_key(key)?;
            validate_record(record, key)?;
            // The key is authoritative for grid placement
            let pos = Vec2::new(cell.0 as f32, cell.1 as f32);
            map.grid.insert(cell, Tile::new(record.kind.clone(), record.variant, pos));
        }
        for (i, record) in file.offgrid.iter().enumerate() {
            let pos = validate_record(record, &format!("offgrid[{}]", i))?;
            map.offgrid.push(Tile::new(record.kind.clone(), record.variant, pos));
        }
        Ok(map)
    }

    /// Load a map from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LevelError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serialize back to the JSON map format
    pub fn to_json_string(&self) -> Result<String, LevelError> {
        let tilemap = self
            .grid
            .iter()
            .map(|(&(x, y), tile)| (format!("{};{}", x, y), TileRecord::from(tile)))
            .collect();
        let file = MapFile {
            tilemap,
            tile_size: self.tile_size,
            offgrid: self.offgrid.iter().map(TileRecord::from).collect(),
        };
        Ok(serde_json::to_string(&file)?)
    }

    /// Save to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), LevelError> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Place a grid tile at a cell, replacing what was there
    pub fn insert(&mut self, cell: (i32, i32), kind: impl Into<String>, variant: u32) {
        let pos = Vec2::new(cell.0 as f32, cell.1 as f32);
        self.grid.insert(cell, Tile::new(kind, variant, pos));
    }

    /// Place an off-grid tile at a pixel position
    pub fn insert_offgrid(&mut self, kind: impl Into<String>, variant: u32, pos: Vec2) {
        self.offgrid.push(Tile::new(kind, variant, pos));
    }

    pub fn tile_at(&self, cell: (i32, i32)) -> Option<&Tile> {
        self.grid.get(&cell)
    }

    pub fn grid_len(&self) -> usize {
        self.grid.len()
    }

    pub fn offgrid(&self) -> &[Tile] {
        &self.offgrid
    }

    /// Whether any grid or off-grid tile has this type and variant
    pub fn contains(&self, kind: &str, variant: u32) -> bool {
        self.offgrid
            .iter()
            .chain(self.grid.values())
            .any(|tile| tile.kind == kind && tile.variant == variant)
    }

    /// Grid cell containing a pixel position
    pub fn cell_of(&self, pos: Vec2) -> (i32, i32) {
        let ts = self.tile_size as f32;
        ((pos.x / ts).floor() as i32, (pos.y / ts).floor() as i32)
    }

    /// Grid tiles in the 3x3 block around `pos`
    pub fn tiles_around(&self, pos: Vec2) -> Vec<&Tile> {
        let (cx, cy) = self.cell_of(pos);
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|(dx, dy)| self.grid.get(&(cx + dx, cy + dy)))
            .collect()
    }

    /// Solid rectangles of the physics tiles around `pos`
    pub fn physics_rects_around(&self, pos: Vec2) -> Vec<Rect> {
        let ts = self.tile_size as f32;
        self.tiles_around(pos)
            .into_iter()
            .filter(|tile| tile.is_physics())
            .map(|tile| Rect::new(tile.pos.x * ts, tile.pos.y * ts, ts, ts))
            .collect()
    }

    /// Pull out every tile matching one of `markers` as `(type, variant)`.
    ///
    /// Off-grid matches come first in file order, then grid matches ordered by
    /// row then column. Matches are removed from the map unless `keep` is set.
    pub fn extract(&mut self, markers: &[(&str, u32)], keep: bool) -> Vec<Marker> {
        let matches = |tile: &Tile| {
            markers
                .iter()
                .any(|&(kind, variant)| tile.kind == kind && tile.variant == variant)
        };

        let mut found: Vec<Marker> = self
            .offgrid
            .iter()
            .filter(|tile| matches(tile))
            .map(|tile| Marker {
                kind: tile.kind.clone(),
                variant: tile.variant,
                pos: tile.pos,
            })
            .collect();
        if !keep {
            self.offgrid.retain(|tile| !matches(tile));
        }

        let mut cells: Vec<(i32, i32)> = self
            .grid
            .iter()
            .filter(|(_, tile)| matches(tile))
            .map(|(&cell, _)| cell)
            .collect();
        cells.sort_by_key(|&(x, y)| (y, x));

        let ts = self.tile_size as f32;
        for cell in cells {
            let tile = if keep {
                self.grid.get(&cell).cloned()
            } else {
                self.grid.remove(&cell)
            };
            if let Some(tile) = tile {
                found.push(Marker {
                    kind: tile.kind,
                    variant: tile.variant,
                    pos: tile.pos * ts,
                });
            }
        }
        found
    }

    /// Grid tiles whose cells intersect a world-space view rectangle
    pub fn visible_tiles(&self, view: Rect) -> Vec<&Tile> {
        let ts = self.tile_size as f32;
        let x0 = (view.left() / ts).floor() as i32;
        let x1 = (view.right() / ts).floor() as i32;
        let y0 = (view.top() / ts).floor() as i32;
        let y1 = (view.bottom() / ts).floor() as i32;

        let mut tiles = Vec::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                if let Some(tile) = self.grid.get(&(x, y)) {
                    tiles.push(tile);
                }
            }
        }
        tiles
    }
}
