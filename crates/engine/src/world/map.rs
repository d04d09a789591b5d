use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::grid::GridCoordinate;

pub type TileCode = i16;

/// Sentinel terrain code for "no tile here".
pub const EMPTY_TILE: TileCode = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("tile count mismatch: expected {expected}, got {actual}")]
    TileCountMismatch { expected: usize, actual: usize },
    #[error("map must be square: width {width} != length {length}")]
    NotSquare { width: usize, length: usize },
    #[error(
        "level {level} is {width}x{length}, expected {expected_width}x{expected_length} like level 0"
    )]
    LevelShapeMismatch {
        level: usize,
        width: usize,
        length: usize,
        expected_width: usize,
        expected_length: usize,
    },
    #[error("a map needs at least one terrain level")]
    NoLevels,
}

/// One horizontal slice of the map, indexed `[y][x]` in the North frame.
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainLevel {
    width: usize,
    length: usize,
    tiles: Vec<TileCode>,
}

impl TerrainLevel {
    pub fn new(width: usize, length: usize, tiles: Vec<TileCode>) -> Result<Self, MapError> {
        let expected = width * length;
        let actual = tiles.len();
        if expected != actual {
            return Err(MapError::TileCountMismatch { expected, actual });
        }
        Ok(Self {
            width,
            length,
            tiles,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn tile_at(&self, x: i32, y: i32) -> TileCode {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.length {
            return EMPTY_TILE;
        }
        self.tiles[y as usize * self.width + x as usize]
    }
}

/// The full map: an ordered stack of levels, index = z. Validated square
/// (width == length, a documented engine limitation) with identical
/// shapes on every level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelMap {
    levels: Vec<TerrainLevel>,
    width: usize,
    length: usize,
}

impl LevelMap {
    pub fn new(levels: Vec<TerrainLevel>) -> Result<Self, MapError> {
        let Some(first) = levels.first() else {
            return Err(MapError::NoLevels);
        };
        let (width, length) = (first.width(), first.length());
        if width != length {
            return Err(MapError::NotSquare { width, length });
        }
        for (level, terrain) in levels.iter().enumerate().skip(1) {
            if terrain.width() != width || terrain.length() != length {
                return Err(MapError::LevelShapeMismatch {
                    level,
                    width: terrain.width(),
                    length: terrain.length(),
                    expected_width: width,
                    expected_length: length,
                });
            }
        }
        Ok(Self {
            levels,
            width,
            length,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Map side in cells; valid because the map is square.
    pub fn size(&self) -> i32 {
        self.width as i32
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn in_bounds_xy(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.length
    }

    /// North-frame terrain lookup. Anything outside the map, including a
    /// `z` above the stack or below ground, reads as empty.
    pub fn tile_at(&self, coord: GridCoordinate) -> TileCode {
        if coord.z < 0 {
            return EMPTY_TILE;
        }
        match self.levels.get(coord.z as usize) {
            Some(level) => level.tile_at(coord.x, coord.y),
            None => EMPTY_TILE,
        }
    }
}

/// Terrain codes that act as ramps: stepping onto one changes elevation
/// by exactly one level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StairsSet {
    codes: Vec<TileCode>,
}

impl StairsSet {
    pub fn new(mut codes: Vec<TileCode>) -> Self {
        codes.sort_unstable();
        codes.dedup();
        Self { codes }
    }

    pub fn contains(&self, code: TileCode) -> bool {
        self.codes.contains(&code)
    }

    pub fn codes(&self) -> &[TileCode] {
        &self.codes
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
