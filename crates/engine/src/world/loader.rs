use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use super::character::Character;
use super::grid::{Facing, GridCoordinate};
use super::map::{LevelMap, MapError, StairsSet, TerrainLevel, TileCode, EMPTY_TILE};

/// Where the character starts on a freshly loaded map. `z` is the body
/// level, so a spawn standing on the ground level uses `z = 1`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SpawnPoint {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    #[serde(default)]
    pub facing: Facing,
}

impl SpawnPoint {
    pub fn coord(&self) -> GridCoordinate {
        GridCoordinate::new(self.x, self.y, self.z)
    }

    pub fn character(&self) -> Character {
        Character::new(self.coord(), self.facing)
    }
}

/// `manifest.json` sitting next to the per-level CSV files.
#[derive(Debug, Clone, Deserialize)]
pub struct MapManifest {
    pub levels: u32,
    #[serde(default)]
    pub stairs_codes: StairsSet,
    pub spawn: SpawnPoint,
}

#[derive(Debug, Error)]
pub enum MapLoadError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse manifest {path}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("manifest declares zero levels")]
    NoLevels,
    #[error("bad tile code {value:?} at {path} line {line}")]
    BadTileCode {
        path: PathBuf,
        line: usize,
        value: String,
    },
    #[error("{path} line {line} has {actual} columns, expected {expected}")]
    RaggedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        actual: usize,
    },
    #[error("{path} contains no rows")]
    EmptyLevel { path: PathBuf },
    #[error("stairs code {value} in the manifest is not a terrain code")]
    BadStairsCode { value: TileCode },
    #[error(transparent)]
    Shape(#[from] MapError),
    #[error("spawn ({x}, {y}, {z}) is outside the map")]
    SpawnOutOfBounds { x: i32, y: i32, z: i32 },
}

/// A fully loaded map plus everything the manifest carries alongside it.
#[derive(Debug, Clone)]
pub struct LoadedMap {
    pub name: String,
    pub map: LevelMap,
    pub stairs: StairsSet,
    pub spawn: SpawnPoint,
}

/// Loads `manifest.json` from `dir`, then one `{name}_{z}.csv` file per
/// declared level, bottom up. CSV cells are plain integer tile codes,
/// `-1` meaning empty.
pub fn load_level_map(dir: &Path, name: &str) -> Result<LoadedMap, MapLoadError> {
    let manifest_path = dir.join("manifest.json");
    let manifest_text = fs::read_to_string(&manifest_path).map_err(|source| MapLoadError::Io {
        path: manifest_path.clone(),
        source,
    })?;
    let manifest: MapManifest =
        serde_json::from_str(&manifest_text).map_err(|source| MapLoadError::Manifest {
            path: manifest_path,
            source,
        })?;
    if manifest.levels == 0 {
        return Err(MapLoadError::NoLevels);
    }
    // A stairs set containing the empty sentinel would turn every empty
    // cell into a ramp.
    if let Some(&value) = manifest
        .stairs_codes
        .codes()
        .iter()
        .find(|&&code| code <= EMPTY_TILE)
    {
        return Err(MapLoadError::BadStairsCode { value });
    }

    let mut levels = Vec::with_capacity(manifest.levels as usize);
    for z in 0..manifest.levels {
        let path = dir.join(format!("{name}_{z}.csv"));
        levels.push(load_level_csv(&path)?);
    }
    let map = LevelMap::new(levels)?;

    let spawn = manifest.spawn;
    if !map.in_bounds_xy(spawn.x, spawn.y) || spawn.z < 0 || spawn.z > map.level_count() as i32 {
        return Err(MapLoadError::SpawnOutOfBounds {
            x: spawn.x,
            y: spawn.y,
            z: spawn.z,
        });
    }

    info!(
        map = name,
        size = map.size(),
        levels = map.level_count(),
        "map_loaded"
    );

    Ok(LoadedMap {
        name: name.to_owned(),
        map,
        stairs: manifest.stairs_codes,
        spawn,
    })
}

fn load_level_csv(path: &Path) -> Result<TerrainLevel, MapLoadError> {
    let text = fs::read_to_string(path).map_err(|source| MapLoadError::Io {
        path: path.to_owned(),
        source,
    })?;

    let mut tiles: Vec<TileCode> = Vec::new();
    let mut width = 0usize;
    let mut rows = 0usize;
    for (index, row) in text.lines().enumerate() {
        if row.trim().is_empty() {
            continue;
        }
        let line = index + 1;
        let mut columns = 0usize;
        for cell in row.split(',') {
            let cell = cell.trim();
            let code: TileCode = cell.parse().map_err(|_| MapLoadError::BadTileCode {
                path: path.to_owned(),
                line,
                value: cell.to_owned(),
            })?;
            if code < EMPTY_TILE {
                return Err(MapLoadError::BadTileCode {
                    path: path.to_owned(),
                    line,
                    value: cell.to_owned(),
                });
            }
            tiles.push(code);
            columns += 1;
        }
        if rows == 0 {
            width = columns;
        } else if columns != width {
            return Err(MapLoadError::RaggedRow {
                path: path.to_owned(),
                line,
                expected: width,
                actual: columns,
            });
        }
        rows += 1;
    }
    if rows == 0 {
        return Err(MapLoadError::EmptyLevel {
            path: path.to_owned(),
        });
    }

    Ok(TerrainLevel::new(width, rows, tiles)?)
}
