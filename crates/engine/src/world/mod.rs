//! Map state, the character, and the movement rules that tie them
//! together. Everything here works in unrotated North-frame coordinates;
//! camera-relative concerns live in [`crate::view`].

mod character;
mod grid;
mod loader;
mod map;
mod movement;

pub use character::Character;
pub use grid::{
    CameraOrientation, Direction, Facing, GridCoordinate, CAMERA_ORIENTATIONS, DIRECTIONS,
};
pub use loader::{load_level_map, LoadedMap, MapLoadError, MapManifest, SpawnPoint};
pub use map::{LevelMap, MapError, StairsSet, TerrainLevel, TileCode, EMPTY_TILE};
pub use movement::{attempt_move, move_offset, MoveOutcome};
