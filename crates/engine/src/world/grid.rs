use serde::{Deserialize, Serialize};
use tracing::warn;

/// Logical cell position. `x` and `y` are always stored in the unrotated
/// (North) frame; `z` indexes stacked terrain levels, 0 being ground.
/// A character's `z` is the level its body occupies; it stands on the
/// terrain one level below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridCoordinate {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CameraOrientation {
    #[default]
    North,
    West,
    South,
    East,
}

pub const CAMERA_ORIENTATIONS: [CameraOrientation; 4] = [
    CameraOrientation::North,
    CameraOrientation::West,
    CameraOrientation::South,
    CameraOrientation::East,
];

impl CameraOrientation {
    pub(crate) const fn index(self) -> usize {
        match self {
            CameraOrientation::North => 0,
            CameraOrientation::West => 1,
            CameraOrientation::South => 2,
            CameraOrientation::East => 3,
        }
    }

    pub const fn clockwise(self) -> Self {
        match self {
            CameraOrientation::North => CameraOrientation::West,
            CameraOrientation::West => CameraOrientation::South,
            CameraOrientation::South => CameraOrientation::East,
            CameraOrientation::East => CameraOrientation::North,
        }
    }

    pub const fn counter_clockwise(self) -> Self {
        match self {
            CameraOrientation::North => CameraOrientation::East,
            CameraOrientation::West => CameraOrientation::North,
            CameraOrientation::South => CameraOrientation::West,
            CameraOrientation::East => CameraOrientation::South,
        }
    }

    /// The orientation whose frame rotation undoes this one's.
    pub const fn inverse(self) -> Self {
        match self {
            CameraOrientation::North => CameraOrientation::North,
            CameraOrientation::West => CameraOrientation::East,
            CameraOrientation::South => CameraOrientation::South,
            CameraOrientation::East => CameraOrientation::West,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CameraOrientation::North => "north",
            CameraOrientation::West => "west",
            CameraOrientation::South => "south",
            CameraOrientation::East => "east",
        }
    }

    /// Unrecognized names degrade to North with a diagnostic rather than
    /// failing; this is the only place a non-enum orientation can enter.
    pub fn from_name(name: &str) -> Self {
        match name {
            "north" => CameraOrientation::North,
            "west" => CameraOrientation::West,
            "south" => CameraOrientation::South,
            "east" => CameraOrientation::East,
            other => {
                warn!(orientation = other, "unknown camera orientation, falling back to north");
                CameraOrientation::North
            }
        }
    }
}

/// Screen-relative move directions: the same key always moves the
/// character the same way on screen, whatever the camera orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    DownLeft,
    DownRight,
    UpRight,
    UpLeft,
}

pub const DIRECTIONS: [Direction; 4] = [
    Direction::DownLeft,
    Direction::DownRight,
    Direction::UpRight,
    Direction::UpLeft,
];

impl Direction {
    pub(crate) const fn index(self) -> usize {
        match self {
            Direction::DownLeft => 0,
            Direction::DownRight => 1,
            Direction::UpRight => 2,
            Direction::UpLeft => 3,
        }
    }
}

/// Character facing, used only to select animation sprites. Movement
/// math never reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    #[default]
    SouthWest,
    SouthEast,
    NorthEast,
    NorthWest,
}
