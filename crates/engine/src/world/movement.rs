use super::character::Character;
use super::grid::{CameraOrientation, Direction, GridCoordinate};
use super::map::{LevelMap, StairsSet, EMPTY_TILE};

/// North-frame (dx, dy) per `[direction][orientation]`. The screen
/// meaning of a key is fixed; the grid delta rotates with the camera, so
/// one clockwise camera step equals one step through the direction cycle.
const MOVE_OFFSETS: [[(i32, i32); 4]; 4] = [
    // DownLeft
    [(0, 1), (1, 0), (0, -1), (-1, 0)],
    // DownRight
    [(1, 0), (0, -1), (-1, 0), (0, 1)],
    // UpRight
    [(0, -1), (-1, 0), (0, 1), (1, 0)],
    // UpLeft
    [(-1, 0), (0, 1), (1, 0), (0, -1)],
];

pub fn move_offset(direction: Direction, orientation: CameraOrientation) -> (i32, i32) {
    MOVE_OFFSETS[direction.index()][orientation.index()]
}

/// Result of a movement command. Rejections are ordinary values, not
/// errors; the character is untouched unless the move was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved(GridCoordinate),
    OutOfBounds,
    Blocked,
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Moved(_))
    }
}

/// Resolves one discrete movement command. The character's `z` is its
/// body level; the tile it stands on sits at `z - 1`.
///
/// Stepping onto a ramp code climbs one level. Stepping into empty space
/// is allowed when there is ground (or a ramp top) one level below, or
/// when leaving a ramp downward; otherwise the move would walk off into
/// open air and is rejected.
pub fn attempt_move(
    character: &mut Character,
    direction: Direction,
    orientation: CameraOrientation,
    map: &LevelMap,
    stairs: &StairsSet,
) -> MoveOutcome {
    let (dx, dy) = move_offset(direction, orientation);
    let current = character.coord();
    let new_x = current.x + dx;
    let new_y = current.y + dy;
    if !map.in_bounds_xy(new_x, new_y) {
        return MoveOutcome::OutOfBounds;
    }

    let body = GridCoordinate::new(new_x, new_y, current.z);
    let body_code = map.tile_at(body);
    let accepted_z = if body_code != EMPTY_TILE {
        if stairs.contains(body_code) {
            Some(current.z + 1)
        } else {
            None
        }
    } else {
        let below = map.tile_at(GridCoordinate::new(new_x, new_y, current.z - 1));
        if below != EMPTY_TILE {
            Some(current.z)
        } else if stairs.contains(map.tile_at(GridCoordinate::new(
            current.x,
            current.y,
            current.z - 1,
        ))) {
            Some(current.z - 1)
        } else {
            None
        }
    };

    match accepted_z {
        Some(z) => {
            let to = GridCoordinate::new(new_x, new_y, z);
            character.set_coord(to);
            MoveOutcome::Moved(to)
        }
        None => MoveOutcome::Blocked,
    }
}
