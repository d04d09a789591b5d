use crate::world::{CameraOrientation, GridCoordinate, LevelMap, TileCode};

/// Axis-aligned screen-space rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Overlap test where touching edges already count as intersecting.
    pub fn intersects(&self, other: &ScreenRect) -> bool {
        self.x <= other.x + other.width
            && other.x <= self.x + self.width
            && self.y <= other.y + other.height
            && other.y <= self.y + self.height
    }
}

/// Isometric diamond projection parameters. Rotated-frame grid cells map
/// to screen rectangles; the projection itself never rotates anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    pub origin_x: i32,
    pub origin_y: i32,
    pub tile_half_width: i32,
    pub tile_quarter_height: i32,
    pub sprite_size: i32,
    pub character_offset_x: i32,
    pub character_offset_y: i32,
    pub occluded_tile_alpha: u8,
}

impl Default for Projection {
    fn default() -> Self {
        // Centers the (0, 0) diamond on a 1280-wide viewport with 64px
        // sprites.
        Self {
            origin_x: 608,
            origin_y: 0,
            tile_half_width: 32,
            tile_quarter_height: 16,
            sprite_size: 64,
            character_offset_x: 0,
            character_offset_y: -16,
            occluded_tile_alpha: 128,
        }
    }
}

impl Projection {
    /// Projects a rotated-frame cell to its on-screen sprite rectangle.
    /// Raising `z` by one shifts the sprite one cell up-left and up-right
    /// at once, i.e. straight up on screen.
    pub fn tile_rect(&self, coord: GridCoordinate) -> ScreenRect {
        let hx = coord.x - coord.z;
        let hy = coord.y - coord.z;
        ScreenRect::new(
            self.origin_x + self.tile_half_width * (hx - hy),
            self.origin_y + self.tile_quarter_height * (hx + hy),
            self.sprite_size,
            self.sprite_size,
        )
    }

    /// Like [`Self::tile_rect`] but nudged so the character sprite sits
    /// centered on the diamond instead of flat on it.
    pub fn character_rect(&self, coord: GridCoordinate) -> ScreenRect {
        let base = self.tile_rect(coord);
        ScreenRect::new(
            base.x + self.character_offset_x,
            base.y + self.character_offset_y,
            base.width,
            base.height,
        )
    }
}

/// Maps a North-frame cell into the rotated frame seen from
/// `orientation`. The map must be square with side `size`; `z` is
/// unaffected by camera rotation.
pub fn rotate_to_camera(
    coord: GridCoordinate,
    orientation: CameraOrientation,
    size: i32,
) -> GridCoordinate {
    let edge = size - 1;
    let (x, y) = match orientation {
        CameraOrientation::North => (coord.x, coord.y),
        CameraOrientation::West => (edge - coord.y, coord.x),
        CameraOrientation::South => (edge - coord.x, edge - coord.y),
        CameraOrientation::East => (coord.y, edge - coord.x),
    };
    GridCoordinate::new(x, y, coord.z)
}

/// Terrain lookup for a rotated-frame cell. Undoes the camera rotation
/// and reads the North-frame map, so the stored data never rotates.
pub fn lookup_tile(
    map: &LevelMap,
    rotated: GridCoordinate,
    orientation: CameraOrientation,
) -> TileCode {
    map.tile_at(rotate_to_camera(rotated, orientation.inverse(), map.size()))
}
