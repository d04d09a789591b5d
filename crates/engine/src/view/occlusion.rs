use super::projection::Projection;
use crate::world::GridCoordinate;

/// Whether a tile drawn after the character would hide it and should be
/// rendered translucent. Both coordinates are rotated-frame; a tile only
/// occludes from strictly above, from the camera-near side on both axes,
/// and only when the sprites actually overlap on screen.
pub fn tile_occludes_character(
    tile: GridCoordinate,
    character: GridCoordinate,
    projection: &Projection,
) -> bool {
    tile.z > character.z
        && tile.x >= character.x
        && tile.y >= character.y
        && projection
            .tile_rect(tile)
            .intersects(&projection.character_rect(character))
}
