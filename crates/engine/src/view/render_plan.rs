use super::occlusion::tile_occludes_character;
use super::projection::{lookup_tile, rotate_to_camera, Projection, ScreenRect};
use crate::world::{CameraOrientation, Character, Facing, GridCoordinate, LevelMap, TileCode};

/// One renderer-agnostic draw call. Instructions are emitted back to
/// front, so a consumer just blits them in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawInstruction {
    Tile {
        code: TileCode,
        rect: ScreenRect,
        translucent: bool,
    },
    Character {
        rect: ScreenRect,
        facing: Facing,
    },
}

/// A full frame's draw list for one camera orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    orientation: CameraOrientation,
    instructions: Vec<DrawInstruction>,
}

impl RenderPlan {
    pub fn orientation(&self) -> CameraOrientation {
        self.orientation
    }

    pub fn instructions(&self) -> &[DrawInstruction] {
        &self.instructions
    }

    pub fn tile_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|instruction| matches!(instruction, DrawInstruction::Tile { .. }))
            .count()
    }

    pub fn translucent_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|instruction| {
                matches!(
                    instruction,
                    DrawInstruction::Tile {
                        translucent: true,
                        ..
                    }
                )
            })
            .count()
    }
}

/// Builds the painter's-algorithm draw list: rotated-frame columns far to
/// near (`x`, then `y`), each cell bottom to top. Empty cells emit
/// nothing. The character is emitted right after its own cell, whether or
/// not that cell holds terrain, and tiles that would cover it are flagged
/// translucent.
pub fn build_render_plan(
    map: &LevelMap,
    character: &Character,
    orientation: CameraOrientation,
    projection: &Projection,
) -> RenderPlan {
    let size = map.size();
    let character_cell = rotate_to_camera(character.coord(), orientation, size);
    // A character standing on the topmost level has a body above the
    // stack; stretch the column scan so it still gets drawn.
    let z_span = (map.level_count() as i32).max(character_cell.z + 1);

    let mut instructions = Vec::new();
    for x in 0..size {
        for y in 0..size {
            for z in 0..z_span {
                let cell = GridCoordinate::new(x, y, z);
                let code = lookup_tile(map, cell, orientation);
                if code != crate::world::EMPTY_TILE {
                    instructions.push(DrawInstruction::Tile {
                        code,
                        rect: projection.tile_rect(cell),
                        translucent: tile_occludes_character(cell, character_cell, projection),
                    });
                }
                if cell == character_cell {
                    instructions.push(DrawInstruction::Character {
                        rect: projection.character_rect(cell),
                        facing: character.facing(),
                    });
                }
            }
        }
    }

    RenderPlan {
        orientation,
        instructions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{TerrainLevel, CAMERA_ORIENTATIONS, EMPTY_TILE};

    fn flat_map(size: usize, fill: TileCode) -> LevelMap {
        let level = TerrainLevel::new(size, size, vec![fill; size * size]).expect("level");
        LevelMap::new(vec![level]).expect("map")
    }

    fn character_at(x: i32, y: i32, z: i32) -> Character {
        Character::new(GridCoordinate::new(x, y, z), Facing::default())
    }

    fn tile_codes(plan: &RenderPlan) -> Vec<TileCode> {
        plan.instructions()
            .iter()
            .filter_map(|instruction| match instruction {
                DrawInstruction::Tile { code, .. } => Some(*code),
                DrawInstruction::Character { .. } => None,
            })
            .collect()
    }

    #[test]
    fn traversal_is_column_major_in_the_rotated_frame() {
        // Distinct codes laid out [y][x]; under North the rotated frame is
        // the North frame, so x-outer traversal reads columns.
        let level = TerrainLevel::new(2, 2, vec![10, 11, 12, 13]).expect("level");
        let map = LevelMap::new(vec![level]).expect("map");
        let plan = build_render_plan(
            &map,
            &character_at(0, 0, 5),
            CameraOrientation::North,
            &Projection::default(),
        );
        assert_eq!(tile_codes(&plan), vec![10, 12, 11, 13]);
    }

    #[test]
    fn empty_cells_emit_no_instructions() {
        let level = TerrainLevel::new(2, 2, vec![0, EMPTY_TILE, EMPTY_TILE, 3]).expect("level");
        let map = LevelMap::new(vec![level]).expect("map");
        let plan = build_render_plan(
            &map,
            &character_at(0, 0, 1),
            CameraOrientation::North,
            &Projection::default(),
        );
        assert_eq!(plan.tile_count(), 2);
    }

    #[test]
    fn character_appears_exactly_once() {
        let map = flat_map(3, 0);
        for orientation in CAMERA_ORIENTATIONS {
            let plan = build_render_plan(
                &map,
                &character_at(1, 2, 1),
                orientation,
                &Projection::default(),
            );
            let count = plan
                .instructions()
                .iter()
                .filter(|instruction| matches!(instruction, DrawInstruction::Character { .. }))
                .count();
            assert_eq!(count, 1);
        }
    }

    #[test]
    fn character_above_the_stack_is_still_drawn() {
        // Body level equals the level count, outside the terrain stack.
        let map = flat_map(2, 0);
        let plan = build_render_plan(
            &map,
            &character_at(1, 1, 1),
            CameraOrientation::North,
            &Projection::default(),
        );
        assert!(plan
            .instructions()
            .iter()
            .any(|instruction| matches!(instruction, DrawInstruction::Character { .. })));
    }

    #[test]
    fn character_is_drawn_after_the_tile_sharing_its_cell() {
        // Terrain and the character in the same cell: tile first.
        let map = flat_map(2, 0);
        let plan = build_render_plan(
            &map,
            &character_at(1, 1, 0),
            CameraOrientation::North,
            &Projection::default(),
        );
        let positions: Vec<usize> = plan
            .instructions()
            .iter()
            .enumerate()
            .filter_map(|(index, instruction)| match instruction {
                DrawInstruction::Character { .. } => Some(index),
                DrawInstruction::Tile { .. } => None,
            })
            .collect();
        assert_eq!(positions.len(), 1);
        // The character cell is the last one visited, so its tile is the
        // instruction right before.
        assert_eq!(positions[0], plan.instructions().len() - 1);
        assert!(matches!(
            plan.instructions()[positions[0] - 1],
            DrawInstruction::Tile { .. }
        ));
    }

    #[test]
    fn occluding_tiles_are_flagged_translucent() {
        // Ground plus a covering cell one level up on the camera-near
        // diagonal.
        let ground = TerrainLevel::new(3, 3, vec![0; 9]).expect("level");
        let mut upper_tiles = vec![EMPTY_TILE; 9];
        upper_tiles[2 * 3 + 2] = 4;
        let upper = TerrainLevel::new(3, 3, upper_tiles).expect("level");
        let map = LevelMap::new(vec![ground, upper]).expect("map");

        let plan = build_render_plan(
            &map,
            &character_at(1, 1, 0),
            CameraOrientation::North,
            &Projection::default(),
        );
        assert_eq!(plan.translucent_count(), 1);
        let translucent: Vec<TileCode> = plan
            .instructions()
            .iter()
            .filter_map(|instruction| match instruction {
                DrawInstruction::Tile {
                    code,
                    translucent: true,
                    ..
                } => Some(*code),
                _ => None,
            })
            .collect();
        assert_eq!(translucent, vec![4]);
    }

    #[test]
    fn rotation_preserves_the_tile_multiset() {
        let ground = TerrainLevel::new(3, 3, vec![0, 1, 2, 3, 4, 5, 6, 7, 8]).expect("level");
        let map = LevelMap::new(vec![ground]).expect("map");
        let character = character_at(1, 1, 1);
        let projection = Projection::default();

        let mut baseline = tile_codes(&build_render_plan(
            &map,
            &character,
            CameraOrientation::North,
            &projection,
        ));
        baseline.sort_unstable();
        for orientation in [
            CameraOrientation::West,
            CameraOrientation::South,
            CameraOrientation::East,
        ] {
            let mut codes = tile_codes(&build_render_plan(
                &map,
                &character,
                orientation,
                &projection,
            ));
            codes.sort_unstable();
            assert_eq!(codes, baseline);
        }
    }

    #[test]
    fn plan_records_its_orientation() {
        let map = flat_map(2, 0);
        let plan = build_render_plan(
            &map,
            &character_at(0, 0, 1),
            CameraOrientation::East,
            &Projection::default(),
        );
        assert_eq!(plan.orientation(), CameraOrientation::East);
    }
}
