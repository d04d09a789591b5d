use super::grid::{Facing, GridCoordinate};

/// The controlled character. Its coordinate is canonical North-frame
/// state; only the movement rule's acceptance path rewrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Character {
    coord: GridCoordinate,
    facing: Facing,
}

impl Character {
    pub fn new(coord: GridCoordinate, facing: Facing) -> Self {
        Self { coord, facing }
    }

    pub fn coord(&self) -> GridCoordinate {
        self.coord
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    pub(crate) fn set_coord(&mut self, coord: GridCoordinate) {
        self.coord = coord;
    }
}
