use iso_engine::{
    attempt_move, build_render_plan, CameraOrientation, Character, Direction, Facing, GridCoordinate,
    LevelMap, LoadedMap, MoveOutcome, Projection, RenderPlan, StairsSet,
};
use tracing::{debug, info};

use super::commands::{Command, MovePacer};

/// What a handled command did to the session, for logging and for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommandEffect {
    Moved(GridCoordinate),
    MoveBlocked,
    MoveOutOfBounds,
    Throttled,
    Rotated(CameraOrientation),
    Quit,
}

/// One running game: the loaded map, the character, and the camera.
/// Commands mutate it; [`GameSession::frame_plan`] reads it out as a draw
/// list.
pub(crate) struct GameSession {
    map: LevelMap,
    stairs: StairsSet,
    character: Character,
    orientation: CameraOrientation,
    projection: Projection,
    pacer: MovePacer,
}

impl GameSession {
    pub(crate) fn new(
        loaded: LoadedMap,
        orientation: CameraOrientation,
        cooldown_ms: u64,
    ) -> Self {
        Self {
            map: loaded.map,
            stairs: loaded.stairs,
            character: loaded.spawn.character(),
            orientation,
            projection: Projection::default(),
            pacer: MovePacer::new(cooldown_ms),
        }
    }

    pub(crate) fn character(&self) -> &Character {
        &self.character
    }

    pub(crate) fn orientation(&self) -> CameraOrientation {
        self.orientation
    }

    pub(crate) fn handle_command(&mut self, command: Command, now_ms: u64) -> CommandEffect {
        match command {
            Command::Move(direction) => {
                if !self.pacer.ready(now_ms) {
                    return CommandEffect::Throttled;
                }
                self.character.set_facing(facing_for(direction));
                match attempt_move(
                    &mut self.character,
                    direction,
                    self.orientation,
                    &self.map,
                    &self.stairs,
                ) {
                    MoveOutcome::Moved(to) => {
                        // Only accepted moves arm the cooldown.
                        self.pacer.mark(now_ms);
                        CommandEffect::Moved(to)
                    }
                    MoveOutcome::Blocked => CommandEffect::MoveBlocked,
                    MoveOutcome::OutOfBounds => CommandEffect::MoveOutOfBounds,
                }
            }
            Command::RotateClockwise => {
                self.orientation = self.orientation.clockwise();
                CommandEffect::Rotated(self.orientation)
            }
            Command::RotateCounterClockwise => {
                self.orientation = self.orientation.counter_clockwise();
                CommandEffect::Rotated(self.orientation)
            }
            Command::Quit => CommandEffect::Quit,
        }
    }

    pub(crate) fn frame_plan(&self) -> RenderPlan {
        build_render_plan(&self.map, &self.character, self.orientation, &self.projection)
    }

    /// Drives a parsed demo script to completion, one command per frame,
    /// advancing simulated time by the pacer cooldown between frames.
    pub(crate) fn run_script(&mut self, commands: &[Command], frame_ms: u64) {
        let mut now_ms = 0u64;
        for (frame, command) in commands.iter().enumerate() {
            let effect = self.handle_command(*command, now_ms);
            let plan = self.frame_plan();
            let coord = self.character.coord();
            info!(
                frame,
                command = ?command,
                effect = ?effect,
                x = coord.x,
                y = coord.y,
                z = coord.z,
                orientation = self.orientation.name(),
                "frame"
            );
            debug!(
                frame,
                tiles = plan.tile_count(),
                translucent = plan.translucent_count(),
                "frame_plan"
            );
            if effect == CommandEffect::Quit {
                break;
            }
            now_ms = now_ms.saturating_add(frame_ms);
        }
    }
}

/// A move key always faces the character the way it moves on screen.
fn facing_for(direction: Direction) -> Facing {
    match direction {
        Direction::DownLeft => Facing::SouthWest,
        Direction::DownRight => Facing::SouthEast,
        Direction::UpRight => Facing::NorthEast,
        Direction::UpLeft => Facing::NorthWest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::commands::parse_script;
    use iso_engine::{DrawInstruction, SpawnPoint, TerrainLevel};

    fn test_session(cooldown_ms: u64) -> GameSession {
        // 4x4 open ground with a raised corner reached by stairs at (2, 0).
        let ground = TerrainLevel::new(4, 4, vec![0; 16]).expect("level");
        let mut upper_tiles = vec![-1i16; 16];
        upper_tiles[0] = 1;
        upper_tiles[1] = 1;
        upper_tiles[2] = 2;
        let upper = TerrainLevel::new(4, 4, upper_tiles).expect("level");
        let loaded = LoadedMap {
            name: "test".to_owned(),
            map: LevelMap::new(vec![ground, upper]).expect("map"),
            stairs: StairsSet::new(vec![2]),
            spawn: SpawnPoint {
                x: 0,
                y: 2,
                z: 1,
                facing: Facing::default(),
            },
        };
        GameSession::new(loaded, CameraOrientation::North, cooldown_ms)
    }

    #[test]
    fn accepted_move_updates_the_character() {
        let mut session = test_session(0);
        let effect = session.handle_command(Command::Move(Direction::DownRight), 0);
        assert_eq!(effect, CommandEffect::Moved(GridCoordinate::new(1, 2, 1)));
        assert_eq!(session.character().coord(), GridCoordinate::new(1, 2, 1));
        assert_eq!(session.character().facing(), Facing::SouthEast);
    }

    #[test]
    fn second_move_within_the_cooldown_is_throttled() {
        let mut session = test_session(300);
        assert!(matches!(
            session.handle_command(Command::Move(Direction::DownRight), 0),
            CommandEffect::Moved(_)
        ));
        assert_eq!(
            session.handle_command(Command::Move(Direction::DownRight), 100),
            CommandEffect::Throttled
        );
        assert!(matches!(
            session.handle_command(Command::Move(Direction::DownRight), 300),
            CommandEffect::Moved(_)
        ));
    }

    #[test]
    fn rejected_moves_do_not_arm_the_cooldown() {
        let mut session = test_session(300);
        // Walking off the west edge is out of bounds and must not delay
        // the next valid move.
        assert_eq!(
            session.handle_command(Command::Move(Direction::UpLeft), 0),
            CommandEffect::MoveOutOfBounds
        );
        assert!(matches!(
            session.handle_command(Command::Move(Direction::DownRight), 1),
            CommandEffect::Moved(_)
        ));
    }

    #[test]
    fn rotation_is_never_throttled() {
        let mut session = test_session(300);
        assert!(matches!(
            session.handle_command(Command::Move(Direction::DownRight), 0),
            CommandEffect::Moved(_)
        ));
        assert_eq!(
            session.handle_command(Command::RotateClockwise, 1),
            CommandEffect::Rotated(CameraOrientation::West)
        );
        assert_eq!(
            session.handle_command(Command::RotateCounterClockwise, 2),
            CommandEffect::Rotated(CameraOrientation::North)
        );
    }

    #[test]
    fn rotation_changes_what_a_move_does_in_the_grid() {
        let mut session = test_session(0);
        session.handle_command(Command::RotateClockwise, 0);
        let effect = session.handle_command(Command::Move(Direction::DownRight), 1);
        // Under the West view a down-right keypress walks toward -y.
        assert_eq!(effect, CommandEffect::Moved(GridCoordinate::new(0, 1, 1)));
    }

    #[test]
    fn frame_plan_always_contains_the_character() {
        let session = test_session(0);
        let plan = session.frame_plan();
        assert!(plan
            .instructions()
            .iter()
            .any(|instruction| matches!(instruction, DrawInstruction::Character { .. })));
        assert!(plan.tile_count() > 0);
    }

    #[test]
    fn script_runs_to_the_quit_command() {
        let mut session = test_session(100);
        let commands = parse_script("dr dr cw quit dr").expect("script");
        session.run_script(&commands, 100);
        // The trailing move never runs.
        assert_eq!(session.character().coord(), GridCoordinate::new(2, 2, 1));
        assert_eq!(session.orientation(), CameraOrientation::West);
    }

    #[test]
    fn script_walks_up_the_stairs() {
        let mut session = test_session(100);
        // From (0, 2, 1): around the solid platform cells, onto the
        // stairs at (2, 0) climbing to z 2 on the last step.
        let commands = parse_script("ur dr dr ur").expect("script");
        session.run_script(&commands, 100);
        assert_eq!(session.character().coord(), GridCoordinate::new(2, 0, 2));
    }
}
