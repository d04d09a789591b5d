use iso_engine::Direction;
use thiserror::Error;

/// A single player intent, already decoupled from any input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    Move(Direction),
    RotateClockwise,
    RotateCounterClockwise,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ScriptError {
    #[error("unknown command {token:?} at position {position}")]
    UnknownToken { token: String, position: usize },
}

/// Parses a whitespace-separated demo script. Tokens are the four move
/// keys (`dl`, `dr`, `ur`, `ul`), camera turns (`cw`, `ccw`) and `quit`.
pub(crate) fn parse_script(script: &str) -> Result<Vec<Command>, ScriptError> {
    script
        .split_whitespace()
        .enumerate()
        .map(|(position, token)| match token {
            "dl" => Ok(Command::Move(Direction::DownLeft)),
            "dr" => Ok(Command::Move(Direction::DownRight)),
            "ur" => Ok(Command::Move(Direction::UpRight)),
            "ul" => Ok(Command::Move(Direction::UpLeft)),
            "cw" => Ok(Command::RotateClockwise),
            "ccw" => Ok(Command::RotateCounterClockwise),
            "quit" => Ok(Command::Quit),
            other => Err(ScriptError::UnknownToken {
                token: other.to_owned(),
                position,
            }),
        })
        .collect()
}

/// Throttles accepted moves: a move may start only after `cooldown_ms`
/// has passed since the last accepted one. Rejected moves never arm the
/// cooldown, and rotation is exempt entirely.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MovePacer {
    cooldown_ms: u64,
    last_move_at_ms: Option<u64>,
}

impl MovePacer {
    pub(crate) fn new(cooldown_ms: u64) -> Self {
        Self {
            cooldown_ms,
            last_move_at_ms: None,
        }
    }

    pub(crate) fn ready(&self, now_ms: u64) -> bool {
        match self.last_move_at_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.cooldown_ms,
            None => true,
        }
    }

    pub(crate) fn mark(&mut self, now_ms: u64) {
        self.last_move_at_ms = Some(now_ms);
    }
}
