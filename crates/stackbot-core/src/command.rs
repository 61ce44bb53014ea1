use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownCommandError;

/// A command accepted by the game server's command endpoint.
///
/// The first six variants steer the falling piece. [`Command::Restart`] and
/// [`Command::Resume`] control the game session itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display("{}", self.as_str())]
pub enum Command {
    Left,
    Right,
    Down,
    Drop,
    RotateCw,
    RotateCcw,
    Restart,
    Resume,
}

impl Command {
    pub const ALL: [Self; 8] = [
        Self::Left,
        Self::Right,
        Self::Down,
        Self::Drop,
        Self::RotateCw,
        Self::RotateCcw,
        Self::Restart,
        Self::Resume,
    ];

    /// Returns the name used on the wire (`?command=...`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Down => "DOWN",
            Self::Drop => "DROP",
            Self::RotateCw => "ROTATE_CW",
            Self::RotateCcw => "ROTATE_CCW",
            Self::Restart => "RESTART",
            Self::Resume => "RESUME",
        }
    }

    /// Returns `true` for commands that manipulate the falling piece.
    #[must_use]
    pub fn is_piece_move(self) -> bool {
        !matches!(self, Self::Restart | Self::Resume)
    }
}

impl FromStr for Command {
    type Err = UnknownCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|command| command.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownCommandError {
                name: name.to_owned(),
            })
    }
}
