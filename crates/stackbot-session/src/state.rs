#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Starting,
    Playing,
    Paused,
    GameOver,
    Stopped,
}

/// Server-reported game state, as far as the driver cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
}

impl GameStatus {
    /// Classifies a raw `state` field. Unknown or missing values count as playing.
    #[must_use]
    pub fn classify(state: Option<&str>) -> Self {
        match state {
            Some("PAUSED") => Self::Paused,
            Some("GAME_OVER") => Self::GameOver,
            _ => Self::Playing,
        }
    }

    #[must_use]
    pub fn session_state(self) -> SessionState {
        match self {
            Self::Playing => SessionState::Playing,
            Self::Paused => SessionState::Paused,
            Self::GameOver => SessionState::GameOver,
        }
    }
}
