use stackbot_core::{Command, Snapshot};

use crate::{ApiError, schema::StatusReport};

/// Operations a session driver performs against the game server.
///
/// Implementations do not retry. A failed call is returned as-is and the caller
/// decides whether to skip the tick or count the failure.
pub trait GameApi {
    fn status(&mut self) -> Result<StatusReport, ApiError>;

    /// Fetches the current board. An absent matrix is returned as an empty snapshot.
    fn matrix(&mut self) -> Result<Snapshot, ApiError>;

    /// Sends one command.
    ///
    /// Any 2xx response counts as delivered. A JSON body is passed back for
    /// logging only; an empty or non-JSON body yields `None`.
    fn send_command(&mut self, command: Command) -> Result<Option<serde_json::Value>, ApiError>;

    /// Best-effort connectivity diagnostics. Results are only logged.
    fn probe(&mut self);
}
