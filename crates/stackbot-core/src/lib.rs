//! Core data model shared by every stackbot crate.
//!
//! - [`Snapshot`] - One polled board state, made of sparse [`Row`]s of [`Cell`]s
//! - [`Command`] - The vocabulary of commands the game server accepts
//!
//! The board dimensions are fixed constants ([`BOARD_WIDTH`], [`BOARD_HEIGHT`]).
//! They are never derived from the reported data: the server may send fewer rows
//! or shorter rows than the board has, and consumers treat missing cells as empty.

pub use self::{command::*, snapshot::*};

mod command;
mod snapshot;

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;

/// Number of lines on the board.
pub const BOARD_HEIGHT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown command: {name:?}")]
pub struct UnknownCommandError {
    pub name: String,
}
