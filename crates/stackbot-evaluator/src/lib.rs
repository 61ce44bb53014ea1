//! Board evaluation and move planning for the stackbot client.
//!
//! This crate turns polled board snapshots into commands. It has two layers:
//!
//! 1. **Board Analyzer** ([`board_analysis`], [`active_piece`], [`snapshot_analysis`]) -
//!    Derives column heights, holes, bumpiness and near-complete lines from one snapshot,
//!    and estimates the falling piece by diffing it against the previous snapshot.
//!
//! 2. **Move Planner** ([`move_planner`]) - Chooses the next command. It prefers short
//!    queued sequences ([`action_sequence`]) that aim the piece and drop it, and falls
//!    back to single-command heuristics when the piece cannot be located.
//!
//! # Architecture
//!
//! ```text
//! MovePlanner::decide_move (one command per tick)
//!     ↓ uses
//! SnapshotAnalysis (current + previous snapshot)
//!     ↓ combines
//! BoardAnalysis (lazy board metrics) + ActivePiece (diff estimate)
//! ```
//!
//! # Example
//!
//! ```
//! use stackbot_core::Snapshot;
//! use stackbot_evaluator::move_planner::MovePlanner;
//!
//! let mut planner = MovePlanner::from_seed(42);
//! let snapshot = Snapshot::from_ascii(
//!     "
//!     ..........
//!     .#########
//!     ",
//! );
//! let command = planner.decide_move(Some(snapshot));
//! assert!(command.is_piece_move());
//! ```
//!
//! # Limitations
//!
//! - **Greedy**: there is no search over placements. The planner reacts to the
//!   current board only.
//! - **Heuristic piece tracking**: the active piece is whatever became occupied since
//!   the last poll. Line clears and piece locks between polls are misread as new cells.

pub mod action_sequence;
pub mod active_piece;
pub mod board_analysis;
pub mod move_planner;
pub mod snapshot_analysis;
