//! Analysis of one polling tick.
//!
//! [`SnapshotAnalysis`] bundles the two results the planner works from:
//!
//! 1. **Board metrics** - heights, holes, bumpiness and potential lines via [`BoardAnalysis`]
//! 2. **Active piece** - the diff estimate via [`ActivePiece`], if one could be made
//!
//! ```
//! use stackbot_core::Snapshot;
//! use stackbot_evaluator::snapshot_analysis::SnapshotAnalysis;
//!
//! let snapshot = Snapshot::from_ascii("#######...");
//! let analysis = SnapshotAnalysis::from_snapshots(&snapshot, None);
//! assert_eq!(analysis.board_analysis().surface_bumpiness(), 1);
//! assert!(analysis.active_piece().is_none());
//! ```

use stackbot_core::Snapshot;

use crate::{active_piece::ActivePiece, board_analysis::BoardAnalysis};

#[derive(Debug)]
pub struct SnapshotAnalysis {
    board_analysis: BoardAnalysis,
    active_piece: Option<ActivePiece>,
}

impl SnapshotAnalysis {
    #[must_use]
    pub fn from_snapshots(current: &Snapshot, previous: Option<&Snapshot>) -> Self {
        Self {
            board_analysis: BoardAnalysis::from_snapshot(current),
            active_piece: ActivePiece::estimate(current, previous),
        }
    }

    #[must_use]
    pub fn board_analysis(&self) -> &BoardAnalysis {
        &self.board_analysis
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<&ActivePiece> {
        self.active_piece.as_ref()
    }
}
