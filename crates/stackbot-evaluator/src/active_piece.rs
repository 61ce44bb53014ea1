//! Estimation of the falling piece from two consecutive snapshots.
//!
//! The server does not report which cells belong to the falling piece. The
//! estimate is every cell that is occupied now but was empty in the previous
//! snapshot. No shape or rotation is tracked.
//!
//! The estimate misfires when a line clear or a piece lock happens between two
//! polls: a cleared row shifts every cell above it, and those cells look new.
//! That error is accepted and not corrected here.

use stackbot_core::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPosition {
    pub line: usize,
    pub column: usize,
}

/// Cells that became occupied since the previous snapshot.
///
/// Always holds at least one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    cells: Vec<CellPosition>,
}

impl ActivePiece {
    /// Diffs `current` against `previous`.
    ///
    /// Returns `None` when there is no previous snapshot or when nothing became
    /// occupied. Only lines present in both snapshots are compared, cell by cell
    /// up to the shorter of the two rows.
    #[must_use]
    pub fn estimate(current: &Snapshot, previous: Option<&Snapshot>) -> Option<Self> {
        let previous = previous?;

        let mut cells = vec![];
        for row in current.rows() {
            let Some(previous_row) = previous.row(row.line()) else {
                continue;
            };
            let now = row.playable_cells();
            let before = previous_row.playable_cells();
            for (column, (now, before)) in now.iter().zip(before).enumerate() {
                if now.is_occupied() && before.is_empty() {
                    cells.push(CellPosition {
                        line: row.line(),
                        column,
                    });
                }
            }
        }

        (!cells.is_empty()).then_some(Self { cells })
    }

    #[must_use]
    pub fn cells(&self) -> &[CellPosition] {
        &self.cells
    }

    /// The first cell found while diffing (in reported row order).
    #[must_use]
    pub fn first_cell(&self) -> CellPosition {
        self.cells[0]
    }

    /// Mean column of the estimated cells.
    #[must_use]
    pub fn centroid_column(&self) -> f32 {
        mean(self.cells.iter().map(|cell| cell.column))
    }

    /// Mean line of the estimated cells.
    #[must_use]
    pub fn centroid_line(&self) -> f32 {
        mean(self.cells.iter().map(|cell| cell.line))
    }
}

#[expect(clippy::cast_precision_loss)]
fn mean(values: impl ExactSizeIterator<Item = usize>) -> f32 {
    let len = values.len();
    if len == 0 {
        return 0.0;
    }
    values.sum::<usize>() as f32 / len as f32
}
