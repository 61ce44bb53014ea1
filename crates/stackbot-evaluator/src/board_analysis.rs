use std::cell::OnceCell;

use stackbot_core::{BOARD_HEIGHT, BOARD_WIDTH, Snapshot};

/// Minimum number of occupied cells for a row to count as a potential line.
///
/// 70% of a 10-column board.
pub const POTENTIAL_LINE_MIN_FILLED: usize = 7;

/// A row that is close to being complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PotentialLine {
    line: usize,
    filled_cells: usize,
    target_column: usize,
}

impl PotentialLine {
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn filled_cells(&self) -> usize {
        self.filled_cells
    }

    /// First empty column of the row, or the board midpoint if there is none.
    #[must_use]
    pub fn target_column(&self) -> usize {
        self.target_column
    }
}

#[derive(Debug)]
pub struct BoardAnalysis {
    snapshot: Snapshot,
    column_heights: OnceCell<[usize; BOARD_WIDTH]>,
    column_tops: OnceCell<[usize; BOARD_WIDTH]>,
    num_holes: OnceCell<u32>,
    surface_bumpiness: OnceCell<u32>,
    potential_lines: OnceCell<Vec<PotentialLine>>,
}

impl BoardAnalysis {
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let snapshot = snapshot.clone();
        Self {
            snapshot,
            column_heights: OnceCell::new(),
            column_tops: OnceCell::new(),
            num_holes: OnceCell::new(),
            surface_bumpiness: OnceCell::new(),
            potential_lines: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Height of each column measured from the floor.
    ///
    /// Rows are scanned top-down and the first occupied cell decides the height.
    #[must_use]
    pub fn column_heights(&self) -> &[usize; BOARD_WIDTH] {
        self.column_heights.get_or_init(|| {
            let mut column_heights = [0; BOARD_WIDTH];
            for (x, h) in column_heights.iter_mut().enumerate() {
                let top_row = self
                    .snapshot
                    .rows_top_down()
                    .find(|row| row.is_cell_occupied(x));
                let Some(top_row) = top_row else {
                    continue;
                };
                *h = BOARD_HEIGHT.saturating_sub(top_row.line());
            }
            column_heights
        })
    }

    /// Smallest line index holding an occupied cell, per column.
    ///
    /// Empty columns report [`BOARD_HEIGHT`].
    #[must_use]
    pub fn column_tops(&self) -> &[usize; BOARD_WIDTH] {
        self.column_tops.get_or_init(|| {
            let mut column_tops = [BOARD_HEIGHT; BOARD_WIDTH];
            for row in self.snapshot.rows() {
                for (x, cell) in row.playable_cells().iter().enumerate() {
                    if cell.is_occupied() {
                        column_tops[x] = usize::min(column_tops[x], row.line());
                    }
                }
            }
            column_tops
        })
    }

    /// Number of reported empty cells lying below their column's top.
    #[must_use]
    pub fn num_holes(&self) -> u32 {
        *self.num_holes.get_or_init(|| {
            let column_tops = self.column_tops();
            let mut holes = 0;
            for row in self.snapshot.rows() {
                for (x, cell) in row.playable_cells().iter().enumerate() {
                    if cell.is_empty() && row.line() > column_tops[x] {
                        holes += 1;
                    }
                }
            }
            holes
        })
    }

    #[must_use]
    pub fn surface_bumpiness(&self) -> u32 {
        *self.surface_bumpiness.get_or_init(|| {
            self.column_heights()
                .windows(2)
                .map(|w| {
                    let diff = w[0].abs_diff(w[1]);
                    u32::try_from(diff).unwrap_or(u32::MAX)
                })
                .sum()
        })
    }

    /// Index of the lowest column. Ties resolve to the leftmost column.
    #[must_use]
    pub fn min_height_column(&self) -> usize {
        let heights = self.column_heights();
        let min = heights.iter().min();
        heights.iter().position(|h| Some(h) == min).unwrap_or(0)
    }

    /// Index of the tallest column. Ties resolve to the leftmost column.
    #[must_use]
    pub fn max_height_column(&self) -> usize {
        let heights = self.column_heights();
        let max = heights.iter().max();
        heights.iter().position(|h| Some(h) == max).unwrap_or(0)
    }

    /// Rows with at least [`POTENTIAL_LINE_MIN_FILLED`] occupied cells, in reported order.
    #[must_use]
    pub fn potential_lines(&self) -> &[PotentialLine] {
        self.potential_lines.get_or_init(|| {
            self.snapshot
                .rows()
                .iter()
                .filter_map(|row| {
                    let filled_cells = row.occupied_count();
                    (filled_cells >= POTENTIAL_LINE_MIN_FILLED).then(|| PotentialLine {
                        line: row.line(),
                        filled_cells,
                        target_column: row.first_gap().unwrap_or(BOARD_WIDTH / 2),
                    })
                })
                .collect()
        })
    }

    /// The fullest potential line.
    ///
    /// When several rows share the highest fill count the last one in reported
    /// order wins.
    #[must_use]
    pub fn best_potential_line(&self) -> Option<&PotentialLine> {
        self.potential_lines()
            .iter()
            .max_by_key(|line| line.filled_cells)
    }
}
