use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::{BOARD_HEIGHT, BOARD_WIDTH};

/// A single board cell as reported by the server.
///
/// `0` is empty and any positive value is occupied. The value otherwise
/// identifies the piece kind, which the client does not rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell(pub i64);

impl Cell {
    pub const EMPTY: Self = Cell(0);

    #[must_use]
    pub fn is_occupied(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// One horizontal line of the board.
///
/// `line` counts from the top of the board (0-based). `cells` is usually
/// [`BOARD_WIDTH`] long but may be shorter or missing entirely in a response;
/// columns without a cell are treated as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    line: usize,
    #[serde(default)]
    cells: Vec<Cell>,
}

impl Row {
    #[must_use]
    pub fn new(line: usize, cells: Vec<Cell>) -> Self {
        Self { line, cells }
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the cells that fall inside the board's columns.
    #[must_use]
    pub fn playable_cells(&self) -> &[Cell] {
        &self.cells[..usize::min(self.cells.len(), BOARD_WIDTH)]
    }

    #[must_use]
    pub fn cell(&self, column: usize) -> Option<Cell> {
        self.playable_cells().get(column).copied()
    }

    #[must_use]
    pub fn is_cell_occupied(&self, column: usize) -> bool {
        self.cell(column).is_some_and(Cell::is_occupied)
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.playable_cells()
            .iter()
            .filter(|cell| cell.is_occupied())
            .count()
    }

    /// Returns the first column that is empty or not reported at all.
    #[must_use]
    pub fn first_gap(&self) -> Option<usize> {
        (0..BOARD_WIDTH).find(|&column| self.cell(column).is_none_or(Cell::is_empty))
    }
}

/// The board at one polling instant.
///
/// Rows are kept in the order the server reported them. They are not required
/// to be sorted or to cover every line. A snapshot is never modified after it
/// has been built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    rows: Vec<Row>,
}

impl Snapshot {
    pub const EMPTY: Self = Self { rows: Vec::new() };

    #[must_use]
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the first row reported for `line`.
    #[must_use]
    pub fn row(&self, line: usize) -> Option<&Row> {
        self.rows.iter().find(|row| row.line == line)
    }

    /// Iterates rows in ascending line order (top of the board first).
    ///
    /// Rows sharing a line keep their reported order.
    pub fn rows_top_down(&self) -> impl Iterator<Item = &Row> + '_ {
        let mut rows: Vec<&Row> = self.rows.iter().collect();
        rows.sort_by_key(|row| row.line);
        rows.into_iter()
    }

    /// Renders one `Line NN: [..]` entry per reported row.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let cells = row
                .cells
                .iter()
                .map(|cell| cell.0.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(&mut out, "Line {:2}: [{cells}]", row.line).unwrap();
        }
        out
    }

    /// Builds a snapshot from ASCII art, aligned to the bottom of the board.
    ///
    /// `#` is an occupied cell and `.` is empty. Blank lines are ignored and
    /// the last art line becomes line `BOARD_HEIGHT - 1`. Only the lines
    /// present in the art are included, so small boards describe just the
    /// bottom of the stack.
    ///
    /// # Panics
    ///
    /// Panics if a line does not have exactly [`BOARD_WIDTH`] cells or if the
    /// art has more than [`BOARD_HEIGHT`] lines.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= BOARD_HEIGHT,
            "At most {BOARD_HEIGHT} lines are allowed, got {}",
            lines.len()
        );

        let first_line = BOARD_HEIGHT - lines.len();
        let rows = lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let cells: Vec<Cell> = line
                    .chars()
                    .filter(|c| *c == '#' || *c == '.')
                    .map(|c| if c == '#' { Cell(1) } else { Cell::EMPTY })
                    .collect();
                assert_eq!(
                    cells.len(),
                    BOARD_WIDTH,
                    "Each row must have exactly {} cells, got {} at row {}",
                    BOARD_WIDTH,
                    cells.len(),
                    i
                );
                Row::new(first_line + i, cells)
            })
            .collect();
        Self { rows }
    }
}

impl From<Vec<Row>> for Snapshot {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[i64]) -> Vec<Cell> {
        values.iter().copied().map(Cell).collect()
    }

    #[test]
    fn test_cell_occupancy() {
        assert!(Cell(3).is_occupied());
        assert!(!Cell(0).is_occupied());
        assert!(Cell(0).is_empty());
        assert!(!Cell(-1).is_occupied());
        assert!(!Cell(-1).is_empty());
    }

    #[test]
    fn test_row_short_cells_are_gaps() {
        let row = Row::new(19, cells(&[1, 1, 1]));
        assert_eq!(row.occupied_count(), 3);
        assert_eq!(row.first_gap(), Some(3));
        assert!(!row.is_cell_occupied(5));
        assert_eq!(row.cell(5), None);
    }

    #[test]
    fn test_row_ignores_cells_beyond_width() {
        let row = Row::new(0, cells(&[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]));
        assert_eq!(row.playable_cells().len(), BOARD_WIDTH);
        assert_eq!(row.occupied_count(), BOARD_WIDTH);
        assert_eq!(row.first_gap(), None);
    }

    #[test]
    fn test_row_first_gap() {
        let row = Row::new(19, cells(&[1, 1, 1, 1, 1, 1, 1, 0, 0, 0]));
        assert_eq!(row.first_gap(), Some(7));
        assert_eq!(row.occupied_count(), 7);
    }

    #[test]
    fn test_from_ascii_bottom_aligned() {
        let snapshot = Snapshot::from_ascii(
            "
            #.........
            ##........
            ",
        );
        assert_eq!(snapshot.rows().len(), 2);
        assert_eq!(snapshot.rows()[0].line(), 18);
        assert_eq!(snapshot.rows()[1].line(), 19);
        assert!(snapshot.rows()[0].is_cell_occupied(0));
        assert!(!snapshot.rows()[0].is_cell_occupied(1));
        assert!(snapshot.rows()[1].is_cell_occupied(1));
    }

    #[test]
    fn test_rows_top_down_sorts_by_line() {
        let snapshot = Snapshot::new(vec![
            Row::new(19, cells(&[1])),
            Row::new(3, cells(&[0])),
            Row::new(12, cells(&[0])),
        ]);
        let lines: Vec<usize> = snapshot.rows_top_down().map(Row::line).collect();
        assert_eq!(lines, [3, 12, 19]);
    }

    #[test]
    fn test_row_lookup_returns_first_match() {
        let snapshot = Snapshot::new(vec![
            Row::new(5, cells(&[1])),
            Row::new(5, cells(&[2])),
        ]);
        assert_eq!(snapshot.row(5).unwrap().cells(), cells(&[1]).as_slice());
        assert!(snapshot.row(6).is_none());
    }

    #[test]
    fn test_render() {
        let snapshot = Snapshot::new(vec![Row::new(7, cells(&[0, 2, 0]))]);
        assert_eq!(snapshot.render(), "Line  7: [0, 2, 0]\n");

        let snapshot = Snapshot::new(vec![
            Row::new(19, cells(&[1, 1])),
            Row::new(4, Vec::new()),
        ]);
        assert_eq!(snapshot.render(), "Line 19: [1, 1]\nLine  4: []\n");
    }

    #[test]
    fn test_deserialize_rows() {
        let snapshot: Snapshot =
            serde_json::from_str(r#"[{"line": 19, "cells": [1, 0, 3]}, {"line": 4}]"#).unwrap();
        assert_eq!(snapshot.rows().len(), 2);
        assert_eq!(snapshot.rows()[0].cells(), cells(&[1, 0, 3]).as_slice());
        assert!(snapshot.rows()[1].cells().is_empty());
    }

    #[test]
    fn test_deserialize_rejects_missing_line() {
        let result = serde_json::from_str::<Snapshot>(r#"[{"cells": [1]}]"#);
        assert!(result.is_err());
    }
}
