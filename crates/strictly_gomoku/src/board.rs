//! Fixed-size five-in-a-row board.

use super::rules;
use super::types::{Cell, Coordinate, Side};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Default board edge length.
pub const DEFAULT_SIZE: usize = 15;

/// Smallest supported edge length (a winning run must fit).
pub const MIN_SIZE: usize = rules::WIN_LENGTH;

/// Largest supported edge length.
pub const MAX_SIZE: usize = 26;

/// Errors that can occur when placing a stone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PlaceError {
    /// The target cell already holds a stone.
    #[display("cell {coordinate} is already occupied")]
    OccupiedCell {
        /// Rejected target.
        coordinate: Coordinate,
    },
    /// The target lies outside the grid.
    #[display("cell {coordinate} is outside the {size}x{size} board")]
    OutOfBounds {
        /// Rejected target.
        coordinate: Coordinate,
        /// Board edge length.
        size: usize,
    },
}

/// N×N grid of cells plus the move-order counter.
///
/// Cells only ever go from [`Cell::Empty`] to [`Cell::Occupied`]; the only way
/// back is [`Board::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
    /// Step label of each occupied cell, 0 for empty cells.
    labels: Vec<u32>,
    steps: u32,
}

impl Board {
    /// Creates an empty board.
    ///
    /// Sizes outside `MIN_SIZE..=MAX_SIZE` are clamped into range.
    #[instrument]
    pub fn new(size: usize) -> Self {
        let clamped = size.clamp(MIN_SIZE, MAX_SIZE);
        if clamped != size {
            warn!(requested = size, used = clamped, "Board size clamped");
        }
        Self {
            size: clamped,
            cells: vec![Cell::Empty; clamped * clamped],
            labels: vec![0; clamped * clamped],
            steps: 0,
        }
    }

    /// Edge length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of accepted moves since the last reset.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Returns true if `(row, col)` lies on the grid.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    fn index(&self, coordinate: Coordinate) -> Option<usize> {
        self.contains(coordinate.row, coordinate.col)
            .then(|| coordinate.row * self.size + coordinate.col)
    }

    /// Gets the cell at a coordinate, `None` when off the grid.
    pub fn get(&self, coordinate: Coordinate) -> Option<Cell> {
        self.index(coordinate).map(|i| self.cells[i])
    }

    /// Step label of the stone at `coordinate`, if any.
    pub fn step_at(&self, coordinate: Coordinate) -> Option<u32> {
        self.index(coordinate)
            .map(|i| self.labels[i])
            .filter(|label| *label > 0)
    }

    /// True iff `(row, col)` is on the grid and empty.
    ///
    /// Shared by pointer clicks and automated proposals.
    pub fn is_legal_empty(&self, row: usize, col: usize) -> bool {
        matches!(self.get(Coordinate::new(row, col)), Some(Cell::Empty))
    }

    /// Places a stone and returns the new step count.
    ///
    /// # Errors
    ///
    /// [`PlaceError::OccupiedCell`] if the cell holds a stone,
    /// [`PlaceError::OutOfBounds`] if it is off the grid. Neither mutates the board.
    #[instrument(skip(self), fields(coordinate = %coordinate, side = %side))]
    pub fn place(&mut self, coordinate: Coordinate, side: Side) -> Result<u32, PlaceError> {
        let index = self.index(coordinate).ok_or(PlaceError::OutOfBounds {
            coordinate,
            size: self.size,
        })?;

        if self.cells[index] != Cell::Empty {
            return Err(PlaceError::OccupiedCell { coordinate });
        }

        self.steps += 1;
        self.cells[index] = Cell::Occupied(side);
        self.labels[index] = self.steps;
        debug!(step = self.steps, "Stone placed");
        Ok(self.steps)
    }

    /// Returns true if `side` has five or more in a row anywhere.
    pub fn check_win(&self, side: Side) -> bool {
        rules::check_win(self, side)
    }

    /// Returns true if no empty cell remains.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Clears every cell and zeroes the step counter.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        self.labels.fill(0);
        self.steps = 0;
        debug!("Board reset");
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Number of stones belonging to `side`.
    pub fn stone_count(&self, side: Side) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(side))
            .count()
    }

    /// Iterates over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    /// Serializes the grid one row per line, cells as `0`, `1` or `2`.
    pub fn serialize_rows(&self) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.value().to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_increments_steps() {
        let mut board = Board::default();
        assert_eq!(board.place(Coordinate::new(7, 7), Side::Black), Ok(1));
        assert_eq!(board.place(Coordinate::new(7, 8), Side::White), Ok(2));
        assert_eq!(board.step_at(Coordinate::new(7, 8)), Some(2));
    }

    #[test]
    fn test_place_occupied_rejected() {
        let mut board = Board::default();
        board.place(Coordinate::new(0, 0), Side::Black).unwrap();
        let before = board.clone();

        let result = board.place(Coordinate::new(0, 0), Side::White);
        assert_eq!(
            result,
            Err(PlaceError::OccupiedCell {
                coordinate: Coordinate::new(0, 0)
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_place_out_of_bounds_rejected() {
        let mut board = Board::new(9);
        let result = board.place(Coordinate::new(9, 0), Side::Black);
        assert!(matches!(result, Err(PlaceError::OutOfBounds { size: 9, .. })));
        assert_eq!(board.steps(), 0);
    }

    #[test]
    fn test_is_legal_empty() {
        let mut board = Board::default();
        assert!(board.is_legal_empty(14, 14));
        assert!(!board.is_legal_empty(15, 0));
        board.place(Coordinate::new(14, 14), Side::White).unwrap();
        assert!(!board.is_legal_empty(14, 14));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut board = Board::default();
        board.place(Coordinate::new(3, 3), Side::Black).unwrap();
        board.reset();
        assert_eq!(board.steps(), 0);
        assert_eq!(board.occupied_count(), 0);
        assert_eq!(board.step_at(Coordinate::new(3, 3)), None);
    }

    #[test]
    fn test_serialize_rows() {
        let mut board = Board::new(5);
        board.place(Coordinate::new(0, 1), Side::Black).unwrap();
        board.place(Coordinate::new(4, 4), Side::White).unwrap();
        let text = board.serialize_rows();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "0 1 0 0 0");
        assert_eq!(lines[4], "0 0 0 0 2");
    }

    #[test]
    fn test_size_is_clamped() {
        assert_eq!(Board::new(2).size(), MIN_SIZE);
        assert_eq!(Board::new(100).size(), MAX_SIZE);
    }
}
