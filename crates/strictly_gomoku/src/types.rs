//! Core domain types for five-in-a-row.

use serde::{Deserialize, Serialize};

/// One of the two competing sides.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter, strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Black (moves first by default).
    Black,
    /// White.
    White,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// Integer used for this side when the grid is serialized (`1` or `2`).
    pub fn cell_value(self) -> u8 {
        match self {
            Side::Black => 1,
            Side::White => 2,
        }
    }
}

/// A single intersection on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No stone.
    #[default]
    Empty,
    /// Stone belonging to a side.
    Occupied(Side),
}

impl Cell {
    /// Integer used for this cell when the grid is serialized.
    pub fn value(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Occupied(side) => side.cell_value(),
        }
    }
}

/// A 0-based board index.
///
/// Displayed 1-based, `(row,col)`, which is the form players and agents use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Row index, 0-based.
    pub row: usize,
    /// Column index, 0-based.
    pub col: usize,
}

impl Coordinate {
    /// Creates a coordinate from 0-based indices.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Converts a 1-based pair into a 0-based coordinate.
    ///
    /// Returns `None` when either component is zero.
    pub fn from_one_based(row: u32, col: u32) -> Option<Self> {
        let row = usize::try_from(row).ok()?.checked_sub(1)?;
        let col = usize::try_from(col).ok()?.checked_sub(1)?;
        Some(Self { row, col })
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row + 1, self.col + 1)
    }
}
