//! Strictly Gomoku - pure five-in-a-row game logic
//!
//! A fixed N×N board with placement, legality checks and win detection.
//! Orchestration of who moves when lives in `strictly_arena`.
//!
//! # Example
//!
//! ```
//! use strictly_gomoku::{Board, Coordinate, Side};
//!
//! let mut board = Board::default();
//! for col in 0..5 {
//!     board.place(Coordinate::new(7, col), Side::Black).unwrap();
//! }
//! assert!(board.check_win(Side::Black));
//! assert_eq!(board.steps(), 5);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
pub mod invariants;
pub mod rules;
mod types;

pub use board::{Board, DEFAULT_SIZE, MAX_SIZE, MIN_SIZE, PlaceError};
pub use invariants::{BoardInvariants, Invariant, InvariantSet, InvariantViolation};
pub use rules::WIN_LENGTH;
pub use types::{Cell, Coordinate, Side};
