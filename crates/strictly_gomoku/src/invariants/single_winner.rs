//! A game stops at the first win, so two winners cannot coexist.

use super::Invariant;
use crate::{Board, Side};

/// At most one side has five in a row.
pub struct SingleWinnerInvariant;

impl Invariant for SingleWinnerInvariant {
    const NAME: &'static str = "single winner";

    fn check(board: &Board) -> Result<(), String> {
        if board.check_win(Side::Black) && board.check_win(Side::White) {
            Err("both sides have five in a row".to_string())
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coordinate;

    #[test]
    fn test_two_runs_fail() {
        let mut board = Board::default();
        for col in 0..5 {
            board.place(Coordinate::new(0, col), Side::Black).unwrap();
            board.place(Coordinate::new(2, col), Side::White).unwrap();
        }
        assert!(SingleWinnerInvariant::check(&board).is_err());
    }
}
