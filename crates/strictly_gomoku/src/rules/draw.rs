//! Draw detection.

use super::super::{Board, Cell, Side};
use super::win::check_win;

/// Returns true if every cell holds a stone.
pub fn is_full(board: &Board) -> bool {
    board.rows().flatten().all(|cell| *cell != Cell::Empty)
}

/// Returns true if the board is full and neither side has a winning run.
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && !check_win(board, Side::Black) && !check_win(board, Side::White)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coordinate;

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new(5)));
    }

    #[test]
    fn test_full_board_without_runs_is_draw() {
        // B B W W B / W W B B W / ... : no line reaches five.
        let mut board = Board::new(5);
        for row in 0..5 {
            for col in 0..5 {
                let side = if (col / 2 + row) % 2 == 0 { Side::Black } else { Side::White };
                board.place(Coordinate::new(row, col), side).unwrap();
            }
        }
        assert!(is_full(&board));
        assert!(is_draw(&board));
    }

    #[test]
    fn test_full_board_with_run_is_not_draw() {
        let mut board = Board::new(5);
        for row in 0..5 {
            for col in 0..5 {
                let side = if row == 0 { Side::Black } else if (col + row) % 2 == 0 { Side::White } else { Side::Black };
                board.place(Coordinate::new(row, col), side).unwrap();
            }
        }
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }
}
