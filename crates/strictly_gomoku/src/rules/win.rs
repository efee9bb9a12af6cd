//! Win detection logic for five-in-a-row.

use super::super::{Board, Cell, Coordinate, Side};
use tracing::instrument;

/// Stones in a line needed to win.
pub const WIN_LENGTH: usize = 5;

/// Horizontal, vertical and the two diagonals.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Returns true if `side` owns a run of at least [`WIN_LENGTH`] stones.
///
/// Scans every stone of `side` in all four directions. This is a full-board
/// scan, cheap at board sizes in the tens.
#[instrument(skip(board), fields(size = board.size()))]
pub fn check_win(board: &Board, side: Side) -> bool {
    let size = board.size();
    (0..size).any(|row| {
        (0..size).any(|col| {
            let origin = Coordinate::new(row, col);
            board.get(origin) == Some(Cell::Occupied(side))
                && DIRECTIONS
                    .iter()
                    .any(|&direction| run_length(board, origin, side, direction) >= WIN_LENGTH)
        })
    })
}

/// Length of the contiguous `side` run through `origin` along `direction`.
///
/// Counts forward and backward from `origin`, the origin once. Cells off the
/// grid end the run.
pub fn run_length(board: &Board, origin: Coordinate, side: Side, direction: (isize, isize)) -> usize {
    if board.get(origin) != Some(Cell::Occupied(side)) {
        return 0;
    }
    let (dr, dc) = direction;
    1 + count_towards(board, origin, side, (dr, dc)) + count_towards(board, origin, side, (-dr, -dc))
}

fn count_towards(board: &Board, origin: Coordinate, side: Side, (dr, dc): (isize, isize)) -> usize {
    let mut count = 0;
    let (mut row, mut col) = (origin.row as isize, origin.col as isize);
    loop {
        row += dr;
        col += dc;
        if row < 0 || col < 0 {
            return count;
        }
        let next = Coordinate::new(row as usize, col as usize);
        if board.get(next) != Some(Cell::Occupied(side)) {
            return count;
        }
        count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(stones: &[(usize, usize, Side)]) -> Board {
        let mut board = Board::default();
        for &(row, col, side) in stones {
            board.place(Coordinate::new(row, col), side).unwrap();
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::default();
        assert!(!check_win(&board, Side::Black));
        assert!(!check_win(&board, Side::White));
    }

    #[test]
    fn test_horizontal_five_wins() {
        let stones: Vec<_> = (3..8).map(|col| (6, col, Side::Black)).collect();
        let board = board_with(&stones);
        assert!(check_win(&board, Side::Black));
        assert!(!check_win(&board, Side::White));
    }

    #[test]
    fn test_four_is_not_a_win() {
        let stones: Vec<_> = (0..4).map(|row| (row, 2, Side::White)).collect();
        let board = board_with(&stones);
        assert!(!check_win(&board, Side::White));
    }

    #[test]
    fn test_anti_diagonal_five_wins() {
        let stones: Vec<_> = (0..5).map(|i| (i, 10 - i, Side::White)).collect();
        let board = board_with(&stones);
        assert!(check_win(&board, Side::White));
    }

    #[test]
    fn test_run_broken_by_opponent() {
        let board = board_with(&[
            (0, 0, Side::Black),
            (0, 1, Side::Black),
            (0, 2, Side::White),
            (0, 3, Side::Black),
            (0, 4, Side::Black),
            (0, 5, Side::Black),
        ]);
        assert!(!check_win(&board, Side::Black));
    }

    #[test]
    fn test_edge_run_does_not_wrap() {
        // Four at the end of row 0 and one at the start of row 1 are adjacent
        // in row-major storage but not on the board.
        let board = board_with(&[
            (0, 11, Side::Black),
            (0, 12, Side::Black),
            (0, 13, Side::Black),
            (0, 14, Side::Black),
            (1, 0, Side::Black),
        ]);
        assert!(!check_win(&board, Side::Black));
    }

    #[test]
    fn test_run_length_counts_origin_once() {
        let board = board_with(&[(5, 5, Side::Black), (5, 6, Side::Black), (5, 4, Side::Black)]);
        assert_eq!(run_length(&board, Coordinate::new(5, 5), Side::Black, (0, 1)), 3);
        assert_eq!(run_length(&board, Coordinate::new(5, 5), Side::Black, (1, 0)), 1);
    }
}
