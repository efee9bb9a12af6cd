//! Tests for board placement, reset and win detection.

use strictly_gomoku::invariants::{StepCountInvariant, StoneBalanceInvariant};
use strictly_gomoku::{Board, Cell, Coordinate, Invariant, PlaceError, Side};

/// Deterministic walk over the board that visits cells in a scattered order.
fn scattered_cells(size: usize, count: usize) -> Vec<Coordinate> {
    (0..count)
        .map(|i| {
            let index = (i * 7 + 3) % (size * size);
            Coordinate::new(index / size, index % size)
        })
        .collect()
}

#[test]
fn test_step_counter_tracks_accepted_moves() {
    let mut board = Board::default();
    let mut side = Side::Black;
    let mut accepted = 0;

    // Repeats after 225 / gcd(7, 225) cells, so later entries collide.
    for coordinate in scattered_cells(15, 260) {
        match board.place(coordinate, side) {
            Ok(step) => {
                accepted += 1;
                assert_eq!(step, accepted);
                side = side.opponent();
            }
            Err(PlaceError::OccupiedCell { .. }) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
        assert_eq!(board.steps(), accepted);
        assert_eq!(board.occupied_count(), accepted as usize);
        // The walk keeps going past wins, so only counting invariants apply.
        assert_eq!(StepCountInvariant::check(&board), Ok(()));
        assert_eq!(StoneBalanceInvariant::check(&board), Ok(()));
    }
}

#[test]
fn test_occupied_cells_never_change() {
    let mut board = Board::default();
    let target = Coordinate::new(4, 9);
    board.place(target, Side::White).unwrap();

    for _ in 0..3 {
        assert!(board.place(target, Side::Black).is_err());
        assert_eq!(board.get(target), Some(Cell::Occupied(Side::White)));
    }

    board.reset();
    assert_eq!(board.get(target), Some(Cell::Empty));
}

#[test]
fn test_vertical_five_at_bottom_edge() {
    let mut board = Board::default();
    for row in 10..15 {
        board.place(Coordinate::new(row, 0), Side::White).unwrap();
    }
    assert!(board.check_win(Side::White));
}

#[test]
fn test_diagonal_cut_by_corner_is_not_a_win() {
    // (11,11)..(14,14) is four long; the fifth cell would be off the grid.
    let mut board = Board::default();
    for i in 11..15 {
        board.place(Coordinate::new(i, i), Side::Black).unwrap();
    }
    assert!(!board.check_win(Side::Black));
}

#[test]
fn test_six_in_a_row_still_wins() {
    let mut board = Board::new(9);
    for col in 0..6 {
        board.place(Coordinate::new(8, col), Side::Black).unwrap();
    }
    assert!(board.check_win(Side::Black));
}

#[test]
fn test_win_detected_for_middle_stone_completion() {
    let mut board = Board::default();
    for col in [2, 3, 5, 6] {
        board.place(Coordinate::new(9, col), Side::White).unwrap();
    }
    assert!(!board.check_win(Side::White));
    board.place(Coordinate::new(9, 4), Side::White).unwrap();
    assert!(board.check_win(Side::White));
}
