//! Board invariants.
//!
//! Each invariant inspects a [`Board`] and explains what is wrong when it
//! fails. The orchestrator checks [`BoardInvariants`] in debug builds after
//! every applied move.

use crate::Board;
use derive_more::Display;

mod single_winner;
mod step_count;
mod stone_balance;

pub use single_winner::SingleWinnerInvariant;
pub use step_count::StepCountInvariant;
pub use stone_balance::StoneBalanceInvariant;

/// A property every reachable board satisfies.
pub trait Invariant {
    /// Short name used in violation reports.
    const NAME: &'static str;

    /// Returns a description of the problem if the property fails.
    fn check(board: &Board) -> Result<(), String>;
}

/// A failed invariant together with the step it was detected at.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{invariant} violated at step {step}: {detail}")]
pub struct InvariantViolation {
    /// Name of the failed invariant.
    pub invariant: &'static str,
    /// Step counter when the check ran.
    pub step: u32,
    /// What was wrong.
    pub detail: String,
}

/// Invariants checked as a group, implemented for tuples.
pub trait InvariantSet {
    /// Runs every member and collects all violations.
    fn check_all(board: &Board) -> Result<(), Vec<InvariantViolation>>;
}

fn record<I: Invariant>(board: &Board, violations: &mut Vec<InvariantViolation>) {
    if let Err(detail) = I::check(board) {
        violations.push(InvariantViolation {
            invariant: I::NAME,
            step: board.steps(),
            detail,
        });
    }
}

impl<A: Invariant, B: Invariant, C: Invariant> InvariantSet for (A, B, C) {
    fn check_all(board: &Board) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        record::<A>(board, &mut violations);
        record::<B>(board, &mut violations);
        record::<C>(board, &mut violations);
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

/// Everything a board must satisfy between moves.
pub type BoardInvariants = (StepCountInvariant, StoneBalanceInvariant, SingleWinnerInvariant);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coordinate, Side};

    #[test]
    fn test_empty_board_passes() {
        assert!(BoardInvariants::check_all(&Board::default()).is_ok());
    }

    #[test]
    fn test_alternating_moves_pass() {
        let mut board = Board::default();
        let mut side = Side::Black;
        for col in 0..6 {
            board.place(Coordinate::new(0, col), side).unwrap();
            side = side.opponent();
        }
        assert!(BoardInvariants::check_all(&board).is_ok());
    }

    #[test]
    fn test_violation_names_invariant_and_step() {
        let mut board = Board::default();
        board.place(Coordinate::new(0, 0), Side::White).unwrap();
        board.place(Coordinate::new(0, 1), Side::White).unwrap();

        let violations = BoardInvariants::check_all(&board).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].invariant, StoneBalanceInvariant::NAME);
        assert_eq!(violations[0].step, 2);
        assert!(violations[0].to_string().starts_with("stone balance violated at step 2"));
    }
}
