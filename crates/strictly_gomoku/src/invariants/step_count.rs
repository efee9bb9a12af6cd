//! The move counter agrees with the stones on the board.

use super::Invariant;
use crate::{Board, Coordinate};

/// The step counter equals the number of stones, and their step labels are
/// exactly `1..=steps`.
pub struct StepCountInvariant;

impl Invariant for StepCountInvariant {
    const NAME: &'static str = "step count";

    fn check(board: &Board) -> Result<(), String> {
        let steps = board.steps() as usize;
        let stones = board.occupied_count();
        if stones != steps {
            return Err(format!("{stones} stones but step counter is {steps}"));
        }

        let mut labels: Vec<u32> = (0..board.size())
            .flat_map(|row| (0..board.size()).map(move |col| Coordinate::new(row, col)))
            .filter_map(|coordinate| board.step_at(coordinate))
            .collect();
        labels.sort_unstable();

        match labels.iter().zip(1..).find(|(label, expected)| **label != *expected) {
            Some((label, expected)) => Err(format!("expected step label {expected}, found {label}")),
            None => Ok(()),
        }
    }
}
