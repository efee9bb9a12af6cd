//! Cumulative per-side scoring across games.

use crate::agent::SideMap;
use strictly_gomoku::Side;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

/// Points lost for each invalid automated proposal.
pub const INVALID_PROPOSAL_PENALTY: i32 = 1;

/// Points gained by the winner once the next game is confirmed.
pub const WIN_BONUS: i32 = 5;

/// Per-side score. Only changed by penalties, win bonuses and a new match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    points: SideMap<i32>,
}

impl Score {
    /// Creates a zeroed score.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current points for `side`.
    pub fn get(&self, side: Side) -> i32 {
        *self.points.get(side)
    }

    /// Deducts [`INVALID_PROPOSAL_PENALTY`] from `side`.
    #[instrument(skip(self))]
    pub fn penalize(&mut self, side: Side) {
        *self.points.get_mut(side) -= INVALID_PROPOSAL_PENALTY;
        debug!(score = self.get(side), "Penalty applied");
    }

    /// Adds [`WIN_BONUS`] to `side`.
    #[instrument(skip(self))]
    pub fn award_win(&mut self, side: Side) {
        *self.points.get_mut(side) += WIN_BONUS;
        info!(score = self.get(side), "Win bonus applied");
    }

    /// Zeroes both sides.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.points = SideMap::default();
        info!("Score reset");
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = Side::iter()
            .map(|side| format!("{}: {}", side, self.get(side)))
            .collect();
        write!(f, "{}", parts.join("  "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penalty_and_bonus() {
        let mut score = Score::new();
        score.penalize(Side::White);
        score.penalize(Side::White);
        score.award_win(Side::Black);
        assert_eq!(score.get(Side::White), -2);
        assert_eq!(score.get(Side::Black), 5);
        assert_eq!(score.to_string(), "Black: 5  White: -2");
    }

    #[test]
    fn test_reset() {
        let mut score = Score::new();
        score.award_win(Side::White);
        score.reset();
        assert_eq!(score, Score::new());
    }
}
