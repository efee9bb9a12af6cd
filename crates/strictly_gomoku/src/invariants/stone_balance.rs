//! Turns alternate, so stone counts stay within one of each other.

use super::Invariant;
use crate::{Board, Side};

/// Black and white stone counts differ by at most one, whichever side
/// started.
pub struct StoneBalanceInvariant;

impl Invariant for StoneBalanceInvariant {
    const NAME: &'static str = "stone balance";

    fn check(board: &Board) -> Result<(), String> {
        let black = board.stone_count(Side::Black);
        let white = board.stone_count(Side::White);
        if black.abs_diff(white) <= 1 {
            Ok(())
        } else {
            Err(format!("black has {black} stones, white has {white}"))
        }
    }
}
