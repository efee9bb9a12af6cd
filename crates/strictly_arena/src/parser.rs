//! Extracting and validating a move from free-form model output.
//!
//! Models often think out loud before answering, so the **last**
//! coordinate-like substring in a response is taken as the answer.

use derive_more::Display;
use regex::Regex;
use std::sync::LazyLock;
use strictly_gomoku::{Board, Coordinate};
use tracing::{debug, instrument};

/// `(row,col)` with half-width or full-width brackets, comma and digits.
static COORDINATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[（(]\s*([0-9０-９]+)\s*[,，]\s*([0-9０-９]+)\s*[）)]").unwrap()
});

/// Verdict on a single automated attempt.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ProposalVerdict {
    /// In range and the target cell is empty.
    #[display("accepted")]
    Accepted,
    /// Parsed, but out of range or the target cell is taken.
    #[display("illegal coordinate")]
    IllegalCoordinate,
    /// No coordinate-like substring in the response.
    #[display("unparseable")]
    Unparseable,
    /// The outbound call failed.
    #[display("transport error: {cause}")]
    TransportError {
        /// Underlying failure, kept for the audit trail.
        cause: String,
    },
}

impl ProposalVerdict {
    /// Whether this verdict costs the responsible side a point.
    pub fn is_penalized(&self) -> bool {
        matches!(self, Self::IllegalCoordinate | Self::Unparseable)
    }
}

/// A candidate move produced by one automated attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveProposal {
    /// Parsed `(row, col)`, 1-based, kept even when rejected.
    pub coordinate: Option<(u32, u32)>,
    /// Raw response text.
    pub raw_text: String,
    /// Outcome of validation.
    pub verdict: ProposalVerdict,
}

impl MoveProposal {
    /// Proposal for an attempt whose outbound call failed.
    pub fn transport_error(cause: impl Into<String>) -> Self {
        Self {
            coordinate: None,
            raw_text: String::new(),
            verdict: ProposalVerdict::TransportError {
                cause: cause.into(),
            },
        }
    }

    /// 0-based board index, only for accepted proposals.
    pub fn board_coordinate(&self) -> Option<Coordinate> {
        match (&self.verdict, self.coordinate) {
            (ProposalVerdict::Accepted, Some((row, col))) => Coordinate::from_one_based(row, col),
            _ => None,
        }
    }
}

/// Finds the last `(row,col)` pair in `text`, 1-based as written.
///
/// Numbers too large for `u32` saturate, so they still read as out of range.
pub fn extract_coordinate(text: &str) -> Option<(u32, u32)> {
    COORDINATE_PATTERN
        .captures_iter(text)
        .last()
        .map(|caps| (parse_digits(&caps[1]), parse_digits(&caps[2])))
}

/// Decimal value of a run of ASCII or full-width digits, saturating at `u32::MAX`.
fn parse_digits(digits: &str) -> u32 {
    digits.chars().fold(0u32, |acc, c| {
        let digit = match c {
            '０'..='９' => c as u32 - '０' as u32,
            _ => c.to_digit(10).unwrap_or(0),
        };
        acc.saturating_mul(10).saturating_add(digit)
    })
}

/// Parses `raw_text` and validates it against `board`.
#[instrument(skip(raw_text, board), fields(size = board.size()))]
pub fn evaluate_response(raw_text: String, board: &Board) -> MoveProposal {
    let Some((row, col)) = extract_coordinate(&raw_text) else {
        debug!("No coordinate found in response");
        return MoveProposal {
            coordinate: None,
            raw_text,
            verdict: ProposalVerdict::Unparseable,
        };
    };

    let legal = Coordinate::from_one_based(row, col)
        .is_some_and(|c| board.is_legal_empty(c.row, c.col));
    let verdict = if legal {
        ProposalVerdict::Accepted
    } else {
        ProposalVerdict::IllegalCoordinate
    };
    debug!(row, col, %verdict, "Evaluated response");

    MoveProposal {
        coordinate: Some((row, col)),
        raw_text,
        verdict,
    }
}
