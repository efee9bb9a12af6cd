//! Turn orchestration between two agents.
//!
//! The [`Orchestrator`] is the single writer of board, score and turn state.
//! Automated turns run on a dispatch task; the orchestrator only ever polls
//! their inbox, so the caller's loop never blocks on a model.

use crate::agent::{Agent, AgentKind, SideMap};
use crate::dispatcher::{self, Inbox, InboxPoll, MoveOutcome, RetryPolicy};
use crate::parser::ProposalVerdict;
use crate::score::Score;
use crate::transcript::{Transcript, TranscriptCategory};
use strictly_gomoku::{Board, BoardInvariants, Coordinate, DEFAULT_SIZE, InvariantSet, Side};
use tracing::{debug, info, instrument, warn};

/// Fixed inputs for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSettings {
    /// Board edge length.
    pub board_size: usize,
    /// Side that moves first in every game.
    pub starting_side: Side,
    /// Retry policy for automated turns.
    pub retry: RetryPolicy,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_SIZE,
            starting_side: Side::Black,
            retry: RetryPolicy::default(),
        }
    }
}

/// Where the turn cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Fresh board; the next tick starts the game.
    Reset,
    /// Waiting for `side` to move.
    AwaitingMove(Side),
    /// An automated dispatch for `side` is in flight.
    Resolving(Side),
    /// `side`'s agent gave up; waiting for a manual move.
    AwaitingHumanRecovery(Side),
    /// `side` completed five in a row; waiting for confirmation.
    Won(Side),
    /// Board full without a winner; waiting for confirmation.
    Drawn,
    /// The user declined another game.
    Terminated,
}

impl Phase {
    /// True while a yes/no answer is expected.
    pub fn awaits_confirmation(self) -> bool {
        matches!(self, Phase::Won(_) | Phase::Drawn)
    }

    /// Side whose click would be accepted right now, given the agents.
    fn clickable_side(self, agents: &SideMap<Agent>) -> Option<Side> {
        match self {
            Phase::AwaitingMove(side) if agents.get(side).kind() == AgentKind::Interactive => Some(side),
            Phase::AwaitingHumanRecovery(side) => Some(side),
            _ => None,
        }
    }
}

/// Owns the game state and drives the turn cycle.
#[derive(Debug)]
pub struct Orchestrator {
    settings: MatchSettings,
    agents: SideMap<Agent>,
    board: Board,
    side_to_move: Side,
    score: Score,
    phase: Phase,
    transcript: Transcript,
    pending: Option<Inbox>,
    games_started: u32,
}

impl Orchestrator {
    /// Creates an orchestrator with an empty board and zero score.
    #[instrument(skip(agents), fields(black = %agents.black.name(), white = %agents.white.name()))]
    pub fn new(settings: MatchSettings, agents: SideMap<Agent>) -> Self {
        info!(?settings, "Creating orchestrator");
        Self {
            board: Board::new(settings.board_size),
            side_to_move: settings.starting_side,
            settings,
            agents,
            score: Score::new(),
            phase: Phase::Reset,
            transcript: Transcript::new(),
            pending: None,
            games_started: 0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Live board (read only).
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Cumulative score.
    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Transcript so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Side whose turn it is.
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Agent playing `side`.
    pub fn agent(&self, side: Side) -> &Agent {
        self.agents.get(side)
    }

    /// Settings fixed at construction.
    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// Games begun since construction.
    pub fn games_started(&self) -> u32 {
        self.games_started
    }

    /// Side a click would move for right now, if any.
    pub fn clickable_side(&self) -> Option<Side> {
        self.phase.clickable_side(&self.agents)
    }

    /// True while an automated dispatch is in flight.
    pub fn is_dispatching(&self) -> bool {
        self.pending.is_some()
    }

    /// Advances the state machine without blocking and returns the new phase.
    ///
    /// Starts a game after a reset, dispatches automated turns and drains a
    /// finished dispatch. Call on a fixed short interval.
    pub fn tick(&mut self) -> Phase {
        if self.phase == Phase::Reset {
            self.begin_game();
        }

        match self.phase {
            Phase::AwaitingMove(side) if self.agents.get(side).kind() == AgentKind::Automated => {
                self.dispatch(side);
            }
            Phase::Resolving(side) => self.drain(side),
            _ => {}
        }

        self.phase
    }

    /// Applies an exogenous (pointer) move. Returns true if it was applied.
    ///
    /// Only accepted while an interactive side is to move or while a side is
    /// awaiting human recovery, and only on an empty cell.
    #[instrument(skip(self), fields(coordinate = %coordinate, phase = ?self.phase))]
    pub fn click(&mut self, coordinate: Coordinate) -> bool {
        let Some(side) = self.phase.clickable_side(&self.agents) else {
            debug!("Click ignored in this phase");
            return false;
        };

        if !self.board.is_legal_empty(coordinate.row, coordinate.col) {
            warn!("Click on unavailable cell ignored");
            return false;
        }

        if let Phase::AwaitingHumanRecovery(_) = self.phase {
            info!(%side, "Manual move replaces stuck agent");
        }
        self.apply_move(side, coordinate, "Player")
    }

    /// Answers the end-of-game prompt. Returns true if a prompt was pending.
    ///
    /// "Yes" awards the win bonus and resets the board; "no" terminates.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn confirm(&mut self, play_again: bool) -> bool {
        if !self.phase.awaits_confirmation() {
            return false;
        }

        if !play_again {
            info!("Match terminated by user");
            self.phase = Phase::Terminated;
            return true;
        }

        if let Phase::Won(side) = self.phase {
            self.score.award_win(side);
        }
        self.reset_game();
        true
    }

    /// Zeroes the score and starts over with an empty board.
    #[instrument(skip(self))]
    pub fn new_match(&mut self) {
        self.score.reset();
        self.reset_game();
        self.transcript
            .push(TranscriptCategory::Notice, None, "New match: scores reset");
    }

    fn reset_game(&mut self) {
        self.board.reset();
        self.side_to_move = self.settings.starting_side;
        // Dropping the inbox discards any outcome computed for the old board.
        self.pending = None;
        self.phase = Phase::Reset;
        info!("Game reset");
    }

    fn begin_game(&mut self) {
        self.games_started += 1;
        let side = self.settings.starting_side;
        self.transcript.push(
            TranscriptCategory::Notice,
            None,
            format!("Game {} begins, {} to move", self.games_started, side),
        );
        self.phase = Phase::AwaitingMove(side);
        info!(game = self.games_started, %side, "Game started");
    }

    fn dispatch(&mut self, side: Side) {
        let agent = self.agents.get(side);
        let Some(service) = agent.service().cloned() else {
            return;
        };
        let name = agent.name().to_string();

        self.transcript.push(
            TranscriptCategory::Notice,
            Some(side),
            format!("【{}】 plays {}, thinking...", name, side),
        );
        self.pending = Some(dispatcher::dispatch(
            name,
            service,
            self.board.clone(),
            side,
            self.settings.retry,
        ));
        self.phase = Phase::Resolving(side);
    }

    fn drain(&mut self, side: Side) {
        let Some(inbox) = self.pending.as_mut() else {
            warn!(%side, "Resolving without a dispatch; waiting for a manual move");
            self.phase = Phase::AwaitingHumanRecovery(side);
            return;
        };

        match inbox.poll() {
            InboxPoll::Pending => {}
            InboxPoll::Delivered(outcome) => {
                self.pending = None;
                self.apply_outcome(side, outcome);
            }
            InboxPoll::Closed => {
                self.pending = None;
                let name = self.agents.get(side).name().to_string();
                self.transcript.push(
                    TranscriptCategory::SystemError,
                    Some(side),
                    format!("【{}】 dispatch ended without a result, please move manually", name),
                );
                self.phase = Phase::AwaitingHumanRecovery(side);
            }
        }
    }

    #[instrument(skip(self, outcome), fields(agent = %outcome.agent, attempts = outcome.attempts()))]
    fn apply_outcome(&mut self, side: Side, outcome: MoveOutcome) {
        if outcome.side != side {
            warn!(outcome_side = %outcome.side, "Outcome for the wrong side discarded");
            return;
        }

        if let Some(coordinate) = outcome.accepted_coordinate()
            && !self.board.is_legal_empty(coordinate.row, coordinate.col)
        {
            // Target filled since the snapshot: drop the whole outcome and ask again.
            debug!(%coordinate, "Stale outcome discarded");
            self.phase = Phase::AwaitingMove(side);
            return;
        }

        self.record_attempts(&outcome);

        match outcome.accepted_coordinate() {
            Some(coordinate) => {
                self.apply_move(side, coordinate, &outcome.agent);
            }
            None => {
                self.transcript.push(
                    TranscriptCategory::Notice,
                    Some(side),
                    format!(
                        "No valid move from 【{}】 after {} attempts, please move manually",
                        outcome.agent,
                        outcome.attempts()
                    ),
                );
                info!(%side, "Retries exhausted, awaiting human recovery");
                self.phase = Phase::AwaitingHumanRecovery(side);
            }
        }
    }

    /// Writes the audit trail of a dispatch and applies per-attempt penalties.
    fn record_attempts(&mut self, outcome: &MoveOutcome) {
        let side = outcome.side;
        let max_attempts = self.settings.retry.max_attempts();

        for record in &outcome.records {
            let proposal = &record.proposal;
            if !proposal.raw_text.is_empty() {
                self.transcript.push(
                    TranscriptCategory::AgentText,
                    Some(side),
                    format!("【{}】 says: {}", outcome.agent, proposal.raw_text),
                );
            }

            let retry_note = if record.attempt < max_attempts {
                format!(", retry {}", record.attempt)
            } else {
                String::new()
            };

            match &proposal.verdict {
                ProposalVerdict::Accepted => {}
                ProposalVerdict::IllegalCoordinate => {
                    let (row, col) = proposal.coordinate.unwrap_or_default();
                    self.transcript.push(
                        TranscriptCategory::ValidationError,
                        Some(side),
                        format!(
                            "【{}】 returned illegal coordinate ({}, {}){}",
                            outcome.agent, row, col, retry_note
                        ),
                    );
                }
                ProposalVerdict::Unparseable => {
                    self.transcript.push(
                        TranscriptCategory::ValidationError,
                        Some(side),
                        format!("【{}】 gave no readable coordinate{}", outcome.agent, retry_note),
                    );
                }
                ProposalVerdict::TransportError { cause } => {
                    self.transcript.push(
                        TranscriptCategory::SystemError,
                        Some(side),
                        format!("【{}】 error: {}{}", outcome.agent, cause, retry_note),
                    );
                }
            }

            if proposal.verdict.is_penalized() {
                self.score.penalize(side);
            }
        }
    }

    /// Places a validated move, then either ends the game or flips the turn.
    fn apply_move(&mut self, side: Side, coordinate: Coordinate, mover: &str) -> bool {
        let step = match self.board.place(coordinate, side) {
            Ok(step) => step,
            Err(e) => {
                warn!(error = %e, "Move rejected by board");
                return false;
            }
        };

        self.transcript.push(
            TranscriptCategory::MoveAccepted,
            Some(side),
            format!(
                "【{}】 played row {}, column {} ({}), step {}",
                mover,
                coordinate.row + 1,
                coordinate.col + 1,
                side,
                step
            ),
        );
        debug_assert!(
            BoardInvariants::check_all(&self.board).is_ok(),
            "Board invariants violated"
        );

        if self.board.check_win(side) {
            info!(%side, step, "Game won");
            self.transcript.push(
                TranscriptCategory::Notice,
                Some(side),
                format!("{} wins! Play again? (y/n)", side),
            );
            self.phase = Phase::Won(side);
        } else if self.board.is_full() {
            info!(step, "Game drawn");
            self.transcript.push(
                TranscriptCategory::Notice,
                None,
                "Board full, the game is a draw. Play again? (y/n)",
            );
            self.phase = Phase::Drawn;
        } else {
            self.side_to_move = side.opponent();
            self.phase = Phase::AwaitingMove(self.side_to_move);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::AttemptRecord;
    use crate::parser::MoveProposal;

    fn proposal(coordinate: (u32, u32), verdict: ProposalVerdict) -> MoveProposal {
        MoveProposal {
            coordinate: Some(coordinate),
            raw_text: format!("({},{})", coordinate.0, coordinate.1),
            verdict,
        }
    }

    #[test]
    fn test_stale_outcome_leaves_no_trace() {
        let agents = SideMap::new(Agent::interactive("Alice"), Agent::interactive("Bob"));
        let mut orchestrator = Orchestrator::new(MatchSettings::default(), agents);
        orchestrator.tick();
        assert!(orchestrator.click(Coordinate::new(0, 0)));
        let lines_before = orchestrator.transcript().len();

        let outcome = MoveOutcome {
            side: Side::White,
            agent: "late".to_string(),
            records: vec![
                AttemptRecord {
                    attempt: 1,
                    proposal: proposal((16, 1), ProposalVerdict::IllegalCoordinate),
                },
                AttemptRecord {
                    attempt: 2,
                    proposal: proposal((1, 1), ProposalVerdict::Accepted),
                },
            ],
        };
        orchestrator.apply_outcome(Side::White, outcome);

        assert_eq!(orchestrator.phase(), Phase::AwaitingMove(Side::White));
        assert_eq!(orchestrator.score().get(Side::White), 0);
        assert_eq!(orchestrator.transcript().len(), lines_before);
        assert_eq!(orchestrator.board().steps(), 1);
    }
}
