//! One-shot background unit running an automated agent's turn.
//!
//! A dispatch runs the whole retry-bounded attempt sequence on a tokio task
//! against a board snapshot and delivers exactly one [`MoveOutcome`] through
//! a one-slot [`Inbox`]. It never touches the live board or the score.

use crate::decision::{DecisionService, PromptContext};
use crate::parser::{MoveProposal, ProposalVerdict, evaluate_response};
use std::sync::Arc;
use std::time::Duration;
use strictly_gomoku::{Board, Coordinate, Side};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{Instrument, debug, info, info_span, instrument, warn};

/// Default number of attempts per automated turn.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Default limit on a single outbound call.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(60);

/// How many times to ask, and how long to wait each time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    attempt_timeout: Duration,
}

impl RetryPolicy {
    /// Creates a policy. At least one attempt is always made.
    pub fn new(max_attempts: u32, attempt_timeout: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            attempt_timeout,
        }
    }

    /// Attempts allowed per turn.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Limit on each outbound call.
    pub fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_ATTEMPT_TIMEOUT)
    }
}

/// Audit record of one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    /// 1-based attempt number.
    pub attempt: u32,
    /// What the attempt produced.
    pub proposal: MoveProposal,
}

/// Terminal result of one automated turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Side that attempted the move.
    pub side: Side,
    /// Name of the agent that produced it.
    pub agent: String,
    /// Every attempt, in order. The last one is the final proposal.
    pub records: Vec<AttemptRecord>,
}

impl MoveOutcome {
    /// Final proposal of the sequence.
    pub fn proposal(&self) -> Option<&MoveProposal> {
        self.records.last().map(|r| &r.proposal)
    }

    /// Attempts consumed.
    pub fn attempts(&self) -> u32 {
        self.records.len() as u32
    }

    /// Accepted 0-based target, if the sequence ended in success.
    pub fn accepted_coordinate(&self) -> Option<Coordinate> {
        self.proposal().and_then(MoveProposal::board_coordinate)
    }

    /// True if every attempt failed.
    pub fn is_exhausted(&self) -> bool {
        self.accepted_coordinate().is_none()
    }

    /// Number of attempts that incur a score penalty.
    pub fn penalties(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.proposal.verdict.is_penalized())
            .count()
    }
}

/// Result of a non-blocking inbox poll.
#[derive(Debug)]
pub enum InboxPoll {
    /// Nothing delivered yet.
    Pending,
    /// The dispatch finished.
    Delivered(MoveOutcome),
    /// The dispatch ended without delivering (task aborted or panicked).
    Closed,
}

/// Single-consumer, one-slot receiving end of a dispatch.
#[derive(Debug)]
pub struct Inbox {
    rx: mpsc::Receiver<MoveOutcome>,
}

impl Inbox {
    /// Creates a connected sender and inbox with room for one outcome.
    pub fn channel() -> (mpsc::Sender<MoveOutcome>, Self) {
        let (tx, rx) = mpsc::channel(1);
        (tx, Self { rx })
    }

    /// Takes the outcome if it has arrived. Never blocks.
    pub fn poll(&mut self) -> InboxPoll {
        match self.rx.try_recv() {
            Ok(outcome) => InboxPoll::Delivered(outcome),
            Err(TryRecvError::Empty) => InboxPoll::Pending,
            Err(TryRecvError::Disconnected) => InboxPoll::Closed,
        }
    }
}

/// Spawns one automated turn and returns the inbox its outcome will land in.
///
/// Must be called from within a tokio runtime.
#[instrument(skip(service, snapshot), fields(agent = %agent, side = %side))]
pub fn dispatch(
    agent: String,
    service: Arc<dyn DecisionService>,
    snapshot: Board,
    side: Side,
    policy: RetryPolicy,
) -> Inbox {
    let (tx, inbox) = Inbox::channel();
    let span = info_span!("dispatch", agent = %agent, side = %side);
    tokio::spawn(
        async move {
            let outcome = run_attempts(agent, service.as_ref(), &snapshot, side, policy).await;
            if tx.send(outcome).await.is_err() {
                debug!("Inbox dropped before delivery; outcome discarded");
            }
        }
        .instrument(span),
    );
    inbox
}

/// Runs the retry-bounded attempt sequence and returns the outcome.
///
/// Every attempt reuses `snapshot`. Stops at the first accepted proposal.
pub async fn run_attempts(
    agent: String,
    service: &dyn DecisionService,
    snapshot: &Board,
    side: Side,
    policy: RetryPolicy,
) -> MoveOutcome {
    let context = PromptContext::new(snapshot, side);
    let mut records = Vec::new();

    for attempt in 1..=policy.max_attempts() {
        let proposal = attempt_once(service, &context, snapshot, policy.attempt_timeout()).await;
        let accepted = proposal.verdict == ProposalVerdict::Accepted;

        if accepted {
            info!(attempt, coordinate = ?proposal.coordinate, "Attempt accepted");
        } else {
            warn!(
                attempt,
                max_attempts = policy.max_attempts(),
                verdict = %proposal.verdict,
                coordinate = ?proposal.coordinate,
                "Attempt rejected"
            );
        }

        records.push(AttemptRecord { attempt, proposal });
        if accepted {
            break;
        }
    }

    MoveOutcome {
        side,
        agent,
        records,
    }
}

/// Exactly one outbound request, parsed and validated.
async fn attempt_once(
    service: &dyn DecisionService,
    context: &PromptContext,
    snapshot: &Board,
    timeout: Duration,
) -> MoveProposal {
    debug!(service = %service.label(), "Requesting move");
    match tokio::time::timeout(timeout, service.propose(context)).await {
        Ok(Ok(raw_text)) => evaluate_response(raw_text, snapshot),
        Ok(Err(e)) => MoveProposal::transport_error(e.message),
        Err(_) => MoveProposal::transport_error(format!(
            "timed out after {:.1}s",
            timeout.as_secs_f32()
        )),
    }
}
