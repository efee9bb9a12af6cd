//! Retry and delivery tests for automated turns.

mod common;

use common::ScriptedService;
use std::sync::Arc;
use std::time::Duration;
use strictly_arena::{
    Inbox, InboxPoll, ProposalVerdict, RetryPolicy, dispatch, run_attempts,
};
use strictly_gomoku::{Board, Coordinate, Side};

fn policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(max_attempts, Duration::from_secs(1))
}

#[tokio::test]
async fn test_stops_at_first_accepted_proposal() {
    let service = ScriptedService::new(["(1,1)", "(2,2)"]);
    let board = Board::new(15);

    let outcome = run_attempts("bot".to_string(), &service, &board, Side::Black, policy(3)).await;

    assert_eq!(outcome.attempts(), 1);
    assert_eq!(outcome.accepted_coordinate(), Some(Coordinate::new(0, 0)));
    assert_eq!(service.calls(), 1);
}

#[tokio::test]
async fn test_occupied_target_is_illegal() {
    let service = ScriptedService::new(["(1,1)", "(1,2)"]);
    let mut board = Board::new(15);
    board.place(Coordinate::new(0, 0), Side::White).unwrap();

    let outcome = run_attempts("bot".to_string(), &service, &board, Side::Black, policy(2)).await;

    assert_eq!(outcome.attempts(), 2);
    assert_eq!(outcome.records[0].proposal.verdict, ProposalVerdict::IllegalCoordinate);
    assert_eq!(outcome.accepted_coordinate(), Some(Coordinate::new(0, 1)));
    assert_eq!(outcome.penalties(), 1);
}

#[tokio::test]
async fn test_retry_budget_is_respected() {
    let service = ScriptedService::new(["nope", "still nope", "(1,1)"]);
    let board = Board::new(15);

    let outcome = run_attempts("bot".to_string(), &service, &board, Side::White, policy(2)).await;

    assert!(outcome.is_exhausted());
    assert_eq!(outcome.attempts(), 2);
    assert_eq!(outcome.penalties(), 2);
    assert_eq!(service.calls(), 2);
}

#[tokio::test]
async fn test_zero_attempts_still_asks_once() {
    let service = ScriptedService::new(["(3,3)"]);
    let board = Board::new(15);

    let outcome = run_attempts("bot".to_string(), &service, &board, Side::Black, policy(0)).await;
    assert_eq!(outcome.attempts(), 1);
}

#[tokio::test]
async fn test_slow_reply_times_out() {
    let service = ScriptedService::new(["(1,1)"]).with_delay(Duration::from_millis(200));
    let board = Board::new(15);
    let policy = RetryPolicy::new(1, Duration::from_millis(20));

    let outcome = run_attempts("bot".to_string(), &service, &board, Side::Black, policy).await;

    assert!(outcome.is_exhausted());
    assert!(matches!(
        outcome.records[0].proposal.verdict,
        ProposalVerdict::TransportError { .. }
    ));
    assert_eq!(outcome.penalties(), 0);
}

#[tokio::test]
async fn test_dispatch_delivers_to_inbox() {
    let service = Arc::new(ScriptedService::new(["(4,4)"]));
    let mut inbox = dispatch(
        "bot".to_string(),
        service,
        Board::new(15),
        Side::Black,
        policy(2),
    );

    for _ in 0..100 {
        match inbox.poll() {
            InboxPoll::Pending => tokio::time::sleep(Duration::from_millis(10)).await,
            InboxPoll::Delivered(outcome) => {
                assert_eq!(outcome.side, Side::Black);
                assert_eq!(outcome.accepted_coordinate(), Some(Coordinate::new(3, 3)));
                return;
            }
            InboxPoll::Closed => panic!("dispatch closed without delivering"),
        }
    }
    panic!("dispatch never delivered");
}

#[test]
fn test_inbox_reports_closed_sender() {
    let (tx, mut inbox) = Inbox::channel();
    assert!(matches!(inbox.poll(), InboxPoll::Pending));
    drop(tx);
    assert!(matches!(inbox.poll(), InboxPoll::Closed));
}
