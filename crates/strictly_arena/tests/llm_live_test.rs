//! Live backend test. Needs a running Ollama (or `OLLAMA_HOST`).
//!
//! Run with `--features api`.

use strictly_arena::{ArenaConfig, DecisionService, PromptContext, extract_coordinate};
use strictly_gomoku::{Board, Side};

#[cfg_attr(not(feature = "api"), ignore)]
#[tokio::test]
async fn test_ollama_answers_with_a_coordinate() {
    dotenvy::dotenv().ok();
    let config = ArenaConfig::default();
    let agent = config.black().build_agent().unwrap();
    let service = agent.service().unwrap();

    let board = Board::new(*config.board_size());
    let reply = service
        .propose(&PromptContext::new(&board, Side::Black))
        .await
        .unwrap();

    assert!(extract_coordinate(&reply).is_some(), "no coordinate in: {reply}");
}
