//! The decision boundary: an opaque service that answers a prompt with free text.

use crate::llm_client::LlmError;
use strictly_gomoku::{Board, Side};
use tracing::instrument;

/// System prompt sent with every automated move request.
pub const SYSTEM_PROMPT: &str = "You are a gomoku (five-in-a-row) master. \
Your goal is to complete an unbroken line of five of your own stones \
horizontally, vertically or diagonally, and to stop your opponent from doing so first.";

/// Everything an automated agent is told about the position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    /// Grid serialized one row per line, `0` empty, `1` black, `2` white.
    pub rows: String,
    /// Board edge length.
    pub size: usize,
    /// Side the agent plays.
    pub side: Side,
}

impl PromptContext {
    /// Captures the prompt context for `side` from a board snapshot.
    #[instrument(skip(board), fields(size = board.size()))]
    pub fn new(board: &Board, side: Side) -> Self {
        Self {
            rows: board.serialize_rows(),
            size: board.size(),
            side,
        }
    }

    /// Renders the user message describing the rules, the board and the answer format.
    pub fn user_message(&self) -> String {
        let size = self.size;
        let stone = match self.side {
            Side::Black => "black (1)",
            Side::White => "white (2)",
        };
        format!(
            "The board is {size}x{size}. Rows and columns are both numbered 1-{size}.\n\
             The board state is given as a grid, one row per line. \
             0 is an empty cell, 1 is a black stone, 2 is a white stone.\n\
             Board state:\n{rows}\n\
             You must place your stone on an empty cell (a cell whose value is 0).\n\
             You are playing {stone}.\n\
             Give the row and column of your move in the format (row,col), for example (3,5).",
            rows = self.rows,
        )
    }
}

/// A remote source of move suggestions.
///
/// Implementations make exactly one outbound request per call and return the
/// raw response text. Interpreting that text is the caller's job.
#[async_trait::async_trait]
pub trait DecisionService: Send + Sync {
    /// Asks for a move given the prompt context.
    async fn propose(&self, context: &PromptContext) -> Result<String, LlmError>;

    /// Short label for logs (usually the model name).
    fn label(&self) -> &str;
}
