//! Strictly Arena - five-in-a-row between humans and LLM agents
//!
//! Ties the pure board from `strictly_gomoku` to agents that answer in free
//! text.
//!
//! # Architecture
//!
//! - **Agent**: a named decision source, interactive (pointer) or automated (LLM)
//! - **Parser**: pulls the last `(row,col)` out of a response and validates it
//! - **Dispatcher**: runs one automated turn with retries on a tokio task
//! - **Orchestrator**: single owner of board, score and turn state
//! - **Score / Transcript**: bookkeeping and the audit log
//!
//! # Example
//!
//! ```no_run
//! use strictly_arena::{Agent, MatchSettings, Orchestrator, SideMap};
//! use strictly_gomoku::Coordinate;
//!
//! # async fn example() {
//! let agents = SideMap::new(Agent::interactive("Alice"), Agent::interactive("Bob"));
//! let mut orchestrator = Orchestrator::new(MatchSettings::default(), agents);
//! orchestrator.tick();
//! assert!(orchestrator.click(Coordinate::new(7, 7)));
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod agent;
mod config;
mod decision;
mod dispatcher;
mod llm_client;
mod orchestrator;
mod parser;
mod pointer;
mod score;
mod transcript;

// Crate-level exports - Agents
pub use agent::{Agent, AgentKind, SideMap};

// Crate-level exports - Configuration
pub use config::{AgentSpec, ArenaConfig, ConfigError};

// Crate-level exports - Decision boundary
pub use decision::{DecisionService, PromptContext, SYSTEM_PROMPT};

// Crate-level exports - Dispatch
pub use dispatcher::{
    AttemptRecord, DEFAULT_ATTEMPT_TIMEOUT, DEFAULT_MAX_ATTEMPTS, Inbox, InboxPoll, MoveOutcome,
    RetryPolicy, dispatch, run_attempts,
};

// Crate-level exports - LLM client
pub use llm_client::{DEFAULT_OLLAMA_URL, LlmClient, LlmConfig, LlmError, LlmProvider};

// Crate-level exports - Orchestration
pub use orchestrator::{MatchSettings, Orchestrator, Phase};

// Crate-level exports - Parsing
pub use parser::{MoveProposal, ProposalVerdict, evaluate_response, extract_coordinate};

// Crate-level exports - Surface helpers
pub use pointer::BoardGeometry;
pub use score::{INVALID_PROPOSAL_PENALTY, Score, WIN_BONUS};
pub use transcript::{Transcript, TranscriptCategory, TranscriptLine};
