//! Match configuration loaded from TOML.

use crate::agent::{Agent, AgentKind, SideMap};
use crate::dispatcher::{DEFAULT_MAX_ATTEMPTS, RetryPolicy};
use crate::llm_client::{LlmClient, LlmConfig, LlmProvider};
use crate::orchestrator::MatchSettings;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use strictly_gomoku::{DEFAULT_SIZE, MAX_SIZE, MIN_SIZE, Side};
use tracing::{debug, info, instrument};

/// Configuration for the agent playing one side.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AgentSpec {
    /// Display name (shown in the transcript).
    name: String,

    /// `human` or `llm`.
    #[serde(default)]
    kind: AgentKind,

    /// LLM provider (openai, anthropic or ollama).
    #[serde(default = "default_provider")]
    llm_provider: LlmProvider,

    /// LLM model name (e.g. "qwen2.5:latest", "gpt-4o-mini").
    #[serde(default = "default_model")]
    llm_model: String,

    /// Maximum tokens for LLM responses.
    #[serde(default = "default_max_tokens")]
    llm_max_tokens: u32,

    /// Endpoint override for the provider.
    #[serde(default)]
    llm_base_url: Option<String>,
}

fn default_provider() -> LlmProvider {
    LlmProvider::Ollama
}

fn default_model() -> String {
    "qwen2.5:latest".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

impl AgentSpec {
    /// Creates an LLM-backed spec with default provider settings.
    pub fn llm(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AgentKind::Automated,
            llm_provider: default_provider(),
            llm_model: model.into(),
            llm_max_tokens: default_max_tokens(),
            llm_base_url: None,
        }
    }

    /// Creates a spec for a human player.
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            kind: AgentKind::Interactive,
            ..Self::llm(name, default_model())
        }
    }

    /// Backend settings for this agent, reading the API key from the
    /// environment when the provider needs one.
    #[instrument(skip(self), fields(provider = %self.llm_provider, model = %self.llm_model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        let key_var = match self.llm_provider {
            LlmProvider::OpenAI => Some("OPENAI_API_KEY"),
            LlmProvider::Anthropic => Some("ANTHROPIC_API_KEY"),
            LlmProvider::Ollama => None,
        };
        let api_key = match key_var {
            Some(var) => std::env::var(var).map_err(|_| {
                ConfigError::new(format!("{} must be set for agent '{}'", var, self.name))
            })?,
            None => String::new(),
        };
        debug!(needs_key = key_var.is_some(), "Agent backend resolved");

        Ok(LlmConfig::new(
            self.llm_provider,
            api_key,
            self.llm_model.clone(),
            self.llm_max_tokens,
            self.llm_base_url.clone(),
        ))
    }

    /// Builds the agent this spec describes.
    pub fn build_agent(&self) -> Result<Agent, ConfigError> {
        match self.kind {
            AgentKind::Interactive => Ok(Agent::interactive(self.name.clone())),
            AgentKind::Automated => {
                let client = LlmClient::new(self.create_llm_config()?);
                Ok(Agent::automated(self.name.clone(), Arc::new(client)))
            }
        }
    }
}

/// Whole-match configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Board edge length.
    board_size: usize,

    /// Attempts per automated turn before falling back to a manual move.
    max_attempts: u32,

    /// Control loop cadence in milliseconds.
    poll_interval_ms: u64,

    /// Limit on each outbound model call, in seconds.
    attempt_timeout_secs: u64,

    /// Side that moves first in every game.
    starting_side: Side,

    /// Agent playing black.
    black: AgentSpec,

    /// Agent playing white.
    white: AgentSpec,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            poll_interval_ms: 100,
            attempt_timeout_secs: 60,
            starting_side: Side::Black,
            black: AgentSpec::llm("qwen2.5:latest", "qwen2.5:latest"),
            white: AgentSpec::llm("deepseek-r1:8b", "deepseek-r1:8b"),
        }
    }
}

impl ArenaConfig {
    /// Reads and validates a TOML match file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(
            black = %config.black.name,
            white = %config.white.name,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.board_size) {
            return Err(ConfigError::new(format!(
                "board_size must be between {} and {}, got {}",
                MIN_SIZE, MAX_SIZE, self.board_size
            )));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::new("max_attempts must be at least 1".to_string()));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::new("poll_interval_ms must be positive".to_string()));
        }
        if self.attempt_timeout_secs == 0 {
            return Err(ConfigError::new("attempt_timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// Overrides the board size.
    pub fn with_board_size(mut self, board_size: usize) -> Result<Self, ConfigError> {
        self.board_size = board_size;
        self.validate()?;
        Ok(self)
    }

    /// Hands `side` to a human player.
    pub fn with_human(mut self, side: Side) -> Self {
        let spec = match side {
            Side::Black => &mut self.black,
            Side::White => &mut self.white,
        };
        spec.kind = AgentKind::Interactive;
        spec.name = "Player".to_string();
        self
    }

    /// Spec for `side`.
    pub fn agent(&self, side: Side) -> &AgentSpec {
        match side {
            Side::Black => &self.black,
            Side::White => &self.white,
        }
    }

    /// Control loop cadence.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Orchestrator settings derived from this config.
    pub fn match_settings(&self) -> MatchSettings {
        MatchSettings {
            board_size: self.board_size,
            starting_side: self.starting_side,
            retry: RetryPolicy::new(
                self.max_attempts,
                Duration::from_secs(self.attempt_timeout_secs),
            ),
        }
    }

    /// Builds both agents.
    #[instrument(skip(self))]
    pub fn build_agents(&self) -> Result<SideMap<Agent>, ConfigError> {
        Ok(SideMap::new(
            self.black.build_agent()?,
            self.white.build_agent()?,
        ))
    }
}

/// Unreadable or out-of-range match configuration.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// What is wrong with the configuration.
    pub message: String,
    /// Line where the error was raised.
    pub line: u32,
    /// File where the error was raised.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates an error stamped with the caller's location.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
