//! Decision sources assigned to each side.

use crate::decision::DecisionService;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strictly_gomoku::Side;
use tracing::{info, instrument};

/// How an agent produces moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgentKind {
    /// Moves come from pointer clicks.
    #[serde(rename = "human")]
    Interactive,
    /// Moves come from a remote text-generation service.
    #[default]
    #[serde(rename = "llm")]
    Automated,
}

/// A named decision source.
///
/// An agent is automated exactly when it has a [`DecisionService`].
#[derive(Clone)]
pub struct Agent {
    name: String,
    service: Option<Arc<dyn DecisionService>>,
}

impl Agent {
    /// Creates an agent driven by pointer input.
    #[instrument(skip(name))]
    pub fn interactive(name: impl Into<String>) -> Self {
        let name = name.into();
        info!(agent = %name, "Creating interactive agent");
        Self {
            name,
            service: None,
        }
    }

    /// Creates an agent backed by a decision service.
    #[instrument(skip(name, service), fields(service = %service.label()))]
    pub fn automated(name: impl Into<String>, service: Arc<dyn DecisionService>) -> Self {
        let name = name.into();
        info!(agent = %name, "Creating automated agent");
        Self {
            name,
            service: Some(service),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Interactive or automated.
    pub fn kind(&self) -> AgentKind {
        if self.service.is_some() {
            AgentKind::Automated
        } else {
            AgentKind::Interactive
        }
    }

    /// The backing service for automated agents.
    pub fn service(&self) -> Option<&Arc<dyn DecisionService>> {
        self.service.as_ref()
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("service", &self.service.as_ref().map(|s| s.label().to_string()))
            .finish()
    }
}

/// One value per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideMap<T> {
    /// Value for black.
    pub black: T,
    /// Value for white.
    pub white: T,
}

impl<T> SideMap<T> {
    /// Creates a map from both values.
    pub fn new(black: T, white: T) -> Self {
        Self { black, white }
    }

    /// Value for `side`.
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Black => &self.black,
            Side::White => &self.white,
        }
    }

    /// Mutable value for `side`.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Black => &mut self.black,
            Side::White => &mut self.white,
        }
    }
}
