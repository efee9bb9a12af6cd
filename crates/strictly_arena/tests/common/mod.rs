//! Shared test doubles for arena integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use strictly_arena::{DecisionService, LlmError, Orchestrator, Phase, PromptContext};

/// Decision service that replays canned replies in order.
///
/// Once the script runs out it answers with text holding no coordinate.
pub struct ScriptedService {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedService {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Queues a transport failure after the existing replies.
    pub fn then_fail(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(LlmError::new(message.to_string())));
        self
    }

    /// Sleeps this long before every reply.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DecisionService for ScriptedService {
    async fn propose(&self, _context: &PromptContext) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("I have no idea.".to_string()));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        reply
    }

    fn label(&self) -> &str {
        "scripted"
    }
}

/// Ticks until the orchestrator leaves `Resolving`, or panics after two seconds.
pub async fn settle(orchestrator: &mut Orchestrator) -> Phase {
    for _ in 0..200 {
        let phase = orchestrator.tick();
        if !matches!(phase, Phase::Resolving(_) | Phase::Reset) {
            return phase;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("orchestrator stuck in {:?}", orchestrator.phase());
}
