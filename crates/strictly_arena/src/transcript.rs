//! Append-only log of game events for the display surface.

use strictly_gomoku::Side;
use tracing::debug;

/// What a transcript line is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum TranscriptCategory {
    /// Raw text produced by an agent.
    AgentText,
    /// A proposal that failed validation.
    ValidationError,
    /// A move applied to the board.
    MoveAccepted,
    /// Transport or runtime failure.
    SystemError,
    /// Turn announcements, takeovers, game results.
    Notice,
}

/// One transcript entry.
///
/// `side` is display metadata (the front end colours lines by it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    /// Category of the entry.
    pub category: TranscriptCategory,
    /// Side the entry concerns, if any.
    pub side: Option<Side>,
    /// Text shown to the user.
    pub text: String,
}

/// Append-only transcript.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<TranscriptLine>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line.
    pub fn push(&mut self, category: TranscriptCategory, side: Option<Side>, text: impl Into<String>) {
        let text = text.into();
        debug!(%category, ?side, text = %text, "Transcript");
        self.lines.push(TranscriptLine {
            category,
            side,
            text,
        });
    }

    /// All lines, oldest first.
    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True if nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in `category`.
    pub fn of(&self, category: TranscriptCategory) -> impl Iterator<Item = &TranscriptLine> {
        self.lines.iter().filter(move |line| line.category == category)
    }
}
