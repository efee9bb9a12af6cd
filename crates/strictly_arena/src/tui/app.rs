//! Application state for the terminal front end.

use strictly_arena::{BoardGeometry, Orchestrator, Phase};
use strictly_gomoku::Coordinate;
use tracing::debug;

/// Main application state.
pub struct App {
    orchestrator: Orchestrator,
    hover: Option<Coordinate>,
    geometry: Option<BoardGeometry>,
    show_steps: bool,
}

impl App {
    /// Creates a new application around an orchestrator.
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            hover: None,
            geometry: None,
            show_steps: true,
        }
    }

    /// Gets the orchestrator.
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Cell under the pointer, if it is a legal target right now.
    pub fn hover(&self) -> Option<Coordinate> {
        self.hover
    }

    /// Whether stones show their step number.
    pub fn show_steps(&self) -> bool {
        self.show_steps
    }

    /// Advances the orchestrator one tick.
    pub fn tick(&mut self) -> Phase {
        self.orchestrator.tick()
    }

    /// Records where the board was last drawn.
    pub fn set_geometry(&mut self, geometry: BoardGeometry) {
        self.geometry = Some(geometry);
    }

    /// Pointer moved to a screen position.
    pub fn pointer_moved(&mut self, x: u16, y: u16) {
        self.hover = self.target_at(x, y);
    }

    /// Pointer pressed at a screen position.
    pub fn pointer_pressed(&mut self, x: u16, y: u16) {
        if let Some(coordinate) = self.target_at(x, y) {
            debug!(%coordinate, "Pointer move");
            if self.orchestrator.click(coordinate) {
                self.hover = None;
            }
        }
    }

    /// Answers the end-of-game prompt.
    pub fn confirm(&mut self, play_again: bool) {
        self.orchestrator.confirm(play_again);
    }

    /// Zeroes the score and starts a fresh game.
    pub fn new_match(&mut self) {
        self.hover = None;
        self.orchestrator.new_match();
    }

    /// Toggles step numbers on stones.
    pub fn toggle_steps(&mut self) {
        self.show_steps = !self.show_steps;
    }

    fn target_at(&self, x: u16, y: u16) -> Option<Coordinate> {
        self.orchestrator.clickable_side()?;
        let coordinate = self.geometry?.resolve(x, y)?;
        self.orchestrator
            .board()
            .is_legal_empty(coordinate.row, coordinate.col)
            .then_some(coordinate)
    }
}
