//! Stateless UI rendering for gomoku.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use strictly_arena::{BoardGeometry, Orchestrator, Phase, TranscriptCategory, TranscriptLine};
use strictly_gomoku::{Cell, Coordinate, Side};

use super::app::App;

/// Width of the row-number gutter.
const LABEL_WIDTH: u16 = 3;
/// Terminal columns per board cell.
const CELL_WIDTH: u16 = 3;

const BOARD_BG: Color = Color::Rgb(0xCC, 0x99, 0x66);

/// Renders the whole screen and reports where the grid landed.
pub fn draw(frame: &mut Frame, app: &App) -> BoardGeometry {
    let area = frame.area();
    let size = app.orchestrator().board().size() as u16;

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(LABEL_WIDTH + CELL_WIDTH * size + 2),
            Constraint::Min(30),
        ])
        .split(area);

    let side_panel = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Score
            Constraint::Min(5),     // Transcript
            Constraint::Length(3),  // Status
        ])
        .split(columns[1]);

    let geometry = draw_board(frame, columns[0], app);
    draw_score(frame, side_panel[0], app.orchestrator());
    draw_transcript(frame, side_panel[1], app.orchestrator().transcript().lines());

    let status = Paragraph::new(status_message(app.orchestrator()))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title_bottom("click: move  s: steps  m: new match  q: quit"),
        );
    frame.render_widget(status, side_panel[2]);

    if app.orchestrator().phase().awaits_confirmation() {
        draw_confirmation(frame, area, app.orchestrator().phase());
    }

    geometry
}

/// One-line description of what the match is waiting for.
pub fn status_message(orchestrator: &Orchestrator) -> String {
    let name = |side: Side| orchestrator.agent(side).name().to_string();
    match orchestrator.phase() {
        Phase::Reset => "Setting up the board...".to_string(),
        Phase::AwaitingMove(side) if orchestrator.clickable_side() == Some(side) => {
            format!("{} to move: click an empty cell", side)
        }
        Phase::AwaitingMove(side) => format!("{} to move", side),
        Phase::Resolving(side) => format!("【{}】 ({}) is thinking...", name(side), side),
        Phase::AwaitingHumanRecovery(side) => {
            format!("【{}】 is stuck: click a cell to move for {}", name(side), side)
        }
        Phase::Won(side) => format!("【{}】 ({}) wins!", name(side), side),
        Phase::Drawn => "Draw!".to_string(),
        Phase::Terminated => "Match over".to_string(),
    }
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) -> BoardGeometry {
    let board = app.orchestrator().board();
    let block = Block::default()
        .title(format!("Gomoku {0}x{0}", board.size()))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::with_capacity(board.size() + 1);

    let mut header = vec![Span::raw(" ".repeat(LABEL_WIDTH as usize))];
    header.extend((1..=board.size()).map(|col| {
        Span::styled(format!("{:^3}", col), Style::default().fg(Color::DarkGray))
    }));
    lines.push(Line::from(header));

    for row in 0..board.size() {
        let mut spans = vec![Span::styled(
            format!("{:>2} ", row + 1),
            Style::default().fg(Color::DarkGray),
        )];
        spans.extend((0..board.size()).map(|col| cell_span(app, Coordinate::new(row, col))));
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);

    BoardGeometry::new(inner.x + LABEL_WIDTH, inner.y + 1, CELL_WIDTH, 1, board.size())
        .clip_to(inner.right(), inner.bottom())
}

fn cell_span(app: &App, coordinate: Coordinate) -> Span<'static> {
    let board = app.orchestrator().board();
    let base = Style::default().bg(BOARD_BG);

    match board.get(coordinate) {
        Some(Cell::Occupied(side)) => {
            let fg = match side {
                Side::Black => Color::Black,
                Side::White => Color::White,
            };
            let symbol = match board.step_at(coordinate) {
                Some(step) if app.show_steps() => format!("{:^3}", step),
                _ => " ● ".to_string(),
            };
            Span::styled(symbol, base.fg(fg).add_modifier(Modifier::BOLD))
        }
        _ if app.hover() == Some(coordinate) => {
            Span::styled(" □ ", base.fg(Color::Red).add_modifier(Modifier::BOLD))
        }
        _ => Span::styled(" + ", base.fg(Color::Rgb(0x66, 0x4D, 0x33))),
    }
}

fn draw_score(frame: &mut Frame, area: Rect, orchestrator: &Orchestrator) {
    let line = |side: Side| {
        Line::from(vec![
            Span::styled(format!("{:<6}", side), side_style(side).add_modifier(Modifier::BOLD)),
            Span::raw(format!("{:<20}", orchestrator.agent(side).name())),
            Span::raw(format!("{:>4}", orchestrator.score().get(side))),
        ])
    };
    let score = Paragraph::new(vec![line(Side::Black), line(Side::White)]).block(
        Block::default()
            .title(format!("Score (game {})", orchestrator.games_started()))
            .borders(Borders::ALL),
    );
    frame.render_widget(score, area);
}

fn draw_transcript(frame: &mut Frame, area: Rect, lines: &[TranscriptLine]) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = lines.len().saturating_sub(visible);
    let text: Vec<Line> = lines[start..]
        .iter()
        .map(|line| Line::styled(line.text.clone(), transcript_style(line)))
        .collect();

    let transcript = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Transcript").borders(Borders::ALL));
    frame.render_widget(transcript, area);
}

fn transcript_style(line: &TranscriptLine) -> Style {
    match line.category {
        TranscriptCategory::ValidationError | TranscriptCategory::SystemError => {
            Style::default().fg(Color::Red)
        }
        TranscriptCategory::MoveAccepted => Style::default().fg(Color::Rgb(0xFF, 0xA5, 0x00)),
        TranscriptCategory::AgentText => line.side.map(side_style).unwrap_or_default(),
        TranscriptCategory::Notice => Style::default().fg(Color::Gray),
    }
}

fn side_style(side: Side) -> Style {
    match side {
        Side::Black => Style::default().fg(Color::Blue),
        Side::White => Style::default().fg(Color::Green),
    }
}

fn draw_confirmation(frame: &mut Frame, area: Rect, phase: Phase) {
    let headline = match phase {
        Phase::Won(side) => format!("{} wins!", side),
        _ => "Board full, it's a draw.".to_string(),
    };
    let popup = center_rect(area, 36, 5);
    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(headline, Style::default().add_modifier(Modifier::BOLD))),
        Line::from("Play again? (y/n)"),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().title("Game over").borders(Borders::ALL));

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
