//! Terminal UI for Strictly Gomoku

mod app;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use strictly_arena::{Agent, ArenaConfig, Orchestrator, Phase, SideMap};
use tracing::{debug, error, info, instrument};

use app::App;

/// Run the TUI until the user quits or declines another game.
pub async fn run_tui(config: &ArenaConfig, agents: SideMap<Agent>) -> Result<()> {
    info!("Starting Strictly Gomoku TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let orchestrator = Orchestrator::new(config.match_settings(), agents);
    let mut app = App::new(orchestrator);

    let res = run_game(&mut terminal, &mut app, config.poll_interval()).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "Game loop error");
        eprintln!("Error: {:?}", err);
    }

    let score = app.orchestrator().score();
    info!(%score, "Session ended");
    println!("Final score - {}", score);

    Ok(())
}

/// Control loop: tick, draw, then wait up to one interval for input.
#[instrument(skip_all, fields(poll_ms = poll_interval.as_millis()))]
async fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    poll_interval: Duration,
) -> Result<()> {
    loop {
        if app.tick() == Phase::Terminated {
            info!("Match terminated");
            return Ok(());
        }

        let mut geometry = None;
        terminal.draw(|f| geometry = Some(ui::draw(f, &*app)))?;
        if let Some(geometry) = geometry {
            app.set_geometry(geometry);
        }

        if !event::poll(poll_interval)? {
            // Let dispatch tasks make progress between frames.
            tokio::task::yield_now().await;
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    info!("User quit");
                    return Ok(());
                }
                KeyCode::Char('y') => app.confirm(true),
                KeyCode::Char('n') => app.confirm(false),
                KeyCode::Char('m') => app.new_match(),
                KeyCode::Char('s') => app.toggle_steps(),
                other => debug!(?other, "Unbound key"),
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved => app.pointer_moved(mouse.column, mouse.row),
                MouseEventKind::Down(MouseButton::Left) => {
                    app.pointer_pressed(mouse.column, mouse.row)
                }
                _ => {}
            },
            _ => {}
        }
    }
}
