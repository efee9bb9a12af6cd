//! Strictly Gomoku - terminal front end
//!
//! Loads the match configuration, builds both agents and runs the TUI.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::{Path, PathBuf};
use strictly_arena::{ArenaConfig, PromptContext, SYSTEM_PROMPT};
use strictly_gomoku::{Board, Side};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            board_size,
            black_human,
            white_human,
            log_file,
        } => run_play(config, board_size, black_human, white_human, log_file).await,
        Command::Prompt { config, side } => run_prompt(&config, side.into()),
    }
}

/// Run the terminal UI
async fn run_play(
    config_path: PathBuf,
    board_size: Option<usize>,
    black_human: bool,
    white_human: bool,
    log_file: PathBuf,
) -> Result<()> {
    initialize_file_tracing(&log_file)?;
    info!("Starting Strictly Gomoku");

    let mut config = ArenaConfig::load_or_default(&config_path)?;
    if let Some(size) = board_size {
        config = config.with_board_size(size)?;
    }
    if black_human {
        config = config.with_human(Side::Black);
    }
    if white_human {
        config = config.with_human(Side::White);
    }

    let agents = config.build_agents()?;
    tui::run_tui(&config, agents).await
}

/// Print the prompt for an empty board
#[instrument(skip(config_path), fields(config_path = %config_path.display()))]
fn run_prompt(config_path: &Path, side: Side) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = ArenaConfig::load_or_default(config_path)?;
    let board = Board::new(*config.board_size());
    let context = PromptContext::new(&board, side);

    println!("[system]\n{}\n", SYSTEM_PROMPT);
    println!("[user]\n{}", context.user_message());
    Ok(())
}

/// Logs go to a file so they do not interfere with the TUI.
fn initialize_file_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,strictly_arena=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
