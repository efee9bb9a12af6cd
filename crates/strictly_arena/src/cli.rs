//! Command-line interface for strictly_gomoku.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use strictly_gomoku::Side;

/// Strictly Gomoku - five-in-a-row between humans and LLM agents
#[derive(Parser, Debug)]
#[command(name = "strictly_gomoku")]
#[command(about = "Five-in-a-row where either side can be an LLM", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Path to match configuration file
        #[arg(short, long, default_value = "gomoku.toml")]
        config: PathBuf,

        /// Override the board size
        #[arg(long)]
        board_size: Option<usize>,

        /// Play black yourself
        #[arg(long)]
        black_human: bool,

        /// Play white yourself
        #[arg(long)]
        white_human: bool,

        /// Where to write logs (the terminal is taken by the UI)
        #[arg(long, default_value = "strictly_gomoku.log")]
        log_file: PathBuf,
    },

    /// Print the prompt an agent would receive for an empty board
    Prompt {
        /// Path to match configuration file
        #[arg(short, long, default_value = "gomoku.toml")]
        config: PathBuf,

        /// Side the agent plays
        #[arg(long, value_enum, default_value_t = SideArg::Black)]
        side: SideArg,
    },
}

/// Side selection on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SideArg {
    /// Black
    Black,
    /// White
    White,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Black => Side::Black,
            SideArg::White => Side::White,
        }
    }
}
