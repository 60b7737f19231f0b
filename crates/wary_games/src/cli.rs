//! Command-line interface for wary_games.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wary_tictactoe::Token;

/// Wary Games - tic-tac-toe against a computer that never falls for the same trick twice
#[derive(Parser, Debug)]
#[command(name = "wary_games")]
#[command(about = "Console tic-tac-toe that learns from its losses", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactive games in the console
    Play {
        /// Board size (skips the size prompt)
        #[arg(short, long)]
        size: Option<usize>,

        /// Token to play as, X or O (skips the token prompt)
        #[arg(short, long)]
        token: Option<Token>,

        /// Keep losing positions in memory only
        #[arg(long)]
        memory: bool,

        /// Path to the database file (created if it doesn't exist)
        #[arg(long)]
        db_path: Option<String>,

        /// Seed for reproducible computer moves
        #[arg(long)]
        seed: Option<u64>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List recorded losing positions
    Positions {
        /// Path to the database file
        #[arg(long)]
        db_path: Option<String>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Delete every recorded losing position
    Forget {
        /// Path to the database file
        #[arg(long)]
        db_path: Option<String>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
