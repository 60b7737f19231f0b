//! Wary Games - Unified CLI
//!
//! Console tic-tac-toe with a persistent memory of lost positions.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use wary_games::{ConsoleGame, GameConfig, StoreKind};
use wary_store::SqliteLossRepository;
use wary_tictactoe::{LossRepository, MemoryLossRepository, Token};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the board on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,wary_games=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            size,
            token,
            memory,
            db_path,
            seed,
            config,
        } => run_play(size, token, memory, db_path, seed, config),
        Command::Positions { db_path, config } => run_positions(db_path, config),
        Command::Forget { db_path, config } => run_forget(db_path, config),
    }
}

/// Loads the config file and applies the database path override.
fn load_config(db_path: Option<String>, config: Option<PathBuf>) -> Result<GameConfig> {
    let mut config = GameConfig::load(config.as_deref())?;
    if let Some(path) = db_path {
        config = config.with_db_path(path);
    }
    Ok(config)
}

/// Run interactive console games
#[instrument(skip(db_path, config))]
fn run_play(
    size: Option<usize>,
    token: Option<Token>,
    memory: bool,
    db_path: Option<String>,
    seed: Option<u64>,
    config: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config(db_path, config)?;
    if let Some(size) = size {
        config = config.with_board_size(size);
    }
    if let Some(token) = token {
        config = config.with_human_token(token);
    }
    if memory {
        config = config.with_store(StoreKind::Memory);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    config.validate()?;

    let mut repository: Box<dyn LossRepository> = match config.store() {
        StoreKind::Memory => Box::new(MemoryLossRepository::new()),
        StoreKind::Sqlite => Box::new(SqliteLossRepository::open(config.db_path().clone())?),
    };
    info!(store = %config.store(), db_path = %config.db_path(), "Loss repository ready");

    let mut rng = match config.seed() {
        Some(seed) => ChaCha8Rng::seed_from_u64(*seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let stdin = std::io::stdin();
    let mut game = ConsoleGame::new(stdin.lock(), std::io::stdout(), &config);
    if size.is_some() {
        game = game.with_fixed_size(*config.board_size());
    }

    let scoreboard = game.run(&mut repository, &mut rng)?;
    info!(
        games = scoreboard.games(),
        human_wins = scoreboard.human_wins(),
        computer_wins = scoreboard.computer_wins(),
        draws = scoreboard.draws(),
        concessions = scoreboard.concessions(),
        "Thanks for playing"
    );
    Ok(())
}

/// List recorded losing positions
#[instrument]
fn run_positions(db_path: Option<String>, config: Option<PathBuf>) -> Result<()> {
    let config = load_config(db_path, config)?;
    let repository = SqliteLossRepository::open(config.db_path().clone())?;

    let positions = repository.positions()?;
    for position in &positions {
        println!(
            "{}  v{}  {}",
            position.recorded_at(),
            position.key_format(),
            position.board_key()
        );
    }
    println!("{} losing position(s) in {}", positions.len(), repository.db_path());
    Ok(())
}

/// Delete every recorded losing position
#[instrument]
fn run_forget(db_path: Option<String>, config: Option<PathBuf>) -> Result<()> {
    let config = load_config(db_path, config)?;
    let repository = SqliteLossRepository::open(config.db_path().clone())?;

    let removed = repository.clear()?;
    println!("Forgot {} losing position(s).", removed);
    Ok(())
}
