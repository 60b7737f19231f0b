//! Console tic-tac-toe against a computer that learns from its losses.
//!
//! # Architecture
//!
//! - **Config**: [`GameConfig`] read from TOML with CLI overrides
//! - **Console**: [`ConsoleGame`] drives matches over any reader and writer
//!
//! Game rules and move selection live in `wary_tictactoe`; the durable loss
//! repository lives in `wary_store`.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use wary_games::{ConsoleGame, GameConfig};
//! use wary_tictactoe::MemoryLossRepository;
//!
//! // Take the default board size, then close input at the token prompt.
//! let input: &[u8] = b"\n";
//! let mut game = ConsoleGame::new(input, Vec::new(), &GameConfig::default());
//! let mut repo = MemoryLossRepository::new();
//! let mut rng = ChaCha8Rng::seed_from_u64(1);
//! let scoreboard = game.run(&mut repo, &mut rng).unwrap();
//! assert_eq!(*scoreboard.games(), 0);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod console;

// Crate-level exports - Configuration
pub use config::{
    ConfigError, DEFAULT_CONFIG_FILE, GameConfig, MAX_ATTEMPTS_PER_CELL, MAX_BOARD_SIZE,
    MIN_BOARD_SIZE, StoreKind,
};

// Crate-level exports - Console front end
pub use console::{ConsoleError, ConsoleGame, Scoreboard, parse_coordinates};
