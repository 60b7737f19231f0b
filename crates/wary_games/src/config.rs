//! Game configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};
use wary_tictactoe::{DEFAULT_ATTEMPTS_PER_CELL, Token};

/// Config file read from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "wary_games.toml";

/// Smallest board the console will play on.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest board the console will play on.
pub const MAX_BOARD_SIZE: usize = 32;

/// Upper bound for `attempts_per_cell`.
pub const MAX_ATTEMPTS_PER_CELL: usize = 1000;

/// Where losing positions are kept.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreKind {
    /// Forget everything when the process exits.
    Memory,
    /// SQLite database file.
    #[default]
    Sqlite,
}

/// Settings for a console session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Board size offered when the player just presses enter.
    #[serde(default = "default_board_size")]
    board_size: usize,

    /// Selector attempts per board cell before the computer concedes.
    #[serde(default = "default_attempts_per_cell")]
    attempts_per_cell: usize,

    /// Repository backend.
    #[serde(default)]
    store: StoreKind,

    /// SQLite database path, used when `store` is `sqlite`.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Fixed RNG seed for reproducible games.
    #[serde(default)]
    #[setters(strip_option)]
    seed: Option<u64>,

    /// Token the human plays. Asked for each game when unset.
    #[serde(default)]
    #[setters(strip_option)]
    human_token: Option<Token>,
}

#[instrument]
fn default_board_size() -> usize {
    3
}

#[instrument]
fn default_attempts_per_cell() -> usize {
    DEFAULT_ATTEMPTS_PER_CELL
}

#[instrument]
fn default_db_path() -> String {
    "tictactoe.db".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            attempts_per_cell: default_attempts_per_cell(),
            store: StoreKind::default(),
            db_path: default_db_path(),
            seed: None,
            human_token: None,
        }
    }
}

impl GameConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed, or holds
    /// invalid values.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(board_size = config.board_size, store = %config.store, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given, otherwise [`DEFAULT_CONFIG_FILE`] if it exists,
    /// otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a config file is present but unusable.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Checks that the values describe a playable game.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::new(format!(
                "board_size must be between {} and {}, got {}",
                MIN_BOARD_SIZE, MAX_BOARD_SIZE, self.board_size
            )));
        }
        if !(1..=MAX_ATTEMPTS_PER_CELL).contains(&self.attempts_per_cell) {
            return Err(ConfigError::new(format!(
                "attempts_per_cell must be between 1 and {}, got {}",
                MAX_ATTEMPTS_PER_CELL, self.attempts_per_cell
            )));
        }
        if self.store == StoreKind::Sqlite && self.db_path.trim().is_empty() {
            return Err(ConfigError::new("db_path must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
