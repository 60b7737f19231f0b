//! Wary tic-tac-toe - an N×N game engine that learns from its losses.
//!
//! The computer opponent plays random legal moves, but it remembers every
//! position that led to one of its defeats and never walks into that
//! position again, nor into any rotation, reflection or color swap of it.
//!
//! # Architecture
//!
//! - **Grid**: square matrix of signed cells with geometric transforms
//! - **Symmetry**: the eight dihedral images of a grid, serialized
//! - **Board**: token placement plus win/draw detection by line sums
//! - **Repository**: the set of known losing positions
//! - **Selector**: random move selection that avoids known losses
//! - **Session**: one human-versus-computer match
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use wary_tictactoe::{Board, MemoryLossRepository, MoveChoice, MoveSelector, Token};
//!
//! let board = Board::new(3)?;
//! let repository = MemoryLossRepository::new();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!
//! let selection = MoveSelector::default().select(&board, Token::O, &repository, &mut rng);
//! assert!(matches!(selection.choice(), MoveChoice::Play(_)));
//! # Ok::<(), wary_tictactoe::BoardError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod grid;
mod repository;
mod rules;
mod selector;
mod session;
mod symmetry;
mod token;

pub use board::{Board, BoardError, BoardStatus, Cell};
pub use grid::{Grid, GridError};
pub use repository::{KEY_FORMAT_VERSION, LossRepository, MemoryLossRepository, RepositoryError};
pub use rules::{is_drawn, winner};
pub use selector::{DEFAULT_ATTEMPTS_PER_CELL, MoveChoice, MoveSelector, Selection};
pub use session::{ComputerTurn, Match, MatchStatus, MoveError};
pub use symmetry::{Symmetry, equivalent_serializations};
pub use token::Token;
