//! One human-versus-computer match.
//!
//! The match owns the board, enforces turn order and terminality, and
//! remembers the board produced by the computer's most recent placement so
//! that position can be learned from if the human goes on to win.

use crate::board::{Board, BoardError, BoardStatus, Cell};
use crate::repository::{LossRepository, RepositoryError};
use crate::selector::{MoveChoice, MoveSelector, Selection};
use crate::token::Token;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Status of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// The game is ongoing.
    InProgress,
    /// The human completed a line.
    HumanWon,
    /// The computer completed a line.
    ComputerWon,
    /// The board filled up with no line.
    Drawn,
    /// The computer found no move outside its known losses.
    ComputerConceded,
}

impl MatchStatus {
    /// Checks if the match has ended.
    pub fn is_over(self) -> bool {
        self != MatchStatus::InProgress
    }
}

/// Error that can occur when making a move in a match.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The match has already ended.
    #[display("Game is already over")]
    GameOver,
    /// It is the other side's turn.
    #[display("It's not {_0}'s turn")]
    WrongTurn(#[error(not(source))] Token),
    /// The board rejected the placement.
    #[display("{_0}")]
    Board(BoardError),
}

impl From<BoardError> for MoveError {
    fn from(err: BoardError) -> Self {
        Self::Board(err)
    }
}

/// Outcome of the computer's turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputerTurn {
    /// Selector diagnostics for this turn.
    pub selection: Selection,
    /// Match status after the turn.
    pub status: MatchStatus,
}

/// State of a single match. X always moves first.
#[derive(Debug, Clone)]
pub struct Match {
    board: Board,
    human: Token,
    to_move: Token,
    status: MatchStatus,
    last_computer_board: Option<Board>,
}

impl Match {
    /// Starts a match on an empty board of `size`, with the human playing
    /// `human`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] if the size is invalid.
    #[instrument]
    pub fn new(size: usize, human: Token) -> Result<Self, BoardError> {
        info!(size, %human, "Starting match");
        Ok(Self {
            board: Board::new(size)?,
            human,
            to_move: Token::X,
            status: MatchStatus::InProgress,
            last_computer_board: None,
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the human's token.
    pub fn human(&self) -> Token {
        self.human
    }

    /// Returns the computer's token.
    pub fn computer(&self) -> Token {
        self.human.opponent()
    }

    /// Returns the token that moves next.
    pub fn to_move(&self) -> Token {
        self.to_move
    }

    /// Checks if the human moves next.
    pub fn is_human_turn(&self) -> bool {
        self.to_move == self.human
    }

    /// Returns the match status.
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Board as it stood right after the computer's most recent move.
    pub fn last_computer_board(&self) -> Option<&Board> {
        self.last_computer_board.as_ref()
    }

    fn ensure_turn(&self, token: Token) -> Result<(), MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        if self.to_move != token {
            return Err(MoveError::WrongTurn(token));
        }
        Ok(())
    }

    fn apply(&mut self, token: Token, cell: Cell) -> Result<MatchStatus, MoveError> {
        self.board.place_token(token, cell.row, cell.col)?;
        self.status = match self.board.status() {
            BoardStatus::Open => {
                self.to_move = token.opponent();
                MatchStatus::InProgress
            }
            BoardStatus::Won(winner) if winner == self.human => MatchStatus::HumanWon,
            BoardStatus::Won(_) => MatchStatus::ComputerWon,
            BoardStatus::Drawn => MatchStatus::Drawn,
        };
        Ok(self.status)
    }

    /// Places the human's token at `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if the match is over, it is the computer's
    /// turn, or the cell is occupied or off the board.
    #[instrument(skip(self), fields(human = %self.human))]
    pub fn human_move(&mut self, cell: Cell) -> Result<MatchStatus, MoveError> {
        self.ensure_turn(self.human)?;
        let status = self.apply(self.human, cell)?;
        info!(%cell, ?status, "Human moved");
        Ok(status)
    }

    /// Lets the computer choose and play its move.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if the match is over or it is the human's
    /// turn.
    #[instrument(skip(self, selector, repository, rng), fields(computer = %self.computer()))]
    pub fn computer_move<R, G>(
        &mut self,
        selector: &MoveSelector,
        repository: &R,
        rng: &mut G,
    ) -> Result<ComputerTurn, MoveError>
    where
        R: LossRepository + ?Sized,
        G: Rng + ?Sized,
    {
        let computer = self.computer();
        self.ensure_turn(computer)?;

        let selection = selector.select(&self.board, computer, repository, rng);
        let status = match *selection.choice() {
            MoveChoice::Play(cell) => {
                let status = self.apply(computer, cell)?;
                self.last_computer_board = Some(self.board.clone());
                info!(%cell, ?status, "Computer moved");
                status
            }
            MoveChoice::Concede => {
                self.status = MatchStatus::ComputerConceded;
                info!("Computer conceded");
                self.status
            }
        };

        Ok(ComputerTurn { selection, status })
    }

    /// Records the board left by the computer's last move as a losing
    /// position, if the human has won this match.
    ///
    /// Returns whether a position was recorded.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] if the backend fails. The match itself is
    /// unaffected.
    #[instrument(skip(self, repository), fields(status = ?self.status))]
    pub fn learn_from_loss<R>(&self, repository: &mut R) -> Result<bool, RepositoryError>
    where
        R: LossRepository + ?Sized,
    {
        if self.status != MatchStatus::HumanWon {
            return Ok(false);
        }
        let Some(board) = &self.last_computer_board else {
            return Ok(false);
        };
        let key = board.serialize();
        repository.record(&key)?;
        info!(%key, "Recorded losing position");
        Ok(true)
    }
}
