//! Game board: a grid of tokens plus a move counter.

use crate::grid::{Grid, GridError};
use crate::rules;
use crate::symmetry::equivalent_serializations;
use crate::token::Token;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// A 1-indexed board coordinate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, new, derive_more::Display,
)]
#[display("({row}, {col})")]
pub struct Cell {
    /// Row, starting at 1.
    pub row: usize,
    /// Column, starting at 1.
    pub col: usize,
}

/// Errors raised when placing a token.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// The target cell already holds a token.
    #[display("Position ({row}, {col}) is already occupied")]
    Occupied {
        /// Row of the occupied cell.
        row: usize,
        /// Column of the occupied cell.
        col: usize,
    },
    /// The underlying grid rejected the access.
    #[display("{_0}")]
    Grid(GridError),
}

impl From<GridError> for BoardError {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

/// Where a board stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardStatus {
    /// Moves can still be made.
    Open,
    /// A token owns a full line.
    Won(Token),
    /// Every cell is filled and nobody won.
    Drawn,
}

/// N×N tic-tac-toe board.
///
/// The move count always equals the number of occupied cells; cells are
/// never cleared once played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    moves: usize,
}

impl Board {
    /// Creates an empty board of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Grid`] when `size` is zero or `size × size`
    /// overflows.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, BoardError> {
        Ok(Self {
            grid: Grid::new(size)?,
            moves: 0,
        })
    }

    /// Returns the board size.
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Returns the number of tokens placed so far.
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Returns the underlying grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Places `token` at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Occupied`] if the cell already holds a token,
    /// or [`BoardError::Grid`] if the coordinates are off the board.
    #[instrument(skip(self), fields(size = self.size()))]
    pub fn place_token(&mut self, token: Token, row: usize, col: usize) -> Result<(), BoardError> {
        if self.grid.get(row, col)? != 0 {
            return Err(BoardError::Occupied { row, col });
        }
        self.grid.set(row, col, token.weight())?;
        self.moves += 1;
        debug!(moves = self.moves, "Token placed");
        Ok(())
    }

    /// Returns the token at `(row, col)`, or `None` for an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if the coordinates are off the board.
    pub fn token_at(&self, row: usize, col: usize) -> Result<Option<Token>, GridError> {
        Ok(Token::from_weight(self.grid.get(row, col)?))
    }

    /// Checks if the cell is on the board and empty.
    pub fn is_empty(&self, cell: Cell) -> bool {
        matches!(self.grid.get(cell.row, cell.col), Ok(0))
    }

    /// All empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Cell> {
        let size = self.size();
        self.grid
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, value)| **value == 0)
            .map(|(i, _)| Cell::new(i / size + 1, i % size + 1))
            .collect()
    }

    /// Returns the token owning a full line, if any.
    pub fn winner(&self) -> Option<Token> {
        rules::winner(self)
    }

    /// Checks if either token has won.
    pub fn is_won(&self) -> bool {
        self.winner().is_some()
    }

    /// Checks if the board is full with no winner.
    pub fn is_drawn(&self) -> bool {
        rules::is_drawn(self)
    }

    /// Returns the lifecycle state of the board.
    pub fn status(&self) -> BoardStatus {
        match self.winner() {
            Some(token) => BoardStatus::Won(token),
            None if self.is_drawn() => BoardStatus::Drawn,
            None => BoardStatus::Open,
        }
    }

    /// Serialization of the board exactly as laid out.
    pub fn serialize(&self) -> String {
        self.grid.serialize()
    }

    /// Every serialization equivalent to this board: the eight symmetric
    /// images of the grid and the eight images of its color-swapped twin.
    #[instrument(skip(self), fields(size = self.size(), moves = self.moves))]
    pub fn all_equivalent_serializations(&self) -> BTreeSet<String> {
        let mut swapped = self.grid.clone();
        swapped.negate();

        let mut keys: BTreeSet<String> = equivalent_serializations(&self.grid).into_iter().collect();
        keys.extend(equivalent_serializations(&swapped));
        debug!(count = keys.len(), "Equivalent serializations computed");
        keys
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size = self.size();
        let divider = "-".repeat(4 * size - 3);
        for (i, row) in self.grid.cells().chunks(size).enumerate() {
            if i > 0 {
                write!(f, "\n{divider}\n")?;
            }
            let labels: Vec<&str> = row.iter().map(|&v| Token::label_for(v)).collect();
            write!(f, "{}", labels.join(" | "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_open() {
        let board = Board::new(3).unwrap();
        assert_eq!(board.moves(), 0);
        assert_eq!(board.status(), BoardStatus::Open);
        assert_eq!(board.empty_cells().len(), 9);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(Board::new(0), Err(BoardError::Grid(GridError::ZeroSize)));
    }

    #[test]
    fn test_overflowing_size_rejected() {
        let size = usize::MAX;
        assert_eq!(
            Board::new(size),
            Err(BoardError::Grid(GridError::TooLarge { size }))
        );
    }

    #[test]
    fn test_place_and_read_token() {
        let mut board = Board::new(3).unwrap();
        board.place_token(Token::X, 2, 3).unwrap();
        assert_eq!(board.token_at(2, 3), Ok(Some(Token::X)));
        assert_eq!(board.token_at(1, 1), Ok(None));
        assert_eq!(board.moves(), 1);
        assert!(!board.is_empty(Cell::new(2, 3)));
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut board = Board::new(3).unwrap();
        board.place_token(Token::X, 1, 1).unwrap();
        let err = board.place_token(Token::O, 1, 1).unwrap_err();
        assert_eq!(err, BoardError::Occupied { row: 1, col: 1 });
        assert_eq!(board.moves(), 1);
        assert_eq!(board.token_at(1, 1), Ok(Some(Token::X)));
    }

    #[test]
    fn test_out_of_range_is_distinct_from_occupied() {
        let mut board = Board::new(3).unwrap();
        let err = board.place_token(Token::X, 4, 1).unwrap_err();
        assert!(matches!(err, BoardError::Grid(GridError::IndexOutOfRange { index: 4, .. })));
        assert_eq!(board.moves(), 0);
        assert!(!board.is_empty(Cell::new(0, 1)));
    }

    #[test]
    fn test_empty_cells_skip_occupied() {
        let mut board = Board::new(2).unwrap();
        board.place_token(Token::O, 1, 2).unwrap();
        assert_eq!(
            board.empty_cells(),
            vec![Cell::new(1, 1), Cell::new(2, 1), Cell::new(2, 2)]
        );
    }

    #[test]
    fn test_move_count_matches_occupied_cells() {
        let mut board = Board::new(3).unwrap();
        board.place_token(Token::X, 1, 1).unwrap();
        board.place_token(Token::O, 3, 3).unwrap();
        let _ = board.place_token(Token::X, 3, 3);
        let occupied = board.grid().cells().iter().filter(|&&c| c != 0).count();
        assert_eq!(board.moves(), occupied);
    }

    #[test]
    fn test_won_status() {
        let mut board = Board::new(2).unwrap();
        board.place_token(Token::O, 1, 1).unwrap();
        board.place_token(Token::O, 2, 2).unwrap();
        assert_eq!(board.status(), BoardStatus::Won(Token::O));
        assert!(board.is_won());
        assert!(!board.is_drawn());
    }

    #[test]
    fn test_equivalents_include_color_swap() {
        let mut board = Board::new(3).unwrap();
        board.place_token(Token::X, 1, 1).unwrap();
        board.place_token(Token::O, 1, 2).unwrap();
        let keys = board.all_equivalent_serializations();
        assert!(keys.contains(&board.serialize()));
        assert!(keys.contains("-1,1,0,0,0,0,0,0,0"));
        assert_eq!(keys.len(), 16);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(2).unwrap();
        board.place_token(Token::X, 1, 1).unwrap();
        board.place_token(Token::O, 2, 2).unwrap();
        assert_eq!(board.to_string(), "X |  \n-----\n  | O");
    }
}
