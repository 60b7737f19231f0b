//! Draw detection logic.

use super::win::winner;
use crate::Board;
use tracing::instrument;

/// A board is drawn when nobody has won and every cell has been played.
#[instrument(skip(board), fields(moves = board.moves()))]
pub fn is_drawn(board: &Board) -> bool {
    winner(board).is_none() && board.moves() >= board.size() * board.size()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Token;

    #[test]
    fn test_empty_board_not_drawn() {
        let board = Board::new(3).unwrap();
        assert!(!is_drawn(&board));
    }

    #[test]
    fn test_full_board_without_line_is_drawn() {
        // X O X / X O O / O X X
        let layout = [
            [Token::X, Token::O, Token::X],
            [Token::X, Token::O, Token::O],
            [Token::O, Token::X, Token::X],
        ];
        let mut board = Board::new(3).unwrap();
        for (r, row) in layout.iter().enumerate() {
            for (c, &token) in row.iter().enumerate() {
                board.place_token(token, r + 1, c + 1).unwrap();
            }
        }
        assert!(is_drawn(&board));
        assert!(winner(&board).is_none());
    }

    #[test]
    fn test_full_board_with_line_is_not_drawn() {
        let mut board = Board::new(2).unwrap();
        board.place_token(Token::X, 1, 1).unwrap();
        board.place_token(Token::X, 1, 2).unwrap();
        board.place_token(Token::O, 2, 1).unwrap();
        board.place_token(Token::O, 2, 2).unwrap();
        assert!(!is_drawn(&board));
    }
}
