//! Win detection by extremal line sum.

use crate::{Board, Token};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Returns the token that owns a complete line, if any.
///
/// Every row, column and both diagonals are summed. The sum with the largest
/// magnitude is kept, the first one found winning ties (scan order row 1,
/// column 1, row 2, column 2, ..., main diagonal, anti-diagonal). A token
/// wins when that sum equals its weight times the board size. Only valid for
/// square boards holding `-1`, `0` and `+1`.
#[instrument(skip(board), fields(size = board.size()))]
pub fn winner(board: &Board) -> Option<Token> {
    let size = i32::try_from(board.size()).ok()?;

    let mut largest = 0i32;
    for sum in board.grid().line_sums() {
        if sum.abs() > largest.abs() {
            largest = sum;
        }
    }

    Token::iter().find(|token| token.weight() * size == largest)
}
