//! Player tokens and their cell weights.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A marker placed on the board by one of the two sides.
///
/// Each token carries a weight of equal magnitude and opposite sign. A full
/// line of one token on an N×N board therefore sums to `N * weight`, which is
/// what win detection looks for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Token {
    /// Token X (moves first).
    #[display("X")]
    X,
    /// Token O.
    #[display("O")]
    O,
}

impl Token {
    /// Returns the signed cell value written for this token.
    pub fn weight(self) -> i32 {
        match self {
            Token::X => 1,
            Token::O => -1,
        }
    }

    /// Maps a stored cell value back to a token; `None` for empty or
    /// unknown values.
    #[instrument]
    pub fn from_weight(weight: i32) -> Option<Self> {
        match weight {
            1 => Some(Token::X),
            -1 => Some(Token::O),
            _ => None,
        }
    }

    /// Returns the opposing token.
    pub fn opponent(self) -> Self {
        match self {
            Token::X => Token::O,
            Token::O => Token::X,
        }
    }

    /// Display label for a raw cell value: `"X"`, `"O"` or a blank.
    pub fn label_for(weight: i32) -> &'static str {
        match Self::from_weight(weight) {
            Some(Token::X) => "X",
            Some(Token::O) => "O",
            None => " ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_weights_are_opposite() {
        assert_eq!(Token::X.weight(), -Token::O.weight());
        assert_ne!(Token::X.weight(), 0);
    }

    #[test]
    fn test_weight_round_trips() {
        for token in Token::iter() {
            assert_eq!(Token::from_weight(token.weight()), Some(token));
        }
        assert_eq!(Token::from_weight(0), None);
        assert_eq!(Token::from_weight(2), None);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Token::X.opponent(), Token::O);
        assert_eq!(Token::O.opponent(), Token::X);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Token::X.to_string(), "X");
        assert_eq!(Token::O.to_string(), "O");
        assert_eq!(Token::label_for(0), " ");
        assert_eq!(Token::label_for(-1), "O");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Token::from_str("x"), Ok(Token::X));
        assert_eq!(Token::from_str("O"), Ok(Token::O));
        assert!(Token::from_str("z").is_err());
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&Token::O).unwrap();
        assert_eq!(serde_json::from_str::<Token>(&json).unwrap(), Token::O);
    }
}
