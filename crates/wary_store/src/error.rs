//! Loss store error types.

use derive_more::{Display, Error};
use std::fmt::Display as FmtDisplay;
use tracing::instrument;
use wary_tictactoe::RepositoryError;

/// Failure of the SQLite loss store, tagged with where it was raised.
#[derive(Debug, Clone, Display, Error)]
#[display("Loss store error: {} at {}:{}", message, file, line)]
pub struct DbError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Error for a schema migration that could not be applied.
    #[track_caller]
    pub fn migration(err: impl FmtDisplay) -> Self {
        Self::new(format!("Migration failed: {}", err))
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Query failed: {}", err))
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Connection failed: {}", err))
    }
}

// Keeps the location of the store failure rather than the conversion site.
impl From<DbError> for RepositoryError {
    fn from(err: DbError) -> Self {
        RepositoryError {
            message: err.message,
            line: err.line,
            file: err.file,
        }
    }
}
