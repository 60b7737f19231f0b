//! Known losing positions.
//!
//! A loss repository is a set of board serializations that previously led
//! to a computer defeat. Backends may be volatile or durable; all of them
//! honor the same contract: `record` is idempotent and a `record` followed
//! by `contains` of the same key observes `true`.

use derive_more::{Display, Error};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Version of the key format produced by [`Board::serialize`](crate::Board::serialize).
///
/// Durable backends store it next to every key so a future change to the
/// serialization scheme can be told apart from existing rows.
pub const KEY_FORMAT_VERSION: i32 = 1;

/// Repository backend failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Repository error: {} at {}:{}", message, file, line)]
pub struct RepositoryError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RepositoryError {
    /// Creates a new repository error with caller location tracking.
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
}

/// Store of serialized positions tied to a computer loss.
pub trait LossRepository {
    /// Remembers `key` as a losing position. Recording a key twice is not
    /// an error.
    fn record(&mut self, key: &str) -> Result<(), RepositoryError>;

    /// Checks whether `key` was recorded.
    fn contains(&self, key: &str) -> Result<bool, RepositoryError>;

    /// Checks whether any of `keys` was recorded.
    ///
    /// Backends that can answer in a single round trip should override this.
    fn contains_any(&self, keys: &[String]) -> Result<bool, RepositoryError> {
        for key in keys {
            if self.contains(key)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Every recorded key, sorted.
    fn keys(&self) -> Result<Vec<String>, RepositoryError>;
}

impl<R: LossRepository + ?Sized> LossRepository for Box<R> {
    fn record(&mut self, key: &str) -> Result<(), RepositoryError> {
        (**self).record(key)
    }

    fn contains(&self, key: &str) -> Result<bool, RepositoryError> {
        (**self).contains(key)
    }

    fn contains_any(&self, keys: &[String]) -> Result<bool, RepositoryError> {
        (**self).contains_any(keys)
    }

    fn keys(&self) -> Result<Vec<String>, RepositoryError> {
        (**self).keys()
    }
}

/// Volatile loss repository that lives as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryLossRepository {
    positions: HashSet<String>,
}

impl MemoryLossRepository {
    /// Creates an empty repository.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Checks if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl LossRepository for MemoryLossRepository {
    #[instrument(skip(self))]
    fn record(&mut self, key: &str) -> Result<(), RepositoryError> {
        let inserted = self.positions.insert(key.to_string());
        debug!(inserted, total = self.positions.len(), "Losing position recorded");
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool, RepositoryError> {
        Ok(self.positions.contains(key))
    }

    fn keys(&self) -> Result<Vec<String>, RepositoryError> {
        let mut keys: Vec<String> = self.positions.iter().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_then_contains() {
        let mut repo = MemoryLossRepository::new();
        assert!(!repo.contains("0,1,0,0").unwrap());
        repo.record("0,1,0,0").unwrap();
        assert!(repo.contains("0,1,0,0").unwrap());
        assert!(!repo.contains("1,0,0,0").unwrap());
    }

    #[test]
    fn test_record_is_idempotent() {
        let mut repo = MemoryLossRepository::new();
        repo.record("1,0,0,-1").unwrap();
        repo.record("1,0,0,-1").unwrap();
        assert!(repo.contains("1,0,0,-1").unwrap());
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_contains_any() {
        let mut repo = MemoryLossRepository::new();
        repo.record("b").unwrap();
        let keys = vec!["a".to_string(), "b".to_string()];
        assert!(repo.contains_any(&keys).unwrap());
        assert!(!repo.contains_any(&keys[..1]).unwrap());
        assert!(!repo.contains_any(&[]).unwrap());
    }

    #[test]
    fn test_keys_sorted() {
        let mut repo = MemoryLossRepository::new();
        repo.record("z").unwrap();
        repo.record("a").unwrap();
        assert_eq!(repo.keys().unwrap(), vec!["a".to_string(), "z".to_string()]);
    }

    #[test]
    fn test_boxed_repository() {
        let mut repo: Box<dyn LossRepository> = Box::new(MemoryLossRepository::new());
        repo.record("k").unwrap();
        assert!(repo.contains("k").unwrap());
    }

    #[test]
    fn test_error_tracks_location() {
        let err = RepositoryError::new("disk on fire");
        assert!(err.line > 0);
        assert!(err.to_string().contains("disk on fire"));
    }
}
