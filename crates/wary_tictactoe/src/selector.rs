//! Random move selection that steers clear of known losses.

use crate::board::{Board, Cell};
use crate::repository::LossRepository;
use crate::token::Token;
use derive_getters::Getters;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, instrument, warn};

/// Attempts allowed per board cell before the selector gives up.
pub const DEFAULT_ATTEMPTS_PER_CELL: usize = 10;

/// What the selector decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveChoice {
    /// Play this empty cell.
    Play(Cell),
    /// No move outside the known losses was found within the attempt
    /// budget. This is a heuristic verdict: the computer concedes.
    Concede,
}

/// Result of one selection, with the diagnostics gathered on the way.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Selection {
    /// The chosen move or a concession.
    choice: MoveChoice,
    /// Number of candidates sampled.
    attempts: usize,
    /// Candidates rejected because they lead to a recorded loss.
    rejected: usize,
    /// Repository lookups that failed; such candidates were treated as
    /// not known to lose.
    lookup_failures: usize,
}

/// Picks uniformly random legal moves, skipping any move whose resulting
/// board (in any orientation or color assignment) is a recorded loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSelector {
    attempts_per_cell: usize,
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::new(DEFAULT_ATTEMPTS_PER_CELL)
    }
}

impl MoveSelector {
    /// Creates a selector allowing `attempts_per_cell × N²` attempts on an
    /// N×N board.
    #[instrument]
    pub fn new(attempts_per_cell: usize) -> Self {
        Self { attempts_per_cell }
    }

    /// Returns the attempt budget for a board of the given size, saturating
    /// at `usize::MAX`.
    pub fn budget(&self, size: usize) -> usize {
        self.attempts_per_cell
            .saturating_mul(size)
            .saturating_mul(size)
    }

    /// Chooses where `token` should be placed on `board`.
    ///
    /// Candidates are evaluated on clones; neither `board` nor `repository`
    /// is modified.
    #[instrument(skip(self, board, repository, rng), fields(size = board.size(), moves = board.moves()))]
    pub fn select<R, G>(&self, board: &Board, token: Token, repository: &R, rng: &mut G) -> Selection
    where
        R: LossRepository + ?Sized,
        G: Rng + ?Sized,
    {
        let candidates = board.empty_cells();
        let budget = self.budget(board.size());
        let mut attempts = 0;
        let mut rejected = 0;
        let mut lookup_failures = 0;

        while attempts < budget {
            let Some(&cell) = candidates.choose(rng) else {
                break;
            };
            attempts += 1;

            let mut proposed = board.clone();
            if let Err(e) = proposed.place_token(token, cell.row, cell.col) {
                warn!(%cell, error = %e, "Candidate could not be placed");
                continue;
            }

            let keys: Vec<String> = proposed.all_equivalent_serializations().into_iter().collect();
            match repository.contains_any(&keys) {
                Ok(true) => {
                    rejected += 1;
                    debug!(%cell, "Avoiding known losing move");
                }
                Ok(false) => {
                    debug!(%cell, attempts, "Move selected");
                    return Selection {
                        choice: MoveChoice::Play(cell),
                        attempts,
                        rejected,
                        lookup_failures,
                    };
                }
                Err(e) => {
                    lookup_failures += 1;
                    warn!(%cell, error = %e, "Loss lookup failed, accepting move unchecked");
                    return Selection {
                        choice: MoveChoice::Play(cell),
                        attempts,
                        rejected,
                        lookup_failures,
                    };
                }
            }
        }

        info!(attempts, rejected, "No safe move found, conceding");
        Selection {
            choice: MoveChoice::Concede,
            attempts,
            rejected,
            lookup_failures,
        }
    }
}
