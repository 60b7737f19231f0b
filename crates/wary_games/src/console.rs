//! Line-oriented console front end.
//!
//! Reads answers from any [`BufRead`] and writes prompts to any [`Write`],
//! so a whole session can be scripted in tests. End of input at any prompt
//! ends the session.

use crate::config::{GameConfig, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use derive_getters::Getters;
use derive_more::{Display, Error, From};
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, warn};
use wary_tictactoe::{
    BoardError, Cell, LossRepository, Match, MatchStatus, MoveChoice, MoveError, MoveSelector,
    Token,
};

/// Error that ends a console session.
#[derive(Debug, Display, Error, From)]
pub enum ConsoleError {
    /// Reading input or writing output failed.
    #[display("Console I/O failed: {_0}")]
    Io(std::io::Error),
    /// A match could not be set up.
    #[display("{_0}")]
    Board(BoardError),
    /// A validated move was refused.
    #[display("{_0}")]
    Move(MoveError),
}

/// Results of the matches finished in one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct Scoreboard {
    /// Matches played to the end.
    games: usize,
    /// Matches the human won.
    human_wins: usize,
    /// Matches the computer won.
    computer_wins: usize,
    /// Matches that filled the board.
    draws: usize,
    /// Matches the computer gave up.
    concessions: usize,
}

impl Scoreboard {
    fn tally(&mut self, status: MatchStatus) {
        let counter = match status {
            MatchStatus::HumanWon => &mut self.human_wins,
            MatchStatus::ComputerWon => &mut self.computer_wins,
            MatchStatus::Drawn => &mut self.draws,
            MatchStatus::ComputerConceded => &mut self.concessions,
            MatchStatus::InProgress => return,
        };
        *counter += 1;
        self.games += 1;
    }
}

/// Parses `"row, col"` into 1-based coordinates.
pub fn parse_coordinates(input: &str) -> Option<(usize, usize)> {
    let (row, col) = input.split_once(',')?;
    let parse = |s: &str| {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse::<usize>().ok()
    };
    Some((parse(row)?, parse(col)?))
}

/// Interactive tic-tac-toe session against the computer.
#[derive(Debug)]
pub struct ConsoleGame<R, W> {
    input: R,
    output: W,
    selector: MoveSelector,
    default_size: usize,
    fixed_size: Option<usize>,
    fixed_token: Option<Token>,
}

impl<R: BufRead, W: Write> ConsoleGame<R, W> {
    /// Creates a session reading from `input` and writing to `output`.
    ///
    /// The configured board size is offered as the default answer to the
    /// size prompt. A configured human token skips the token prompt.
    #[instrument(skip(input, output, config))]
    pub fn new(input: R, output: W, config: &GameConfig) -> Self {
        Self {
            input,
            output,
            selector: MoveSelector::new(*config.attempts_per_cell()),
            default_size: *config.board_size(),
            fixed_size: None,
            fixed_token: *config.human_token(),
        }
    }

    /// Plays every match on a `size`×`size` board without asking.
    pub fn with_fixed_size(mut self, size: usize) -> Self {
        self.fixed_size = Some(size);
        self
    }

    /// Consumes the session, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<Option<String>, ConsoleError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("Input closed");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Runs matches until the player declines a rematch or input ends.
    ///
    /// After every human win the board left by the computer's last move is
    /// recorded in `repository`. A failure to record is logged and the
    /// session goes on.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] if the console cannot be read or written.
    #[instrument(skip_all)]
    pub fn run<L, G>(&mut self, repository: &mut L, rng: &mut G) -> Result<Scoreboard, ConsoleError>
    where
        L: LossRepository + ?Sized,
        G: Rng + ?Sized,
    {
        writeln!(self.output, "Welcome to tic-tac-toe. Shall we play a game?")?;
        let mut scoreboard = Scoreboard::default();

        loop {
            let Some(size) = self.ask_size()? else {
                break;
            };
            let Some(human) = self.ask_token()? else {
                break;
            };
            let Some(status) = self.play_match(size, human, repository, rng)? else {
                break;
            };
            scoreboard.tally(status);

            writeln!(self.output, "Would you like to play again?")?;
            match self.read_line()? {
                Some(answer) if answer.starts_with(['y', 'Y']) => continue,
                _ => break,
            }
        }

        info!(?scoreboard, "Session finished");
        Ok(scoreboard)
    }

    fn ask_size(&mut self) -> Result<Option<usize>, ConsoleError> {
        if let Some(size) = self.fixed_size {
            return Ok(Some(size));
        }
        writeln!(
            self.output,
            "Enter desired board size. (Press enter for {})",
            self.default_size
        )?;
        loop {
            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(Some(self.default_size));
            }
            match answer.parse::<usize>() {
                Ok(size) if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) => {
                    return Ok(Some(size));
                }
                _ => writeln!(
                    self.output,
                    "Please enter a valid number from {} to {}.",
                    MIN_BOARD_SIZE, MAX_BOARD_SIZE
                )?,
            }
        }
    }

    fn ask_token(&mut self) -> Result<Option<Token>, ConsoleError> {
        if let Some(token) = self.fixed_token {
            writeln!(self.output, "You play {}.", token)?;
            return Ok(Some(token));
        }
        writeln!(self.output, "Would you like to play as X or O? (X goes first)")?;
        loop {
            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };
            match answer.parse::<Token>() {
                Ok(token) => return Ok(Some(token)),
                Err(_) => writeln!(self.output, "Please enter X or O.")?,
            }
        }
    }

    fn ask_move(&mut self, game: &Match) -> Result<Option<Cell>, ConsoleError> {
        let size = game.board().size();
        writeln!(
            self.output,
            "Where would you like to place your {}? Enter coordinates like 1, 1.",
            game.human()
        )?;
        loop {
            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };
            let Some((row, col)) = parse_coordinates(&answer) else {
                writeln!(self.output, "Please enter coordinates like 1, 1.")?;
                continue;
            };
            if !(1..=size).contains(&row) || !(1..=size).contains(&col) {
                writeln!(self.output, "Please enter coordinates between 1 and {}.", size)?;
                continue;
            }
            let cell = Cell::new(row, col);
            if !game.board().is_empty(cell) {
                writeln!(self.output, "Please enter coordinates of an empty position.")?;
                continue;
            }
            return Ok(Some(cell));
        }
    }

    /// Plays one match. Returns `None` if input ended before it finished.
    #[instrument(skip(self, repository, rng))]
    fn play_match<L, G>(
        &mut self,
        size: usize,
        human: Token,
        repository: &mut L,
        rng: &mut G,
    ) -> Result<Option<MatchStatus>, ConsoleError>
    where
        L: LossRepository + ?Sized,
        G: Rng + ?Sized,
    {
        let mut game = Match::new(size, human)?;
        writeln!(self.output, "Let's play!")?;
        writeln!(self.output, "{}", game.board())?;

        loop {
            if game.is_human_turn() {
                let Some(cell) = self.ask_move(&game)? else {
                    info!("Match abandoned");
                    return Ok(None);
                };
                game.human_move(cell)?;
            } else {
                let turn = game.computer_move(&self.selector, &*repository, rng)?;
                if *turn.selection.choice() == MoveChoice::Concede {
                    break;
                }
                writeln!(self.output, "The computer places a token:")?;
            }
            writeln!(self.output, "{}", game.board())?;
            if game.status().is_over() {
                break;
            }
        }

        match game.status() {
            MatchStatus::HumanWon => {
                writeln!(self.output, "You won! Congratulations!")?;
                if let Err(e) = game.learn_from_loss(repository) {
                    warn!(error = %e, "Could not record losing position");
                    writeln!(self.output, "(I could not remember this loss: {})", e.message)?;
                }
            }
            MatchStatus::ComputerWon => {
                writeln!(self.output, "You lost! How about a nice game of chess?")?;
            }
            MatchStatus::Drawn => writeln!(self.output, "The game is a draw. Good game!")?,
            MatchStatus::ComputerConceded => writeln!(
                self.output,
                "I concede! The only winning move is not to play."
            )?,
            MatchStatus::InProgress => {}
        }
        Ok(Some(game.status()))
    }
}
