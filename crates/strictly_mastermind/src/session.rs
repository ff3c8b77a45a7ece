//! The session state machine.
//!
//! A [`GameSession`] owns one secret and one move log from `start` to a
//! terminal outcome. Starting again replaces the whole session.
//!
//! ```text
//!              submit (exact == slots)
//!   InProgress ───────────────────────────▶ Won
//!       │  │     submit (last move, miss)
//!       │  └─────────────────────────────▶ Lost
//!       │        resign (after a guess)
//!       └────────────────────────────────▶ Resigned
//! ```

use super::action::{GameError, Move};
use super::config::{ConfigError, GameConfig};
use super::contracts::{Contract, ResignContract, SubmitGuessContract};
use super::log::MoveLog;
use super::rules;
use super::secret::SecretGenerator;
use super::types::{Color, Guess, Secret};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Status {
    /// Guesses are being accepted.
    InProgress,
    /// The secret was matched exactly.
    Won,
    /// The move budget ran out.
    Lost,
    /// The player gave up.
    Resigned,
}

impl Status {
    /// True for `Won`, `Lost` and `Resigned`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::InProgress)
    }

    /// True only for `Won`.
    pub fn is_won(self) -> bool {
        matches!(self, Status::Won)
    }

    /// True for `Lost` and `Resigned`, which reveal the secret the same way.
    pub fn is_lost(self) -> bool {
        matches!(self, Status::Lost | Status::Resigned)
    }
}

/// Read-only projection of a session for presentation layers.
///
/// `secret` is `Some` only once the session is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    /// Current status.
    pub status: Status,
    /// Row the player is on (or ended on).
    pub move_index: usize,
    /// Scored moves, oldest first.
    pub moves: Vec<Move>,
    /// The secret, revealed after the session ends.
    pub secret: Option<Secret>,
}

/// One play-through: secret, move log and status.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) config: GameConfig,
    pub(crate) secret: Secret,
    pub(crate) log: MoveLog,
    pub(crate) status: Status,
    pub(crate) move_index: usize,
}

impl GameSession {
    /// Starts a session with a freshly generated secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is inconsistent, for
    /// example more slots than colors.
    #[instrument(skip(rng))]
    pub fn start<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let secret = SecretGenerator::new(&config).generate(rng);
        info!("Session started");
        Ok(Self::with_valid_secret(config, secret))
    }

    /// Starts a session with a known secret.
    ///
    /// Useful for hosts replaying a recorded game and for tests.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidSecret`] if the configuration is invalid
    /// or the colors do not form a valid secret for it.
    #[instrument]
    pub fn with_secret(config: GameConfig, colors: Vec<Color>) -> Result<Self, GameError> {
        config
            .validate()
            .map_err(|e| GameError::InvalidSecret(e.message))?;
        let secret = Secret::new(colors, *config.color_count(), *config.slot_count())?;
        info!("Session started with fixed secret");
        Ok(Self::with_valid_secret(config, secret))
    }

    fn with_valid_secret(config: GameConfig, secret: Secret) -> Self {
        Self {
            log: MoveLog::new(*config.max_moves()),
            config,
            secret,
            status: Status::InProgress,
            move_index: 0,
        }
    }

    /// Replaces this session with a new one under the same configuration.
    ///
    /// Accepted from any state.
    #[instrument(skip(self, rng), fields(previous = ?self.status))]
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SessionView {
        let secret = SecretGenerator::new(&self.config).generate(rng);
        *self = Self::with_valid_secret(self.config, secret);
        info!("Session restarted");
        self.view()
    }

    /// Scores a guess and advances the state machine.
    ///
    /// # Errors
    ///
    /// - [`GameError::SessionNotActive`] once the session has ended
    /// - [`GameError::WrongGuessLength`] if the guess does not fit the board
    /// - [`GameError::IncompleteGuess`] if a slot is empty
    /// - [`GameError::ColorOutOfRange`] if a color is outside the palette
    /// - [`GameError::SessionExhausted`] if no moves remain
    ///
    /// On error the session is unchanged.
    #[instrument(skip(self, guess), fields(move_index = self.move_index, guess = %guess.display()))]
    pub fn submit_guess(&mut self, guess: &Guess) -> Result<SessionView, GameError> {
        SubmitGuessContract::pre(self, guess).inspect_err(|e| {
            warn!(error = %e, "Guess rejected");
        })?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let score = rules::score(&self.secret, guess)?;
        self.log.push(Move::new(guess.clone(), score))?;

        let slot_count = *self.config.slot_count();
        let max_moves = *self.config.max_moves();
        if score.is_win(slot_count) {
            self.status = Status::Won;
            info!(moves = self.log.len(), "Secret matched");
        } else if self.move_index + 1 >= max_moves {
            self.status = Status::Lost;
            info!(moves = self.log.len(), "Move budget spent");
        } else {
            self.move_index += 1;
            debug!(exact = score.exact, color_only = score.color_only, "Guess scored, play continues");
        }

        #[cfg(debug_assertions)]
        SubmitGuessContract::post(&before, self)?;

        Ok(self.view())
    }

    /// Gives up the session.
    ///
    /// # Errors
    ///
    /// - [`GameError::SessionNotActive`] once the session has ended
    /// - [`GameError::InvalidResign`] before the first guess
    #[instrument(skip(self), fields(move_index = self.move_index))]
    pub fn resign(&mut self) -> Result<SessionView, GameError> {
        ResignContract::pre(self, &()).inspect_err(|e| {
            warn!(error = %e, "Resign rejected");
        })?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.status = Status::Resigned;
        info!(moves = self.log.len(), "Player resigned");

        #[cfg(debug_assertions)]
        ResignContract::post(&before, self)?;

        Ok(self.view())
    }

    /// Projects the session for display.
    pub fn view(&self) -> SessionView {
        SessionView {
            status: self.status,
            move_index: self.move_index,
            moves: self.log.moves().to_vec(),
            secret: self.revealed_secret().cloned(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the index of the current row.
    pub fn move_index(&self) -> usize {
        self.move_index
    }

    /// Returns the move log.
    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    /// Returns the scored moves, oldest first.
    pub fn moves(&self) -> &[Move] {
        self.log.moves()
    }

    /// Guesses left before the session is lost.
    pub fn remaining_moves(&self) -> usize {
        if self.status.is_terminal() {
            0
        } else {
            self.log.remaining()
        }
    }

    /// Returns the secret once the session has ended.
    pub fn revealed_secret(&self) -> Option<&Secret> {
        self.status.is_terminal().then_some(&self.secret)
    }

    /// An empty guess sized for this session.
    pub fn blank_guess(&self) -> Guess {
        Guess::empty(*self.config.slot_count())
    }

    /// The most recently submitted guess, for seeding the next row.
    ///
    /// `None` before the first guess.
    pub fn previous_guess(&self) -> Option<&Guess> {
        self.log.last().map(Move::guess)
    }
}
