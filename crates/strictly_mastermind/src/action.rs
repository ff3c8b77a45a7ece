//! Scored moves and the engine's error type.
//!
//! A [`Move`] is the record of one submitted guess together with its
//! score. Moves are immutable once created and are what the move log
//! stores and what callers read back.

use super::types::{Color, Guess};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Feedback for one guess: pegs matching in position and color, and pegs
/// matching in color only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    /// Pegs matching both color and position.
    pub exact: usize,
    /// Pegs matching color but not position.
    pub color_only: usize,
}

impl Score {
    /// Creates a score.
    pub fn new(exact: usize, color_only: usize) -> Self {
        Self { exact, color_only }
    }

    /// Returns the exact-match count.
    pub fn exact(&self) -> usize {
        self.exact
    }

    /// Returns the color-only count.
    pub fn color_only(&self) -> usize {
        self.color_only
    }

    /// True iff the pair can occur for `slot_count` pegs.
    pub fn is_feasible(&self, slot_count: usize) -> bool {
        self.exact + self.color_only <= slot_count
            && (self.exact != slot_count || self.color_only == 0)
    }

    /// True iff every peg matched exactly.
    pub fn is_win(&self, slot_count: usize) -> bool {
        self.exact == slot_count
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} exact, {} color", self.exact, self.color_only)
    }
}

/// A scored guess.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    guess: Guess,
    score: Score,
}

impl Move {
    /// Creates a move from a complete guess and its score.
    #[instrument(skip(guess))]
    pub(crate) fn new(guess: Guess, score: Score) -> Self {
        Self { guess, score }
    }

    /// The guess that was submitted.
    pub fn guess(&self) -> &Guess {
        &self.guess
    }

    /// The feedback received.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Pegs matching both color and position.
    pub fn exact(&self) -> usize {
        self.score.exact
    }

    /// Pegs matching color only.
    pub fn color_only(&self) -> usize {
        self.score.color_only
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.guess.display(), self.score)
    }
}

/// Error returned by engine operations.
///
/// Every variant is a precondition violation. An operation that returns
/// an error has not changed any observable state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The guess still has empty slots.
    #[display("Guess has empty slots")]
    IncompleteGuess,

    /// The session is over; start a new one.
    #[display("Session is not active")]
    SessionNotActive,

    /// The move log is already full.
    #[display("No moves remain in this session")]
    SessionExhausted,

    /// Resignation needs an in-progress session with at least one guess.
    #[display("Cannot resign before the first guess or after the game ended")]
    InvalidResign,

    /// Result class index outside `0..total_classes`.
    #[display("Result class {} is out of range", _0)]
    InvalidResultClass(usize),

    /// Slot index outside the guess.
    #[display("Slot {index} is out of range for {slot_count} slots")]
    SlotOutOfRange {
        /// Requested slot.
        index: usize,
        /// Slots in the guess.
        slot_count: usize,
    },

    /// Color index outside the configured palette.
    #[display("{color} is out of range for {color_count} colors")]
    ColorOutOfRange {
        /// Offending color.
        color: Color,
        /// Colors in play.
        color_count: usize,
    },

    /// Guess has the wrong number of slots for this session.
    #[display("Guess has {found} slots, expected {expected}")]
    WrongGuessLength {
        /// Slots per guess in this session.
        expected: usize,
        /// Slots in the submitted guess.
        found: usize,
    },

    /// Explicit secret failed validation.
    #[display("Invalid secret: {}", _0)]
    InvalidSecret(String),

    /// A postcondition failed after a transition.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for GameError {}
