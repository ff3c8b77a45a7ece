//! Bounded, append-only history of scored guesses.

use super::action::{GameError, Move};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Moves submitted in the current session, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLog {
    moves: Vec<Move>,
    capacity: usize,
}

impl MoveLog {
    /// Creates an empty log holding at most `capacity` moves.
    pub fn new(capacity: usize) -> Self {
        Self {
            moves: Vec::new(),
            capacity,
        }
    }

    /// Appends a move.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionExhausted`] when the log is full.
    #[instrument(skip(self, action), fields(len = self.moves.len(), capacity = self.capacity))]
    pub fn push(&mut self, action: Move) -> Result<(), GameError> {
        if self.is_full() {
            warn!("Move log full");
            return Err(GameError::SessionExhausted);
        }
        self.moves.push(action);
        debug!(len = self.moves.len(), "Move recorded");
        Ok(())
    }

    /// All moves, oldest first.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The most recent move.
    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// Number of moves recorded.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// True when no move has been recorded.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Maximum number of moves.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True when no further move fits.
    pub fn is_full(&self) -> bool {
        self.moves.len() >= self.capacity
    }

    /// Moves still available.
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.moves.len())
    }
}
