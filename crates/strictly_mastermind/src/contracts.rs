//! Contract-based validation for session transitions.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P(state, action)} action {Q(before, after)}`. Preconditions run on
//! every call; postconditions run in debug builds.

use super::action::GameError;
use super::invariants::{InvariantSet, SessionInvariants};
use super::session::GameSession;
use super::types::Guess;
use tracing::{instrument, warn};

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), GameError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the session has not reached a terminal state.
pub struct SessionActive;

impl SessionActive {
    /// Fails with [`GameError::SessionNotActive`] on a finished session.
    #[instrument(skip(session))]
    pub fn check(session: &GameSession) -> Result<(), GameError> {
        if session.status().is_terminal() {
            warn!(status = ?session.status(), "Action on finished session");
            Err(GameError::SessionNotActive)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the guess has one slot per peg.
pub struct GuessFitsBoard;

impl GuessFitsBoard {
    /// Fails with [`GameError::WrongGuessLength`].
    #[instrument(skip(session, guess))]
    pub fn check(guess: &Guess, session: &GameSession) -> Result<(), GameError> {
        let expected = *session.config().slot_count();
        if guess.len() != expected {
            Err(GameError::WrongGuessLength {
                expected,
                found: guess.len(),
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: every slot of the guess holds a peg.
pub struct GuessComplete;

impl GuessComplete {
    /// Fails with [`GameError::IncompleteGuess`].
    #[instrument(skip(guess))]
    pub fn check(guess: &Guess) -> Result<(), GameError> {
        if guess.is_complete() {
            Ok(())
        } else {
            Err(GameError::IncompleteGuess)
        }
    }
}

/// Precondition: every peg uses a color from the configured palette.
pub struct ColorsInPalette;

impl ColorsInPalette {
    /// Fails with [`GameError::ColorOutOfRange`] on the first stray color.
    #[instrument(skip(session, guess))]
    pub fn check(guess: &Guess, session: &GameSession) -> Result<(), GameError> {
        let color_count = *session.config().color_count();
        match guess
            .slots()
            .iter()
            .filter_map(|s| s.color())
            .find(|c| c.index() >= color_count)
        {
            Some(color) => Err(GameError::ColorOutOfRange { color, color_count }),
            None => Ok(()),
        }
    }
}

/// Precondition: the move budget is not spent.
///
/// Unreachable through the state machine, which ends the session on the
/// last guess.
pub struct MovesRemaining;

impl MovesRemaining {
    /// Fails with [`GameError::SessionExhausted`].
    #[instrument(skip(session))]
    pub fn check(session: &GameSession) -> Result<(), GameError> {
        if session.move_index() >= *session.config().max_moves() || session.log().is_full() {
            Err(GameError::SessionExhausted)
        } else {
            Ok(())
        }
    }
}

/// Precondition: at least one guess has been submitted.
pub struct HasGuessed;

impl HasGuessed {
    /// Fails with [`GameError::InvalidResign`].
    #[instrument(skip(session))]
    pub fn check(session: &GameSession) -> Result<(), GameError> {
        if session.log().is_empty() {
            Err(GameError::InvalidResign)
        } else {
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition contracts
// ─────────────────────────────────────────────────────────────

/// Checks every session invariant, folding violations into one error.
fn invariants_hold(after: &GameSession) -> Result<(), GameError> {
    SessionInvariants::check_all(after).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        GameError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}

/// Contract for submitting a guess.
///
/// Preconditions, in the order they are reported:
/// - Session is active
/// - Guess has one slot per peg
/// - Guess is complete
/// - Colors are in the palette
/// - Moves remain
///
/// Postconditions:
/// - Exactly one move was appended
/// - All session invariants hold
pub struct SubmitGuessContract;

impl Contract<GameSession, Guess> for SubmitGuessContract {
    fn pre(session: &GameSession, guess: &Guess) -> Result<(), GameError> {
        SessionActive::check(session)?;
        GuessFitsBoard::check(guess, session)?;
        GuessComplete::check(guess)?;
        ColorsInPalette::check(guess, session)?;
        MovesRemaining::check(session)?;
        Ok(())
    }

    fn post(before: &GameSession, after: &GameSession) -> Result<(), GameError> {
        if after.log().len() != before.log().len() + 1 {
            return Err(GameError::InvariantViolation(
                "Postcondition failed: submit must append exactly one move".to_string(),
            ));
        }
        invariants_hold(after)
    }
}

/// Contract for resigning.
///
/// Preconditions:
/// - Session is active
/// - At least one guess was submitted
///
/// Postconditions:
/// - Log unchanged
/// - All session invariants hold
pub struct ResignContract;

impl Contract<GameSession, ()> for ResignContract {
    fn pre(session: &GameSession, _action: &()) -> Result<(), GameError> {
        SessionActive::check(session)?;
        HasGuessed::check(session)?;
        Ok(())
    }

    fn post(before: &GameSession, after: &GameSession) -> Result<(), GameError> {
        if after.log() != before.log() {
            return Err(GameError::InvariantViolation(
                "Postcondition failed: resign must not touch the move log".to_string(),
            ));
        }
        invariants_hold(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Move, Score};
    use crate::config::GameConfig;
    use crate::session::Status;
    use crate::types::Color;

    fn session() -> GameSession {
        GameSession::with_secret(
            GameConfig::default(),
            [4, 5, 2, 3].into_iter().map(Color::new).collect(),
        )
        .unwrap()
    }

    fn guess(indices: &[u8]) -> Guess {
        Guess::from_colors(indices.iter().copied().map(Color::new))
    }

    #[test]
    fn test_precondition_complete_guess() {
        assert!(SubmitGuessContract::pre(&session(), &guess(&[0, 0, 1, 1])).is_ok());
    }

    #[test]
    fn test_precondition_incomplete_guess() {
        let mut g = Guess::empty(4);
        g.set(0, Color::new(1)).unwrap();
        assert_eq!(
            SubmitGuessContract::pre(&session(), &g),
            Err(GameError::IncompleteGuess)
        );
    }

    #[test]
    fn test_precondition_length_reported_before_completeness() {
        assert!(matches!(
            SubmitGuessContract::pre(&session(), &Guess::empty(3)),
            Err(GameError::WrongGuessLength { expected: 4, found: 3 })
        ));
    }

    #[test]
    fn test_precondition_color_out_of_palette() {
        assert!(matches!(
            SubmitGuessContract::pre(&session(), &guess(&[0, 1, 2, 6])),
            Err(GameError::ColorOutOfRange { color_count: 6, .. })
        ));
    }

    #[test]
    fn test_precondition_finished_session() {
        let mut s = session();
        s.submit_guess(&guess(&[4, 5, 2, 3])).unwrap();
        assert_eq!(s.status(), Status::Won);
        assert_eq!(
            SubmitGuessContract::pre(&s, &guess(&[0, 1, 2, 3])),
            Err(GameError::SessionNotActive)
        );
    }

    #[test]
    fn test_precondition_full_log_exhausts_session() {
        let mut s = GameSession::with_secret(
            GameConfig::new(6, 4, 2).unwrap(),
            [4, 5, 2, 3].into_iter().map(Color::new).collect(),
        )
        .unwrap();
        // Fill the log behind the state machine's back; status stays InProgress.
        for _ in 0..2 {
            s.log
                .push(Move::new(guess(&[0, 0, 1, 1]), Score::new(0, 1)))
                .unwrap();
        }
        assert_eq!(s.status(), Status::InProgress);

        let log_before = s.log().clone();
        assert_eq!(
            SubmitGuessContract::pre(&s, &guess(&[0, 1, 2, 3])),
            Err(GameError::SessionExhausted)
        );
        assert_eq!(
            s.submit_guess(&guess(&[4, 5, 2, 3])),
            Err(GameError::SessionExhausted)
        );
        assert_eq!(s.log(), &log_before);
        assert_eq!(s.status(), Status::InProgress);
        assert_eq!(s.move_index(), 0);
    }

    #[test]
    fn test_resign_requires_guess() {
        assert_eq!(ResignContract::pre(&session(), &()), Err(GameError::InvalidResign));
    }

    #[test]
    fn test_postcondition_holds_after_submit() {
        let before = session();
        let mut after = before.clone();
        after.submit_guess(&guess(&[4, 2, 5, 3])).unwrap();
        assert!(SubmitGuessContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_missing_move() {
        let before = session();
        assert!(SubmitGuessContract::post(&before, &before.clone()).is_err());
    }
}
