//! First-class session invariants.
//!
//! Invariants are logical properties that must hold after every
//! transition. They are checked as postconditions in debug builds and are
//! testable on their own.

use super::session::{GameSession, Status};
use tracing::{instrument, warn};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
pub trait InvariantSet<S> {
    /// Returns every violated invariant, or `Ok(())` if all hold.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let checks = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
            (I4::holds(state), I4::description()),
        ];

        let violations: Vec<_> = checks
            .into_iter()
            .filter(|(holds, _)| !holds)
            .map(|(_, description)| InvariantViolation::new(description))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Session invariants
// ─────────────────────────────────────────────────────────────

/// The secret fills every slot with pairwise-distinct palette colors.
pub struct SecretDistinct;

impl Invariant<GameSession> for SecretDistinct {
    #[instrument(skip(session))]
    fn holds(session: &GameSession) -> bool {
        let secret = &session.secret;
        let valid = secret.len() == *session.config.slot_count()
            && secret.is_distinct()
            && secret
                .colors()
                .iter()
                .all(|c| c.index() < *session.config.color_count());
        if !valid {
            warn!("Secret invariant violated");
        }
        valid
    }

    fn description() -> &'static str {
        "Secret must hold slot_count distinct colors from the palette"
    }
}

/// Every logged move is a complete guess with a feasible score.
pub struct ScoresFeasible;

impl Invariant<GameSession> for ScoresFeasible {
    #[instrument(skip(session))]
    fn holds(session: &GameSession) -> bool {
        let slot_count = *session.config.slot_count();
        session.log.moves().iter().all(|m| {
            m.guess().len() == slot_count
                && m.guess().is_complete()
                && m.score().is_feasible(slot_count)
        })
    }

    fn description() -> &'static str {
        "Logged moves must be complete guesses with feasible scores"
    }
}

/// The log never exceeds the move budget and the move index stays in it.
pub struct MoveLogBounded;

impl Invariant<GameSession> for MoveLogBounded {
    #[instrument(skip(session))]
    fn holds(session: &GameSession) -> bool {
        let max_moves = *session.config.max_moves();
        let len = session.log.len();
        let valid = len <= max_moves
            && session.move_index <= len
            && session.move_index < max_moves;
        if !valid {
            warn!(len, max_moves, move_index = session.move_index, "Move log bound violated");
        }
        valid
    }

    fn description() -> &'static str {
        "Move log must stay within max_moves"
    }
}

/// The status agrees with the log.
///
/// - `Won` iff the last move matched every slot
/// - `Lost` only once the budget is spent
/// - `Resigned` only after at least one guess
/// - `InProgress` only while moves remain
pub struct StatusMatchesLog;

impl Invariant<GameSession> for StatusMatchesLog {
    #[instrument(skip(session))]
    fn holds(session: &GameSession) -> bool {
        let slot_count = *session.config.slot_count();
        let last_won = session
            .log
            .last()
            .is_some_and(|m| m.score().is_win(slot_count));
        let earlier_won = session
            .log
            .moves()
            .iter()
            .rev()
            .skip(1)
            .any(|m| m.score().is_win(slot_count));

        if earlier_won {
            return false;
        }

        match session.status {
            Status::Won => last_won,
            Status::Lost => !last_won && session.log.is_full(),
            Status::Resigned => !last_won && !session.log.is_empty(),
            Status::InProgress => !last_won && !session.log.is_full(),
        }
    }

    fn description() -> &'static str {
        "Status must agree with the move log"
    }
}

/// All session invariants.
pub type SessionInvariants = (SecretDistinct, ScoresFeasible, MoveLogBounded, StatusMatchesLog);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::types::{Color, Guess};

    fn session() -> GameSession {
        GameSession::with_secret(
            GameConfig::default(),
            [0, 1, 2, 3].into_iter().map(Color::new).collect(),
        )
        .unwrap()
    }

    fn guess(indices: [u8; 4]) -> Guess {
        Guess::from_colors(indices.into_iter().map(Color::new))
    }

    #[test]
    fn test_fresh_session_holds() {
        assert!(SessionInvariants::check_all(&session()).is_ok());
    }

    #[test]
    fn test_holds_after_moves() {
        let mut s = session();
        s.submit_guess(&guess([5, 4, 3, 2])).unwrap();
        s.submit_guess(&guess([0, 1, 2, 3])).unwrap();
        assert_eq!(s.status(), Status::Won);
        assert!(SessionInvariants::check_all(&s).is_ok());
    }

    #[test]
    fn test_detects_status_corruption() {
        let mut s = session();
        s.submit_guess(&guess([5, 4, 3, 2])).unwrap();
        s.status = Status::Won;
        let violations = SessionInvariants::check_all(&s).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].description, StatusMatchesLog::description());
    }

    #[test]
    fn test_detects_duplicate_secret() {
        let mut s = session();
        s.secret = crate::types::Secret::from_generated(vec![Color::new(1); 4]);
        assert!(!SecretDistinct::holds(&s));
    }

    #[test]
    fn test_resigned_needs_a_guess() {
        let mut s = session();
        s.status = Status::Resigned;
        assert!(!StatusMatchesLog::holds(&s));
    }
}
