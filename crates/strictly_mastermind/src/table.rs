//! Host-facing entry point.
//!
//! [`Mastermind`] bundles a configuration, the randomness source and the
//! current session behind the operations a presentation layer needs. It
//! always holds a session: construction starts the first one, and
//! [`Mastermind::start`] replaces it.

use super::action::{GameError, Score};
use super::config::{ConfigError, GameConfig};
use super::rules::{ResultClass, ResultClassifier};
use super::session::{GameSession, SessionView};
use super::types::Guess;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, instrument};

/// A game table: one player, one session at a time.
///
/// Not synchronized; hosts sharing a table between threads must serialize
/// access themselves.
#[derive(Debug, Clone)]
pub struct Mastermind<R = ChaCha8Rng> {
    rng: R,
    session: GameSession,
    classifier: ResultClassifier,
}

impl Mastermind<ChaCha8Rng> {
    /// Creates a table whose secrets are reproducible from `seed`.
    #[instrument]
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        info!(seed, "Seeding secret generator");
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates a table seeded from operating-system entropy.
    #[instrument]
    pub fn from_entropy(config: GameConfig) -> Result<Self, ConfigError> {
        Self::new(config, ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> Mastermind<R> {
    /// Creates a table and starts its first session.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an inconsistent configuration.
    #[instrument(skip(rng))]
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        let session = GameSession::start(config, &mut rng)?;
        Ok(Self {
            rng,
            session,
            classifier: ResultClassifier::new(*config.slot_count()),
        })
    }

    /// Discards the current session and starts a new one.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> SessionView {
        self.session.restart(&mut self.rng)
    }

    /// Submits a guess to the current session.
    pub fn submit_guess(&mut self, guess: &Guess) -> Result<SessionView, GameError> {
        self.session.submit_guess(guess)
    }

    /// Resigns the current session.
    pub fn resign(&mut self) -> Result<SessionView, GameError> {
        self.session.resign()
    }

    /// Result class of a score pair, `None` if infeasible.
    pub fn classify(&self, exact: usize, color_only: usize) -> Option<ResultClass> {
        self.classifier.classify(exact, color_only)
    }

    /// Score pair of a result class.
    pub fn declassify(&self, class: usize) -> Result<Score, GameError> {
        self.classifier.declassify(class)
    }

    /// The current session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The classifier for this table's slot count.
    pub fn classifier(&self) -> &ResultClassifier {
        &self.classifier
    }

    /// Projection of the current session.
    pub fn view(&self) -> SessionView {
        self.session.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Status;

    #[test]
    fn test_new_table_has_session() {
        let table = Mastermind::seeded(GameConfig::default(), 5).unwrap();
        assert_eq!(table.view().status, Status::InProgress);
        assert_eq!(table.classifier().total_classes(), 15);
    }

    #[test]
    fn test_bad_config_never_reaches_table() {
        assert!(serde_json::from_str::<GameConfig>(r#"{"color_count": 2}"#).is_err());
        assert!(serde_json::from_str::<GameConfig>(r#"{"color_count": 0}"#).is_err());
    }

    #[test]
    fn test_seed_reproducible() {
        let mut a = Mastermind::seeded(GameConfig::default(), 77).unwrap();
        let mut b = Mastermind::seeded(GameConfig::default(), 77).unwrap();
        assert_eq!(a.session().secret, b.session().secret);
        a.start();
        b.start();
        assert_eq!(a.session().secret, b.session().secret);
    }

    #[test]
    fn test_classify_passthrough() {
        let table = Mastermind::seeded(GameConfig::default(), 1).unwrap();
        assert_eq!(table.classify(2, 2).map(ResultClass::index), Some(11));
        assert_eq!(table.declassify(11), Ok(Score::new(2, 2)));
        assert_eq!(table.classify(3, 2), None);
    }
}
