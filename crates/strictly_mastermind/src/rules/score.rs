//! Guess scoring.

use super::super::action::{GameError, Score};
use super::super::types::{Guess, Secret};
use tracing::{debug, instrument};

/// Scores a complete guess against the secret.
///
/// Two passes over per-color counts. The exact pass credits every slot where
/// guess and secret agree and removes that peg from both tallies; the color
/// pass then credits the overlap of what remains, color by color. A peg is
/// credited at most once, and guesses with repeated colors score correctly.
///
/// # Errors
///
/// Returns [`GameError::IncompleteGuess`] if any slot is empty, and
/// [`GameError::WrongGuessLength`] if the guess and secret differ in length.
#[instrument(skip(secret, guess), fields(guess = %guess.display()))]
pub fn score(secret: &Secret, guess: &Guess) -> Result<Score, GameError> {
    let colors = guess.colors().ok_or(GameError::IncompleteGuess)?;
    if colors.len() != secret.len() {
        return Err(GameError::WrongGuessLength {
            expected: secret.len(),
            found: colors.len(),
        });
    }

    let palette = colors
        .iter()
        .chain(secret.colors())
        .map(|c| c.index() + 1)
        .max()
        .unwrap_or(0);
    let mut guess_counts = vec![0usize; palette];
    let mut secret_counts = vec![0usize; palette];
    for (g, s) in colors.iter().zip(secret.colors()) {
        guess_counts[g.index()] += 1;
        secret_counts[s.index()] += 1;
    }

    let mut exact = 0usize;
    for (g, s) in colors.iter().zip(secret.colors()) {
        if g == s {
            guess_counts[g.index()] -= 1;
            secret_counts[g.index()] -= 1;
            exact += 1;
        }
    }

    let color_only: usize = guess_counts
        .iter()
        .zip(&secret_counts)
        .map(|(g, s)| (*g).min(*s))
        .sum();

    debug!(exact, color_only, "Guess scored");
    Ok(Score::new(exact, color_only))
}
