//! Game rules.
//!
//! Pure functions for evaluating guesses and encoding their outcomes.
//! Rules are separated from session storage so contracts and invariants
//! can reuse them.

pub mod classify;
pub mod score;

pub use classify::{ResultClass, ResultClassifier};
pub use score::score;
