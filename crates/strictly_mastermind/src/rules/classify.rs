//! Dense numbering of score outcomes.
//!
//! Presentation layers keep one precomputed image (or code) per outcome
//! and index it with a single integer instead of branching on both
//! counts. Classes are numbered by walking `exact` from 0 to `slot_count`
//! and, inside each, `color_only` from 0 to `slot_count`, assigning the
//! next id to every pair with `exact + color_only <= slot_count`.
//!
//! For four slots:
//!
//! ```text
//!  id  exact  color        id  exact  color
//!   0    0      0           8    1      3
//!   1    0      1           9    2      0
//!   2    0      2          10    2      1
//!   3    0      3          11    2      2
//!   4    0      4          12    3      0
//!   5    1      0          13    3      1
//!   6    1      1          14    4      0
//!   7    1      2
//! ```

use super::super::action::{GameError, Score};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Dense id of a feasible `(exact, color_only)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultClass(usize);

impl ResultClass {
    /// Returns the numeric id.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ResultClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps score pairs to result classes and back, for a fixed slot count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultClassifier {
    slot_count: usize,
}

impl ResultClassifier {
    /// Creates a classifier for `slot_count` pegs per guess.
    pub fn new(slot_count: usize) -> Self {
        Self { slot_count }
    }

    /// Number of feasible pairs: `(n + 1)(n + 2) / 2`.
    pub fn total_classes(&self) -> usize {
        (self.slot_count + 1) * (self.slot_count + 2) / 2
    }

    /// Number of classes whose exact count is below `exact`.
    fn row_start(&self, exact: usize) -> usize {
        let n = self.slot_count;
        // Row p holds n + 1 - p entries.
        exact * (n + 1) - exact * exact.saturating_sub(1) / 2
    }

    /// Returns the class of a pair, or `None` when `exact + color_only`
    /// exceeds the slot count.
    #[instrument(skip(self))]
    pub fn classify(&self, exact: usize, color_only: usize) -> Option<ResultClass> {
        if exact
            .checked_add(color_only)
            .is_none_or(|sum| sum > self.slot_count)
        {
            return None;
        }
        Some(ResultClass(self.row_start(exact) + color_only))
    }

    /// Classifies a score.
    pub fn classify_score(&self, score: Score) -> Option<ResultClass> {
        self.classify(score.exact, score.color_only)
    }

    /// Returns the pair a class stands for.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidResultClass`] unless
    /// `class < total_classes()`.
    #[instrument(skip(self))]
    pub fn declassify(&self, class: usize) -> Result<Score, GameError> {
        let mut remaining = class;
        for exact in 0..=self.slot_count {
            let row_len = self.slot_count + 1 - exact;
            if remaining < row_len {
                return Ok(Score::new(exact, remaining));
            }
            remaining -= row_len;
        }
        warn!(class, total = self.total_classes(), "Result class out of range");
        Err(GameError::InvalidResultClass(class))
    }

    /// Every feasible pair with its class, in class order.
    pub fn classes(&self) -> impl Iterator<Item = (ResultClass, Score)> + '_ {
        (0..=self.slot_count)
            .flat_map(move |exact| {
                (0..=self.slot_count - exact).map(move |color_only| Score::new(exact, color_only))
            })
            .enumerate()
            .map(|(id, score)| (ResultClass(id), score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_slot_table() {
        let classifier = ResultClassifier::new(4);
        assert_eq!(classifier.total_classes(), 15);

        let expected = [
            ((0, 0), 0),
            ((0, 4), 4),
            ((1, 0), 5),
            ((1, 3), 8),
            ((2, 0), 9),
            ((2, 2), 11),
            ((3, 0), 12),
            ((3, 1), 13),
            ((4, 0), 14),
        ];
        for ((exact, color_only), id) in expected {
            assert_eq!(
                classifier.classify(exact, color_only).map(ResultClass::index),
                Some(id),
                "({exact}, {color_only})"
            );
        }
    }

    #[test]
    fn test_infeasible_pairs_have_no_class() {
        let classifier = ResultClassifier::new(4);
        assert_eq!(classifier.classify(1, 4), None);
        assert_eq!(classifier.classify(4, 1), None);
        assert_eq!(classifier.classify(5, 0), None);
    }

    #[test]
    fn test_overflowing_pairs_have_no_class() {
        let classifier = ResultClassifier::new(4);
        assert_eq!(classifier.classify(usize::MAX, 1), None);
        assert_eq!(classifier.classify(1, usize::MAX), None);
        assert_eq!(classifier.classify(usize::MAX, usize::MAX), None);
    }

    #[test]
    fn test_declassify_out_of_range() {
        let classifier = ResultClassifier::new(4);
        assert_eq!(classifier.declassify(15), Err(GameError::InvalidResultClass(15)));
        assert_eq!(classifier.declassify(14), Ok(Score::new(4, 0)));
    }

    #[test]
    fn test_classes_iterates_in_order() {
        let classifier = ResultClassifier::new(4);
        let listed: Vec<_> = classifier.classes().collect();
        assert_eq!(listed.len(), 15);
        for (class, score) in listed {
            assert_eq!(classifier.classify_score(score), Some(class));
        }
    }

    #[test]
    fn test_single_slot() {
        let classifier = ResultClassifier::new(1);
        assert_eq!(classifier.total_classes(), 3);
        assert_eq!(classifier.declassify(2), Ok(Score::new(1, 0)));
    }
}
