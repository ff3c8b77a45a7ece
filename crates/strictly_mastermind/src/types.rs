//! Core domain types for the code-breaking game.

use crate::action::GameError;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Named colors of the default six-color palette.
///
/// The discriminant is the color index used by [`Color`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
pub enum Palette {
    /// Color 0.
    Black,
    /// Color 1.
    Blue,
    /// Color 2.
    Green,
    /// Color 3.
    Yellow,
    /// Color 4.
    Red,
    /// Color 5.
    White,
}

impl Palette {
    /// Returns the palette entry for a color index, if it has a name.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Returns the color index of this palette entry.
    pub fn color(self) -> Color {
        Color(self as u8)
    }
}

/// A peg color, identified by its index in `0..color_count`.
///
/// Colors carry no ordering semantics beyond identity. The first six
/// indices have names (see [`Palette`]); larger palettes fall back to
/// numbered labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(u8);

impl Color {
    /// Creates a color from its index.
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Returns the color index.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Human-readable label.
    pub fn label(self) -> String {
        match Palette::from_index(self.index()) {
            Some(named) => named.to_string(),
            None => format!("Color {}", self.0),
        }
    }

    /// Parses a color from its index or its palette name (case-insensitive).
    #[instrument]
    pub fn from_label_or_number(s: &str) -> Option<Color> {
        let s = s.trim();
        if let Ok(num) = s.parse::<u8>() {
            return Some(Color(num));
        }

        let s_lower = s.to_lowercase();
        Palette::iter()
            .find(|named| named.to_string().to_lowercase() == s_lower)
            .map(Palette::color)
    }
}

impl From<Palette> for Color {
    fn from(named: Palette) -> Self {
        named.color()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One position of a guess under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// No peg placed yet.
    Empty,
    /// Slot holds a peg of this color.
    Filled(Color),
}

impl Slot {
    /// Returns the color in this slot, if any.
    pub fn color(self) -> Option<Color> {
        match self {
            Slot::Empty => None,
            Slot::Filled(color) => Some(color),
        }
    }
}

/// A guess: one slot per peg position.
///
/// Colors may repeat within a guess. Only complete guesses (no
/// [`Slot::Empty`]) can be scored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Guess {
    slots: Vec<Slot>,
}

impl Guess {
    /// Creates an empty guess with `slot_count` slots.
    pub fn empty(slot_count: usize) -> Self {
        Self {
            slots: vec![Slot::Empty; slot_count],
        }
    }

    /// Creates a complete guess from a sequence of colors.
    pub fn from_colors(colors: impl IntoIterator<Item = Color>) -> Self {
        Self {
            slots: colors.into_iter().map(Slot::Filled).collect(),
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the guess has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the slot at `index`.
    pub fn get(&self, index: usize) -> Option<Slot> {
        self.slots.get(index).copied()
    }

    /// Returns all slots.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Places a peg of `color` in slot `index`, replacing whatever was there.
    pub fn set(&mut self, index: usize, color: Color) -> Result<(), GameError> {
        let slot_count = self.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(GameError::SlotOutOfRange { index, slot_count })?;
        *slot = Slot::Filled(color);
        Ok(())
    }

    /// Removes the peg from slot `index`.
    pub fn clear(&mut self, index: usize) -> Result<(), GameError> {
        let slot_count = self.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(GameError::SlotOutOfRange { index, slot_count })?;
        *slot = Slot::Empty;
        Ok(())
    }

    /// Exchanges the contents of two slots.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), GameError> {
        let slot_count = self.len();
        for index in [a, b] {
            if index >= slot_count {
                return Err(GameError::SlotOutOfRange { index, slot_count });
            }
        }
        self.slots.swap(a, b);
        Ok(())
    }

    /// True iff no slot is empty.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| *s != Slot::Empty)
    }

    /// Returns the colors of a complete guess, or `None` if any slot is empty.
    pub fn colors(&self) -> Option<Vec<Color>> {
        self.slots.iter().map(|s| s.color()).collect()
    }

    /// Formats the guess as a compact string, `_` for empty slots.
    pub fn display(&self) -> String {
        self.slots
            .iter()
            .map(|s| match s {
                Slot::Empty => "_".to_string(),
                Slot::Filled(color) => color.label(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Free predicate form of [`Guess::is_complete`], for callers deciding
/// whether a submit action should be offered.
pub fn is_guess_complete(guess: &Guess) -> bool {
    guess.is_complete()
}

/// The hidden code: pairwise-distinct colors, one per slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Secret {
    colors: Vec<Color>,
}

impl Secret {
    /// Builds a secret from explicit colors.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidSecret`] if the length differs from
    /// `slot_count`, a color is outside `0..color_count`, or a color repeats.
    #[instrument]
    pub fn new(colors: Vec<Color>, color_count: usize, slot_count: usize) -> Result<Self, GameError> {
        if colors.len() != slot_count {
            return Err(GameError::InvalidSecret(format!(
                "expected {} colors, found {}",
                slot_count,
                colors.len()
            )));
        }

        let mut seen = vec![false; color_count];
        for color in &colors {
            let Some(used) = seen.get_mut(color.index()) else {
                return Err(GameError::InvalidSecret(format!(
                    "{} is outside the {}-color palette",
                    color, color_count
                )));
            };
            if *used {
                return Err(GameError::InvalidSecret(format!("{} appears twice", color)));
            }
            *used = true;
        }

        Ok(Self { colors })
    }

    /// Wraps colors the generator already knows to be valid.
    pub(crate) fn from_generated(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// The secret colors in slot order.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True when the secret has no slots.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// True iff no color appears twice.
    pub fn is_distinct(&self) -> bool {
        self.colors
            .iter()
            .enumerate()
            .all(|(i, a)| self.colors[i + 1..].iter().all(|b| a != b))
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels = self.colors.iter().map(|c| c.label()).collect::<Vec<_>>();
        write!(f, "{}", labels.join(" "))
    }
}
