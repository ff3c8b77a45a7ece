//! Game configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Largest palette a [`Color`](crate::Color) index can address.
pub const MAX_COLORS: usize = u8::MAX as usize + 1;

/// Constants fixed for the lifetime of a session.
///
/// Every constructor validates, deserialization included, so a
/// `GameConfig` in hand is always consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    /// Number of distinct colors.
    color_count: usize,

    /// Pegs per guess.
    slot_count: usize,

    /// Guesses allowed per session.
    max_moves: usize,
}

/// Unvalidated wire form of [`GameConfig`].
#[derive(Deserialize)]
struct RawGameConfig {
    #[serde(default = "default_color_count")]
    color_count: usize,
    #[serde(default = "default_slot_count")]
    slot_count: usize,
    #[serde(default = "default_max_moves")]
    max_moves: usize,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGameConfig) -> Result<Self, Self::Error> {
        Self::new(raw.color_count, raw.slot_count, raw.max_moves)
    }
}

fn default_color_count() -> usize {
    6
}

fn default_slot_count() -> usize {
    4
}

fn default_max_moves() -> usize {
    10
}

impl GameConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// See [`GameConfig::validate`].
    #[instrument]
    pub fn new(color_count: usize, slot_count: usize, max_moves: usize) -> Result<Self, ConfigError> {
        let config = Self {
            color_count,
            slot_count,
            max_moves,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the constants against each other.
    ///
    /// The secret draws `slot_count` distinct colors, so the palette must be
    /// at least that large.
    #[instrument]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_count == 0 {
            warn!("Rejecting configuration with no slots");
            return Err(ConfigError::new("slot_count must be at least 1"));
        }
        if self.max_moves == 0 {
            warn!("Rejecting configuration with no moves");
            return Err(ConfigError::new("max_moves must be at least 1"));
        }
        if self.color_count > MAX_COLORS {
            warn!(color_count = self.color_count, "Palette too large");
            return Err(ConfigError::new(format!(
                "color_count {} exceeds the maximum of {}",
                self.color_count, MAX_COLORS
            )));
        }
        if self.slot_count > self.color_count {
            warn!(
                slot_count = self.slot_count,
                color_count = self.color_count,
                "Not enough colors for a distinct secret"
            );
            return Err(ConfigError::new(format!(
                "slot_count {} exceeds color_count {}",
                self.slot_count, self.color_count
            )));
        }
        debug!("Configuration valid");
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            color_count: default_color_count(),
            slot_count: default_slot_count(),
            max_moves: default_max_moves(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(*config.color_count(), 6);
        assert_eq!(*config.slot_count(), 4);
        assert_eq!(*config.max_moves(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_more_slots_than_colors_rejected() {
        let err = GameConfig::new(3, 4, 10).unwrap_err();
        assert!(err.message.contains("exceeds color_count"));
    }

    #[test]
    fn test_zero_slots_rejected() {
        assert!(GameConfig::new(6, 0, 10).is_err());
    }

    #[test]
    fn test_zero_moves_rejected() {
        assert!(GameConfig::new(6, 4, 0).is_err());
    }

    #[test]
    fn test_palette_limit() {
        assert!(GameConfig::new(MAX_COLORS, 4, 10).is_ok());
        assert!(GameConfig::new(MAX_COLORS + 1, 4, 10).is_err());
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"max_moves": 12}"#).unwrap();
        assert_eq!(config, GameConfig::new(6, 4, 12).unwrap());
    }

    #[test]
    fn test_deserialize_rejects_more_slots_than_colors() {
        let err = serde_json::from_str::<GameConfig>(r#"{"color_count": 3}"#).unwrap_err();
        assert!(err.to_string().contains("exceeds color_count"));
    }

    #[test]
    fn test_deserialize_rejects_empty_palette() {
        assert!(serde_json::from_str::<GameConfig>(r#"{"color_count": 0}"#).is_err());
        assert!(
            serde_json::from_str::<GameConfig>(r#"{"color_count": 0, "slot_count": 0}"#).is_err()
        );
    }

    #[test]
    fn test_serialized_config_reloads() {
        let config = GameConfig::new(8, 5, 3).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<GameConfig>(&json).unwrap(), config);
    }

    #[test]
    fn test_equal_slots_and_colors_allowed() {
        assert!(GameConfig::new(4, 4, 10).is_ok());
    }
}
