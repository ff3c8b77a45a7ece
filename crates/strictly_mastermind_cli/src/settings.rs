//! Settings for the terminal host.
//!
//! Loaded from an optional TOML file, then overridden by command-line
//! flags:
//!
//! ```toml
//! seed = 42
//!
//! [game]
//! color_count = 6
//! slot_count = 4
//! max_moves = 10
//! ```

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_mastermind::{ConfigError, GameConfig};
use tracing::{debug, info, instrument};

/// Game constants plus an optional secret seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Settings {
    /// Board constants.
    #[serde(default)]
    game: GameConfig,

    /// Seed for the secret generator; entropy when absent.
    #[serde(default)]
    seed: Option<u64>,
}

/// Command-line values that take precedence over the settings file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_new::new)]
pub struct Overrides {
    colors: Option<usize>,
    slots: Option<usize>,
    max_moves: Option<usize>,
    seed: Option<u64>,
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read settings file: {}", e)))?;

        let settings = Self::from_toml(&content)?;
        info!(game = ?settings.game, seed = ?settings.seed, "Settings loaded");
        Ok(settings)
    }

    /// Parses settings from TOML text. Inconsistent game constants fail
    /// here.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))
    }

    /// Applies command-line overrides and revalidates.
    #[instrument(skip(self))]
    pub fn with_overrides(self, overrides: Overrides) -> Result<Self, ConfigError> {
        let game = GameConfig::new(
            overrides.colors.unwrap_or(*self.game.color_count()),
            overrides.slots.unwrap_or(*self.game.slot_count()),
            overrides.max_moves.unwrap_or(*self.game.max_moves()),
        )?;
        Ok(Self {
            game,
            seed: overrides.seed.or(self.seed),
        })
    }
}
