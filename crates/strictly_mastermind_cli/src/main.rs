//! Strictly Mastermind - terminal host
//!
//! Plays the code-breaking game over stdin and stdout.

#![warn(missing_docs)]

mod cli;
mod play;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use settings::{Overrides, Settings};
use std::path::PathBuf;
use strictly_mastermind::Mastermind;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Play {
            config,
            colors,
            slots,
            max_moves,
            seed,
            json,
        } => run_play(config, Overrides::new(colors, slots, max_moves, seed), json),
        Command::Classes { slots } => run_classes(slots),
    }
}

/// Logs go to stderr so stdout carries only the game.
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run interactive sessions
#[instrument(skip(overrides))]
fn run_play(config: Option<PathBuf>, overrides: Overrides, json: bool) -> Result<()> {
    let settings = match config {
        Some(path) => Settings::from_file(&path)
            .with_context(|| format!("Loading settings from {}", path.display()))?,
        None => Settings::default(),
    }
    .with_overrides(overrides)
    .context("Applying command-line overrides")?;

    let mut table = match settings.seed() {
        Some(seed) => Mastermind::seeded(*settings.game(), *seed)?,
        None => Mastermind::from_entropy(*settings.game())?,
    };
    info!(game = ?settings.game(), "Table ready");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    play::run(&mut table, stdin.lock(), stdout.lock(), json)
}

/// Print the result class table
fn run_classes(slots: u16) -> Result<()> {
    play::write_class_table(&mut std::io::stdout().lock(), usize::from(slots))
}
