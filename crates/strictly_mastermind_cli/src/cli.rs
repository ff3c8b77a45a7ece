//! Command-line interface for strictly_mastermind.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Mastermind - code-breaking game in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_mastermind")]
#[command(about = "Break a hidden code of colored pegs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play sessions read line by line from stdin
    Play {
        /// Path to a TOML settings file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of colors in the palette
        #[arg(long)]
        colors: Option<usize>,

        /// Pegs per guess
        #[arg(long)]
        slots: Option<usize>,

        /// Guesses allowed per session
        #[arg(long)]
        max_moves: Option<usize>,

        /// Seed for reproducible secrets (entropy if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Print the session view as JSON after every command
        #[arg(long)]
        json: bool,
    },

    /// Print the result class table for a slot count
    Classes {
        /// Pegs per guess (1 to 64)
        #[arg(long, default_value = "4", value_parser = clap::value_parser!(u16).range(1..=64))]
        slots: u16,
    },
}
