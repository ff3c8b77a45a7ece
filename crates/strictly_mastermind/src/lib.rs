//! Strictly Mastermind - pure code-breaking game logic
//!
//! A hidden secret of distinct colored pegs is drawn, and the player
//! submits guesses scored by pegs matching in position and color versus
//! color alone.
//!
//! # Architecture
//!
//! - **Secret**: [`SecretGenerator`] draws distinct colors from an injected RNG
//! - **Rules**: [`score`] two-pass scoring, [`ResultClassifier`] dense outcome ids
//! - **Log**: [`MoveLog`] bounded history of scored guesses
//! - **Session**: [`GameSession`] state machine with contract-checked transitions
//! - **Table**: [`Mastermind`] host facade owning the RNG and current session
//!
//! The engine performs no I/O and no locking.
//!
//! # Example
//!
//! ```
//! use strictly_mastermind::{Color, GameConfig, GameSession, Guess, Status};
//!
//! let mut session = GameSession::with_secret(
//!     GameConfig::default(),
//!     [4, 5, 2, 3].into_iter().map(Color::new).collect(),
//! )?;
//!
//! let guess = Guess::from_colors([4, 2, 5, 3].into_iter().map(Color::new));
//! let view = session.submit_guess(&guess)?;
//! assert_eq!(view.moves[0].exact(), 2);
//! assert_eq!(view.moves[0].color_only(), 2);
//! assert_eq!(view.status, Status::InProgress);
//! # Ok::<(), strictly_mastermind::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod config;
pub mod contracts;
pub mod invariants;
mod log;
pub mod rules;
mod secret;
mod session;
mod table;
mod types;

pub use action::{GameError, Move, Score};
pub use config::{ConfigError, GameConfig, MAX_COLORS};
pub use log::MoveLog;
pub use rules::{score, ResultClass, ResultClassifier};
pub use secret::SecretGenerator;
pub use session::{GameSession, SessionView, Status};
pub use table::Mastermind;
pub use types::{is_guess_complete, Color, Guess, Palette, Secret, Slot};
